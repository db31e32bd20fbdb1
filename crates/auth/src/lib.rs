//! `assetdesk-auth`: the authentication boundary of the client.
//!
//! This crate answers one question, "is the current user signed in?", and
//! keeps the answer decoupled from routing and HTTP.

pub mod oracle;
pub mod session;
pub mod store;

pub use oracle::{AsyncAuthOracle, AuthOracle, SessionOracle, StaticOracle};
pub use session::{Session, SessionValidationError, validate_session};
pub use store::{FileSessionStore, MemorySessionStore, SessionError, SessionStore};
