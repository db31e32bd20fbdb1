//! `assetdesk-core`: shared primitives for the AssetDesk client.
//!
//! This crate contains **pure** building blocks (no IO, no async): the REST
//! resource catalogue, resource identifiers and the error type they share.

pub mod error;
pub mod id;
pub mod resource;

pub use error::{CoreError, CoreResult};
pub use id::ResourceId;
pub use resource::{Operation, Resource};
