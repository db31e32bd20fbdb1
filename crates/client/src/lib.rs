//! `assetdesk-client`: thin wrappers over the AssetDesk REST API.
//!
//! Every call returns the response body as JSON, unmodified. Entity shapes
//! are the caller's business.

pub mod config;
pub mod error;
pub mod http;
pub mod resources;

pub use config::ClientConfig;
pub use error::ClientError;
pub use http::ApiClient;
pub use resources::Collection;
