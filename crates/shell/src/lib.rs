//! `assetdesk-shell`
//!
//! **Responsibility:** application start-up and wiring.
//!
//! Every long-lived component (API client, session oracle, navigator, toast
//! store) is constructed once here and handed to the presentation layer.

pub mod config;
pub mod state;

pub use config::ShellConfig;
pub use state::{AppState, ShellError};
