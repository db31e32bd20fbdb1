//! `assetdesk` entry point.
//!
//! Resolves one navigation request against the current session and prints the
//! resulting location, e.g. `assetdesk /licences`.

use std::sync::Arc;

use anyhow::Context;
use assetdesk_auth::{FileSessionStore, SessionStore};
use assetdesk_shell::{AppState, ShellConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ShellConfig::from_env();
    assetdesk_observability::init(config.log_format);

    let store: Arc<dyn SessionStore> = match &config.session_file {
        Some(path) => Arc::new(FileSessionStore::new(path)),
        None => Arc::new(FileSessionStore::default_location().context("failed to locate session file")?),
    };

    tracing::info!(api_url = %config.client.api_url, "Initializing AppState");
    let state = AppState::new(config, store).context("failed to initialize application state")?;

    let path = std::env::args().nth(1).unwrap_or_else(|| "/dashboard".to_string());
    let navigation = state.open(&path)?;

    tracing::info!(
        requested = %path,
        location = %navigation.location.path,
        redirected = navigation.redirected_from.is_some(),
        "navigation resolved"
    );
    println!("{}", serde_json::to_string_pretty(&navigation)?);

    for toast in state.toasts.toasts() {
        println!("[{}] {}", toast.kind, toast.message);
    }

    Ok(())
}
