//! Start-up configuration, read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use assetdesk_client::ClientConfig;
use assetdesk_observability::LogFormat;
use assetdesk_toast::ToastConfig;

#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub client: ClientConfig,
    /// Explicit session file; `None` uses the per-user data directory.
    pub session_file: Option<PathBuf>,
    pub toasts: ToastConfig,
    pub log_format: LogFormat,
}

impl ShellConfig {
    pub fn new(client: ClientConfig) -> Self {
        Self {
            client,
            session_file: None,
            toasts: ToastConfig::default(),
            log_format: LogFormat::default(),
        }
    }

    /// Client settings plus `ASSETDESK_SESSION_FILE`, `ASSETDESK_TOAST_MS`
    /// and `ASSETDESK_LOG_FORMAT`.
    pub fn from_env() -> Self {
        let mut config = Self::new(ClientConfig::from_env());

        config.session_file = std::env::var_os("ASSETDESK_SESSION_FILE").map(PathBuf::from);

        if let Ok(raw) = std::env::var("ASSETDESK_TOAST_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.toasts.default_duration = Duration::from_millis(ms),
                Err(_) => tracing::warn!(value = %raw, "ASSETDESK_TOAST_MS is not a number; using default"),
            }
        }

        if let Ok(raw) = std::env::var("ASSETDESK_LOG_FORMAT") {
            config.log_format = LogFormat::parse(&raw);
        }

        config
    }
}
