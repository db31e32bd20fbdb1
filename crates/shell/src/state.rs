//! Application state shared with the presentation layer.

use std::sync::Arc;

use assetdesk_auth::{AuthOracle, Session, SessionError, SessionOracle, SessionStore};
use assetdesk_client::{ApiClient, ClientError};
use assetdesk_router::{Navigation, NavigationError, Navigator, RouteTable};
use assetdesk_toast::{ToastId, ToastStore};
use chrono::Utc;

use crate::config::ShellConfig;

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

/// Application state, built once at start-up.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<ApiClient>,
    pub auth: Arc<SessionOracle<Arc<dyn SessionStore>>>,
    pub navigator: Arc<Navigator>,
    pub toasts: ToastStore,
}

impl AppState {
    /// Wire every component.
    ///
    /// A stored session wins over a token from the environment; the
    /// environment token only seeds an empty store.
    pub fn new(config: ShellConfig, store: Arc<dyn SessionStore>) -> Result<Self, ShellError> {
        let env_token = config.client.token.clone();
        let client = Arc::new(ApiClient::new(config.client)?);

        match store.load()? {
            Some(session) => {
                tracing::info!("Restoring stored session");
                client.set_token(Some(session.token));
            }
            None => {
                if let Some(token) = env_token {
                    tracing::info!("Seeding session from ASSETDESK_AUTH_TOKEN");
                    store.save(&Session::new(token, Utc::now()))?;
                } else {
                    tracing::info!("Starting without a session");
                }
            }
        }

        Ok(Self {
            client,
            auth: Arc::new(SessionOracle::new(store)),
            navigator: Arc::new(Navigator::new(RouteTable::app())),
            toasts: ToastStore::new(config.toasts),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    /// Navigate to `path`; a redirect to the login page also shows a hint.
    pub fn open(&self, path: &str) -> Result<Navigation, ShellError> {
        let navigation = self.navigator.navigate(path, self.auth.as_ref())?;
        if navigation.redirected_from.is_some() {
            self.toasts.info("Please sign in to continue");
        }
        Ok(navigation)
    }

    /// Persist `session` and use its token for API calls.
    pub fn sign_in(&self, session: Session) -> Result<(), ShellError> {
        self.auth.store().save(&session)?;
        self.client.set_token(Some(session.token.clone()));
        let greeting = match &session.user {
            Some(user) => format!("Welcome back, {user}"),
            None => "Signed in".to_string(),
        };
        self.toasts.success(greeting);
        Ok(())
    }

    /// Forget the session and return to the login page.
    pub fn sign_out(&self) -> Result<Navigation, ShellError> {
        self.auth.store().clear()?;
        self.client.set_token(None);
        let navigation = self.navigator.navigate(self.navigator.table().login_path(), self.auth.as_ref())?;
        Ok(navigation)
    }

    /// Turn the outcome of an API call into a toast.
    ///
    /// Returns the payload on success; failures are shown and swallowed.
    pub fn report<T>(&self, result: Result<T, ClientError>, success: &str) -> (Option<T>, ToastId) {
        match result {
            Ok(value) => (Some(value), self.toasts.success(success)),
            Err(err) => {
                tracing::warn!("API call failed: {err}");
                (None, self.toasts.error(err.to_string()))
            }
        }
    }
}
