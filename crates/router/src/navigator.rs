//! Navigator: owns the current location and applies guard decisions.

use assetdesk_auth::{AsyncAuthOracle, AuthOracle};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;

use crate::guard::{GuardDecision, NavigationGuard};
use crate::route::RouteChain;
use crate::table::{RouteTable, normalize_path};

/// Upper bound on redirects followed for a single navigation request.
pub const MAX_REDIRECTS: usize = 3;

/// Where the application currently is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub path: String,
    pub name: Option<String>,
}

/// A completed navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub location: Location,
    /// The originally requested path, when the guard redirected away from it.
    pub redirected_from: Option<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("no route matches '{0}'")]
    NotFound(String),

    #[error("redirect loop while navigating to '{0}'")]
    RedirectLoop(String),
}

enum Step {
    Done(Navigation),
    Follow(String),
}

/// Single owner of the current [`Location`].
///
/// The location only changes once a guard decision allows it; failed or
/// pending navigations leave it untouched.
#[derive(Debug)]
pub struct Navigator {
    table: RouteTable,
    guard: NavigationGuard,
    current: watch::Sender<Option<Location>>,
}

impl Navigator {
    pub fn new(table: RouteTable) -> Self {
        let guard = NavigationGuard::new(table.login_path());
        let (current, _) = watch::channel(None);
        Self {
            table,
            guard,
            current,
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn current(&self) -> Option<Location> {
        self.current.borrow().clone()
    }

    /// Receive every location change.
    pub fn subscribe(&self) -> watch::Receiver<Option<Location>> {
        self.current.subscribe()
    }

    pub fn navigate<O>(&self, path: &str, oracle: &O) -> Result<Navigation, NavigationError>
    where
        O: AuthOracle + ?Sized,
    {
        let requested = normalize_path(path);
        let mut target = requested.clone();

        for _ in 0..=MAX_REDIRECTS {
            let chain = self.resolve(&target)?;
            let from = self.current_path();
            let decision = self.guard.check(from.as_deref(), chain, oracle);
            match self.settle(&requested, &target, chain, decision) {
                Step::Done(navigation) => return Ok(navigation),
                Step::Follow(next) => target = next,
            }
        }

        Err(self.loop_error(requested))
    }

    /// Navigate with an oracle that may need I/O.
    ///
    /// The location does not change while the oracle query is outstanding.
    pub async fn navigate_async<O>(&self, path: &str, oracle: &O) -> Result<Navigation, NavigationError>
    where
        O: AsyncAuthOracle,
    {
        let requested = normalize_path(path);
        let mut target = requested.clone();

        for _ in 0..=MAX_REDIRECTS {
            let chain = self.resolve(&target)?;
            let from = self.current_path();
            let decision = self.guard.check_async(from.as_deref(), chain, oracle).await;
            match self.settle(&requested, &target, chain, decision) {
                Step::Done(navigation) => return Ok(navigation),
                Step::Follow(next) => target = next,
            }
        }

        Err(self.loop_error(requested))
    }

    fn resolve(&self, target: &str) -> Result<&RouteChain, NavigationError> {
        self.table
            .resolve(target)
            .ok_or_else(|| NavigationError::NotFound(target.to_string()))
    }

    fn current_path(&self) -> Option<String> {
        self.current.borrow().as_ref().map(|l| l.path.clone())
    }

    fn settle(&self, requested: &str, target: &str, chain: &RouteChain, decision: GuardDecision) -> Step {
        match decision {
            GuardDecision::Allow => {
                let location = Location {
                    path: target.to_string(),
                    name: chain.leaf().and_then(|r| r.name.clone()),
                };
                self.current.send_replace(Some(location.clone()));
                let redirected_from = (target != requested).then(|| requested.to_string());
                Step::Done(Navigation {
                    location,
                    redirected_from,
                })
            }
            GuardDecision::Redirect { to } => Step::Follow(normalize_path(&to)),
        }
    }

    fn loop_error(&self, requested: String) -> NavigationError {
        tracing::warn!(path = %requested, max = MAX_REDIRECTS, "navigation exceeded redirect limit");
        NavigationError::RedirectLoop(requested)
    }
}
