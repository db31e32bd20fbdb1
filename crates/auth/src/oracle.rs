//! Auth oracles: the seam between "how credentials are stored" and "may this
//! navigation proceed".

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;

use crate::store::SessionStore;

/// Synchronous authentication check, queried once per navigation attempt.
pub trait AuthOracle: Send + Sync {
    fn is_authenticated(&self) -> bool;
}

/// Authentication check that may need I/O (e.g. a server-side token check).
///
/// Every [`AuthOracle`] is also an `AsyncAuthOracle` that resolves at once.
pub trait AsyncAuthOracle: Send + Sync {
    fn check_authenticated(&self) -> impl Future<Output = bool> + Send;
}

impl<T: AuthOracle + ?Sized> AsyncAuthOracle for T {
    fn check_authenticated(&self) -> impl Future<Output = bool> + Send {
        std::future::ready(self.is_authenticated())
    }
}

impl<T: AuthOracle + ?Sized> AuthOracle for Arc<T> {
    fn is_authenticated(&self) -> bool {
        (**self).is_authenticated()
    }
}

/// Oracle with a fixed answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticOracle(pub bool);

impl AuthOracle for StaticOracle {
    fn is_authenticated(&self) -> bool {
        self.0
    }
}

/// Authenticated iff the store holds a session that is valid right now.
///
/// Store failures are logged and read as "signed out".
#[derive(Debug)]
pub struct SessionOracle<S> {
    store: S,
}

impl<S: SessionStore> SessionOracle<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: SessionStore> AuthOracle for SessionOracle<S> {
    fn is_authenticated(&self) -> bool {
        match self.store.load() {
            Ok(Some(session)) => session.is_valid_at(Utc::now()),
            Ok(None) => false,
            Err(err) => {
                tracing::warn!("failed to load session: {err}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use crate::store::MemorySessionStore;
    use chrono::Duration;

    #[test]
    fn session_oracle_follows_store_contents() {
        let oracle = SessionOracle::new(MemorySessionStore::new());
        assert!(!oracle.is_authenticated());

        oracle
            .store()
            .save(&Session::new("tok", Utc::now() - Duration::seconds(5)))
            .unwrap();
        assert!(oracle.is_authenticated());

        oracle.store().clear().unwrap();
        assert!(!oracle.is_authenticated());
    }

    #[test]
    fn expired_session_is_not_authenticated() {
        let issued = Utc::now() - Duration::hours(2);
        let store = MemorySessionStore::with_session(
            Session::new("tok", issued).with_expiry(issued + Duration::hours(1)),
        );
        assert!(!SessionOracle::new(store).is_authenticated());
    }

    #[tokio::test]
    async fn sync_oracles_resolve_immediately_when_awaited() {
        assert!(StaticOracle(true).check_authenticated().await);
        assert!(!Arc::new(StaticOracle(false)).check_authenticated().await);
    }
}
