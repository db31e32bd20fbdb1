//! Global navigation guard.

use assetdesk_auth::{AsyncAuthOracle, AuthOracle};

use crate::route::{RouteChain, RouteRecord};

/// Outcome of guarding one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Let the transition proceed unchanged.
    Allow,
    /// Cancel the transition and start a fresh navigation to `to`.
    Redirect { to: String },
}

/// A navigation requires auth iff any record in its matched chain does.
pub fn requires_auth<'a>(chain: impl IntoIterator<Item = &'a RouteRecord>) -> bool {
    chain.into_iter().any(|record| record.meta.requires_auth)
}

/// Redirects unauthenticated users away from protected routes.
///
/// - One oracle query per attempt
/// - No other side effects
/// - Never guards its own redirect: that is a new navigation
#[derive(Debug, Clone)]
pub struct NavigationGuard {
    login_path: String,
}

impl NavigationGuard {
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn check<O>(&self, from: Option<&str>, to: &RouteChain, oracle: &O) -> GuardDecision
    where
        O: AuthOracle + ?Sized,
    {
        let authenticated = oracle.is_authenticated();
        self.decide(from, to, authenticated)
    }

    /// Like [`check`](Self::check), but suspends until the oracle resolves.
    pub async fn check_async<O>(&self, from: Option<&str>, to: &RouteChain, oracle: &O) -> GuardDecision
    where
        O: AsyncAuthOracle,
    {
        let authenticated = oracle.check_authenticated().await;
        self.decide(from, to, authenticated)
    }

    fn decide(&self, from: Option<&str>, to: &RouteChain, authenticated: bool) -> GuardDecision {
        let target = to.leaf().map(|r| r.path.as_str()).unwrap_or_default();

        if to.requires_auth() && !authenticated {
            tracing::info!(from, to = target, login = %self.login_path, "navigation requires auth; redirecting");
            return GuardDecision::Redirect {
                to: self.login_path.clone(),
            };
        }

        tracing::debug!(from, to = target, authenticated, "navigation allowed");
        GuardDecision::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::RouteMeta;
    use assetdesk_auth::StaticOracle;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn chain(flags: &[bool]) -> RouteChain {
        RouteChain::new(
            flags
                .iter()
                .enumerate()
                .map(|(i, &requires_auth)| RouteRecord {
                    path: format!("/level{i}"),
                    name: None,
                    meta: RouteMeta { requires_auth },
                })
                .collect(),
        )
    }

    #[derive(Default)]
    struct CountingOracle {
        answer: bool,
        calls: AtomicUsize,
    }

    impl AuthOracle for CountingOracle {
        fn is_authenticated(&self) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer
        }
    }

    #[test]
    fn unauthenticated_user_is_sent_to_login() {
        let guard = NavigationGuard::new("/login");
        let decision = guard.check(Some("/"), &chain(&[true, false]), &StaticOracle(false));
        assert_eq!(
            decision,
            GuardDecision::Redirect {
                to: "/login".to_string()
            }
        );
    }

    #[test]
    fn unannotated_chain_is_always_allowed() {
        let guard = NavigationGuard::new("/login");
        assert_eq!(
            guard.check(None, &chain(&[false, false]), &StaticOracle(false)),
            GuardDecision::Allow
        );
        assert_eq!(guard.check(None, &chain(&[]), &StaticOracle(false)), GuardDecision::Allow);
    }

    #[test]
    fn oracle_is_queried_exactly_once_per_attempt() {
        let guard = NavigationGuard::new("/login");
        let oracle = CountingOracle::default();
        guard.check(None, &chain(&[true]), &oracle);
        guard.check(None, &chain(&[false]), &oracle);
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 2);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: requires_auth is the logical OR of every record's flag.
        #[test]
        fn requires_auth_is_or_over_chain(flags in prop::collection::vec(any::<bool>(), 0..8)) {
            let expected = flags.iter().any(|f| *f);
            prop_assert_eq!(chain(&flags).requires_auth(), expected);
        }

        /// Property: an authenticated user is never redirected.
        #[test]
        fn authenticated_user_is_never_redirected(flags in prop::collection::vec(any::<bool>(), 0..8)) {
            let guard = NavigationGuard::new("/login");
            prop_assert_eq!(guard.check(None, &chain(&flags), &StaticOracle(true)), GuardDecision::Allow);
        }

        /// Property: an anonymous user is redirected iff the chain requires auth.
        #[test]
        fn anonymous_user_redirected_iff_protected(flags in prop::collection::vec(any::<bool>(), 0..8)) {
            let guard = NavigationGuard::new("/login");
            let redirected = matches!(
                guard.check(None, &chain(&flags), &StaticOracle(false)),
                GuardDecision::Redirect { .. }
            );
            prop_assert_eq!(redirected, flags.iter().any(|f| *f));
        }
    }
}
