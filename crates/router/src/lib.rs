//! `assetdesk-router`: page hierarchy, navigation guard and navigator.
//!
//! The guard is a pure decision over a matched route chain and an auth
//! oracle's answer; the navigator owns the current location and applies
//! those decisions.

pub mod guard;
pub mod navigator;
pub mod route;
pub mod table;

pub use guard::{GuardDecision, NavigationGuard, requires_auth};
pub use navigator::{Location, Navigation, NavigationError, Navigator, MAX_REDIRECTS};
pub use route::{RouteChain, RouteDescriptor, RouteMeta, RouteRecord};
pub use table::{RouteTable, normalize_path};
