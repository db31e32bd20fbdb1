//! The application's route table and path matching.

use crate::route::{RouteChain, RouteDescriptor, RouteRecord};

/// Flattened, lookup-ready page hierarchy.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<(String, RouteChain)>,
    login_path: String,
}

impl RouteTable {
    /// Build a table from declared routes.
    ///
    /// When two declarations resolve to the same path the deeper one wins, so
    /// an empty-path child shadows its parent; otherwise declaration order
    /// decides.
    pub fn new(routes: Vec<RouteDescriptor>, login_path: impl Into<String>) -> Self {
        let mut entries = Vec::new();
        for route in &routes {
            flatten(route, "", &mut Vec::new(), &mut entries);
        }
        Self {
            entries,
            login_path: normalize_path(&login_path.into()),
        }
    }

    /// The AssetDesk page hierarchy: public auth pages plus the protected
    /// dashboard subtree.
    pub fn app() -> Self {
        let page = |path: &str, name: &str| RouteDescriptor::new(path).named(name);

        let routes = vec![
            page("/", "Welcome"),
            page("/login", "Login"),
            page("/register", "Register"),
            RouteDescriptor::new("/dashboard")
                .requires_auth()
                .with_children(vec![
                    page("", "Dashboard"),
                    page("/categories", "Categories"),
                    page("/assets", "Assets"),
                    page("/locations", "Locations"),
                    page("/departments", "Departments"),
                    page("/assignments", "Assignments"),
                    page("/licences", "Licences"),
                    page("/users", "Users"),
                    page("/assetTypes", "Asset Types"),
                    page("/depreciation", "Depreciation"),
                    page("/audit-logs", "Audit Logs"),
                    page("/notifications", "Notifications"),
                ]),
        ];

        Self::new(routes, "/login")
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Match `path` to its chain of records, root first.
    pub fn resolve(&self, path: &str) -> Option<&RouteChain> {
        let path = normalize_path(path);
        self.entries
            .iter()
            .find(|(p, _)| *p == path)
            .map(|(_, chain)| chain)
    }

    /// Every matchable path, in lookup order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(p, _)| p.as_str())
    }
}

fn flatten(
    route: &RouteDescriptor,
    parent_path: &str,
    ancestors: &mut Vec<RouteRecord>,
    out: &mut Vec<(String, RouteChain)>,
) {
    let full_path = join_path(parent_path, &route.path);
    ancestors.push(RouteRecord {
        path: full_path.clone(),
        name: route.name.clone(),
        meta: route.meta,
    });

    // Children first so they shadow the parent on a shared path.
    for child in &route.children {
        flatten(child, &full_path, ancestors, out);
    }

    if !out.iter().any(|(p, _)| *p == full_path) {
        out.push((full_path, RouteChain::new(ancestors.clone())));
    }
    ancestors.pop();
}

fn join_path(parent: &str, child: &str) -> String {
    if child.starts_with('/') {
        normalize_path(child)
    } else if child.is_empty() {
        normalize_path(parent)
    } else {
        normalize_path(&format!("{}/{}", parent.trim_end_matches('/'), child))
    }
}

/// Canonical form of a navigation target: leading slash, no trailing slash
/// (except the root), query string and fragment dropped.
pub fn normalize_path(path: &str) -> String {
    let path = path.trim();
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_paths() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("assets/"), "/assets");
        assert_eq!(normalize_path(" /assets?page=2#top "), "/assets");
    }

    #[test]
    fn public_pages_match_single_records() {
        let table = RouteTable::app();
        for path in ["/", "/login", "/register"] {
            let chain = table.resolve(path).unwrap();
            assert_eq!(chain.len(), 1, "{path}");
            assert!(!chain.requires_auth(), "{path}");
        }
    }

    #[test]
    fn dashboard_pages_nest_under_protected_root() {
        let table = RouteTable::app();
        for path in [
            "/dashboard",
            "/categories",
            "/assets",
            "/locations",
            "/departments",
            "/assignments",
            "/licences",
            "/users",
            "/assetTypes",
            "/depreciation",
            "/audit-logs",
            "/notifications",
        ] {
            let chain = table.resolve(path).unwrap();
            assert_eq!(chain.len(), 2, "{path}");
            assert_eq!(chain.records()[0].path, "/dashboard");
            assert!(chain.records()[0].meta.requires_auth);
            assert!(!chain.leaf().unwrap().meta.requires_auth);
            assert!(chain.requires_auth(), "{path}");
        }
    }

    #[test]
    fn empty_child_shadows_parent() {
        let table = RouteTable::app();
        let chain = table.resolve("/dashboard/").unwrap();
        assert_eq!(chain.leaf().unwrap().name.as_deref(), Some("Dashboard"));
        assert_eq!(table.paths().filter(|p| *p == "/dashboard").count(), 1);
    }

    #[test]
    fn relative_children_join_parent_path() {
        let table = RouteTable::new(
            vec![RouteDescriptor::new("/settings/").with_children(vec![
                RouteDescriptor::new("profile").named("Profile"),
            ])],
            "login",
        );
        let chain = table.resolve("/settings/profile").unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(table.login_path(), "/login");
        assert!(table.resolve("/profile").is_none());
    }

    #[test]
    fn unknown_paths_do_not_match() {
        assert!(RouteTable::app().resolve("/reports").is_none());
    }
}
