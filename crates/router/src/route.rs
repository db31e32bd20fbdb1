//! Route descriptors and matched chains.

use serde::{Deserialize, Serialize};

/// Metadata annotations carried by a route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMeta {
    /// Navigation into this route (or any route nested under it) needs a
    /// signed-in user.
    #[serde(default)]
    pub requires_auth: bool,
}

/// One node of the page hierarchy, as declared by the application.
///
/// A child path starting with `/` is absolute; anything else is joined onto
/// the parent's path, and an empty child path matches the parent's path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: String,
    pub name: Option<String>,
    pub meta: RouteMeta,
    pub children: Vec<RouteDescriptor>,
}

impl RouteDescriptor {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: None,
            meta: RouteMeta::default(),
            children: Vec::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn requires_auth(mut self) -> Self {
        self.meta.requires_auth = true;
        self
    }

    pub fn with_children(mut self, children: Vec<RouteDescriptor>) -> Self {
        self.children = children;
        self
    }
}

/// A descriptor resolved against its ancestors: full path, no children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub path: String,
    pub name: Option<String>,
    pub meta: RouteMeta,
}

/// The records a navigation target matched, ordered root to leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteChain {
    records: Vec<RouteRecord>,
}

impl RouteChain {
    pub fn new(records: Vec<RouteRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[RouteRecord] {
        &self.records
    }

    pub fn leaf(&self) -> Option<&RouteRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn requires_auth(&self) -> bool {
        crate::guard::requires_auth(&self.records)
    }
}

impl<'a> IntoIterator for &'a RouteChain {
    type Item = &'a RouteRecord;
    type IntoIter = std::slice::Iter<'a, RouteRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
