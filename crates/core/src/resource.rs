//! Catalogue of REST collections exposed by the AssetDesk backend.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A REST collection on the backend.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Assets,
    AssetTypes,
    Categories,
    Departments,
    DepreciationMethods,
    Licenses,
    Locations,
    Maintenance,
    NotificationSchedules,
    Users,
    AuditLogs,
}

/// An operation a caller can request against a [`Resource`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    List,
    Create,
    Read,
    Update,
    Delete,
    /// Undo a soft delete (assets only).
    Restore,
    /// Fetch the computed depreciation schedule (assets only).
    Depreciation,
    /// Extend a license to a new renewal date (licenses only).
    Renew,
}

impl Resource {
    pub const ALL: [Resource; 11] = [
        Resource::Assets,
        Resource::AssetTypes,
        Resource::Categories,
        Resource::Departments,
        Resource::DepreciationMethods,
        Resource::Licenses,
        Resource::Locations,
        Resource::Maintenance,
        Resource::NotificationSchedules,
        Resource::Users,
        Resource::AuditLogs,
    ];

    /// Collection path relative to the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Assets => "/assets",
            Resource::AssetTypes => "/types",
            Resource::Categories => "/categories",
            Resource::Departments => "/departments",
            Resource::DepreciationMethods => "/depreciation-methods",
            Resource::Licenses => "/licenses",
            Resource::Locations => "/locations",
            Resource::Maintenance => "/maintenance",
            Resource::NotificationSchedules => "/notification-schedules",
            Resource::Users => "/users",
            Resource::AuditLogs => "/audit-logs",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Assets => "assets",
            Resource::AssetTypes => "asset_types",
            Resource::Categories => "categories",
            Resource::Departments => "departments",
            Resource::DepreciationMethods => "depreciation_methods",
            Resource::Licenses => "licenses",
            Resource::Locations => "locations",
            Resource::Maintenance => "maintenance",
            Resource::NotificationSchedules => "notification_schedules",
            Resource::Users => "users",
            Resource::AuditLogs => "audit_logs",
        }
    }

    /// Whether the backend accepts `op` on this collection.
    ///
    /// Audit logs are append-only from the client's point of view: they can
    /// be listed, read and purged, never written.
    pub fn supports(&self, op: Operation) -> bool {
        match op {
            Operation::List | Operation::Read | Operation::Delete => true,
            Operation::Create | Operation::Update => !matches!(self, Resource::AuditLogs),
            Operation::Restore | Operation::Depreciation => matches!(self, Resource::Assets),
            Operation::Renew => matches!(self, Resource::Licenses),
        }
    }
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Restore => "restore",
            Operation::Depreciation => "depreciation",
            Operation::Renew => "renew",
        }
    }
}

impl core::fmt::Display for Resource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = CoreError;

    /// Accepts either the snake_case name or the collection path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Resource::ALL
            .into_iter()
            .find(|r| r.as_str() == needle || r.path() == needle)
            .ok_or_else(|| CoreError::unknown_resource(needle))
    }
}
