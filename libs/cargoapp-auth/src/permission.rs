//! Permission records and the visibility gate.

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A permission row as served by the role profile endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRecord {
    pub id: i64,
    pub permission_name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Anything that names a permission: bare strings or full records.
pub trait PermissionName {
    fn permission_name(&self) -> &str;
}

impl PermissionName for str {
    fn permission_name(&self) -> &str {
        self
    }
}

impl PermissionName for &str {
    fn permission_name(&self) -> &str {
        self
    }
}

impl PermissionName for String {
    fn permission_name(&self) -> &str {
        self
    }
}

impl PermissionName for PermissionRecord {
    fn permission_name(&self) -> &str {
        &self.permission_name
    }
}

/// Case-insensitive exact match of `needle` against the granted entries.
///
/// An empty needle or empty grant list never matches. Pure, no I/O.
pub fn has_permission<P: PermissionName>(entries: &[P], needle: &str) -> bool {
    let needle = needle.trim();
    if needle.is_empty() {
        return false;
    }
    let needle = needle.to_lowercase();
    entries
        .iter()
        .any(|p| p.permission_name().trim().to_lowercase() == needle)
}

/// The signed-in user's granted permissions, replaced wholesale on role
/// resolution and cleared on sign-out.
pub struct PermissionStore {
    entries: ArcSwap<Vec<PermissionRecord>>,
}

impl PermissionStore {
    pub fn new() -> Self {
        Self {
            entries: ArcSwap::from_pointee(Vec::new()),
        }
    }

    pub fn replace(&self, entries: Vec<PermissionRecord>) {
        self.entries.store(Arc::new(entries));
    }

    pub fn clear(&self) {
        self.entries.store(Arc::new(Vec::new()));
    }

    pub fn snapshot(&self) -> Arc<Vec<PermissionRecord>> {
        self.entries.load_full()
    }

    pub fn allows(&self, needle: &str) -> bool {
        has_permission(self.entries.load().as_slice(), needle)
    }
}

impl Default for PermissionStore {
    fn default() -> Self {
        Self::new()
    }
}
