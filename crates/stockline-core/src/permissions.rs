//! # Permission Resolution
//!
//! Answers capability questions (view / create / edit / delete per module)
//! from a user's role set and flat per-module permission records.
//!
//! ## Resolution Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Capability Resolution                                │
//! │                                                                         │
//! │  allows("sales", Edit)                                                  │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  roles contain "ADMIN"? ── yes ──► true  (bypasses everything,          │
//! │        │ no                        including modules with no record)    │
//! │        ▼                                                                │
//! │  record for normalize_module("sales") = "SALES"?                        │
//! │        │ yes                │ no                                        │
//! │        ▼                    ▼                                           │
//! │  record.can_edit           false  (absent module = no access)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lookups never fail: an absent module resolves to all-false capabilities,
//! and [`PermissionSet::empty`] is the fail-closed value installed when the
//! backing fetch fails upstream.
//!
//! Module names are compared case-insensitively. Every comparison site goes
//! through [`normalize_module`] — the one normalization function — so the
//! stored-uppercase server convention and mixed-case UI lookups can never
//! drift apart.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::UserPermission;
use crate::ADMIN_ROLE;

// =============================================================================
// Normalization
// =============================================================================

/// Canonical form of a module name: trimmed, uppercased.
///
/// ## Example
/// ```rust
/// use stockline_core::permissions::normalize_module;
///
/// assert_eq!(normalize_module("sales"), "SALES");
/// assert_eq!(normalize_module("  Inventory "), "INVENTORY");
/// ```
pub fn normalize_module(module: &str) -> String {
    module.trim().to_uppercase()
}

// =============================================================================
// Actions
// =============================================================================

/// The four capability kinds a permission record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
}

// =============================================================================
// Permission Set
// =============================================================================

/// An immutable, resolved view of one user's capabilities.
///
/// Built once from fetched records; replaced wholesale on reload. Holding a
/// `PermissionSet` means holding a consistent point-in-time answer set —
/// there is no partial update path.
#[derive(Debug, Clone, Default)]
pub struct PermissionSet {
    /// True when the role set contains "ADMIN".
    admin: bool,

    /// Records keyed by normalized module name. Duplicate modules in the
    /// source collection resolve last-write-wins, matching server order.
    by_module: HashMap<String, UserPermission>,
}

impl PermissionSet {
    /// Builds a set from a user's roles and permission records.
    pub fn from_records(roles: &[String], records: &[UserPermission]) -> Self {
        let admin = roles.iter().any(|r| r == ADMIN_ROLE);

        let mut by_module = HashMap::with_capacity(records.len());
        for record in records {
            by_module.insert(normalize_module(&record.module), record.clone());
        }

        PermissionSet { admin, by_module }
    }

    /// The fail-closed set: no identity, no roles, no records. Every
    /// capability question answers `false`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True iff the user holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.admin
    }

    /// Answers one capability question.
    ///
    /// Admin short-circuits before the per-module lookup, so admins are
    /// granted capabilities even on modules that have no record at all.
    pub fn allows(&self, module: &str, action: Action) -> bool {
        if self.admin {
            return true;
        }

        match self.by_module.get(&normalize_module(module)) {
            Some(record) => match action {
                Action::View => record.can_view,
                Action::Create => record.can_create,
                Action::Edit => record.can_edit,
                Action::Delete => record.can_delete,
            },
            None => false,
        }
    }

    pub fn can_view(&self, module: &str) -> bool {
        self.allows(module, Action::View)
    }

    pub fn can_create(&self, module: &str) -> bool {
        self.allows(module, Action::Create)
    }

    pub fn can_edit(&self, module: &str) -> bool {
        self.allows(module, Action::Edit)
    }

    pub fn can_delete(&self, module: &str) -> bool {
        self.allows(module, Action::Delete)
    }

    /// Number of module records held (admin flag not included).
    pub fn record_count(&self) -> usize {
        self.by_module.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(module: &str, view: bool, create: bool, edit: bool, delete: bool) -> UserPermission {
        UserPermission {
            module: module.to_string(),
            can_view: view,
            can_create: create,
            can_edit: edit,
            can_delete: delete,
        }
    }

    #[test]
    fn test_admin_bypasses_everything() {
        // Admin with zero records still gets every capability
        let set = PermissionSet::from_records(&["ADMIN".into()], &[]);
        assert!(set.is_admin());
        assert!(set.can_delete("ANYTHING"));
        assert!(set.can_view("SALES"));
        assert!(set.allows("never-heard-of-it", Action::Edit));
    }

    #[test]
    fn test_module_lookup_is_case_insensitive() {
        let set = PermissionSet::from_records(
            &["STOREKEEPER".into()],
            &[record("SALES", true, false, false, false)],
        );
        assert!(!set.is_admin());
        assert!(set.can_view("sales"));
        assert!(set.can_view("Sales"));
        assert!(!set.can_create("SALES"));
        assert!(!set.can_view("PURCHASING")); // absent module
    }

    #[test]
    fn test_mixed_case_server_records_resolve() {
        // Stored module values are uppercase by convention, but the resolver
        // tolerates mixed-case server responses
        let set = PermissionSet::from_records(
            &["STOREKEEPER".into()],
            &[record("Inventory", true, true, false, false)],
        );
        assert!(set.can_view("INVENTORY"));
        assert!(set.can_create("inventory"));
        assert!(!set.can_edit("INVENTORY"));
    }

    #[test]
    fn test_duplicate_modules_last_write_wins() {
        let set = PermissionSet::from_records(
            &[],
            &[
                record("SALES", true, true, true, true),
                record("sales", true, false, false, false),
            ],
        );
        assert!(set.can_view("SALES"));
        assert!(!set.can_delete("SALES"));
        assert_eq!(set.record_count(), 1);
    }

    #[test]
    fn test_empty_set_is_fail_closed() {
        let set = PermissionSet::empty();
        assert!(!set.is_admin());
        assert!(!set.can_view("SALES"));
        assert!(!set.can_delete("SALES"));
    }

    #[test]
    fn test_admin_role_is_exact() {
        // Only the literal role name grants the override
        let set = PermissionSet::from_records(&["admin".into()], &[]);
        assert!(!set.is_admin());
        assert!(!set.can_view("SALES"));
    }
}
