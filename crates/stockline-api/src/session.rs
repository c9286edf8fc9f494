//! # Session Store
//!
//! The one piece of mutable shared state in the system: the current user
//! and their resolved permission set.
//!
//! ## Snapshot Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Session Snapshot Lifecycle                          │
//! │                                                                         │
//! │   new() ──► Arc<SessionSnapshot::empty>                                 │
//! │                 │                                                       │
//! │   load()/reload()                                                       │
//! │                 │  fetch me() + myPermissions()                         │
//! │                 │                                                       │
//! │        ┌────────┴─────────┐                                             │
//! │        ▼ success          ▼ any failure                                 │
//! │   new snapshot        EMPTY snapshot (fail-closed:                      │
//! │   swapped in          no identity, no permissions)                      │
//! │                                                                         │
//! │   Readers take an Arc clone and keep a CONSISTENT view: a reload        │
//! │   in flight never exposes a half-updated state. The swap is             │
//! │   wholesale — there is no incremental merge path.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fail-Closed Policy
//! A failed identity or permission fetch installs the empty snapshot and
//! logs a warning; it never propagates the error. Capability checks then
//! answer `false` across the board. This is a named, deliberate policy —
//! tests assert on it — not an accidental catch-and-ignore.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use stockline_core::permissions::{Action, PermissionSet};
use stockline_core::types::CurrentUser;

use crate::client::Fetch;
use crate::error::ApiResult;
use crate::queries;

// =============================================================================
// Snapshot
// =============================================================================

/// Point-in-time view of the session: who is logged in and what they may do.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    /// The authenticated user, if any.
    pub user: Option<CurrentUser>,

    /// Resolved capability set. [`PermissionSet::empty`] when anonymous.
    pub permissions: PermissionSet,
}

impl SessionSnapshot {
    /// The fail-closed snapshot: no identity, no permissions.
    pub fn empty() -> Self {
        Self::default()
    }
}

// =============================================================================
// Store
// =============================================================================

/// Holds the current session snapshot and replaces it wholesale on
/// (re)load.
///
/// Single-writer, many-reader: readers clone the inner `Arc` under a read
/// lock and are never blocked by an in-flight load — they simply observe
/// the pre-load snapshot until the swap lands.
pub struct SessionStore {
    fetch: Arc<dyn Fetch>,
    current: RwLock<Arc<SessionSnapshot>>,
}

impl SessionStore {
    /// Creates a store with the empty (anonymous, fail-closed) snapshot.
    pub fn new(fetch: Arc<dyn Fetch>) -> Self {
        SessionStore {
            fetch,
            current: RwLock::new(Arc::new(SessionSnapshot::empty())),
        }
    }

    /// Fetches identity and permissions, then swaps the snapshot in
    /// atomically. On any fetch failure the EMPTY snapshot is installed
    /// instead (fail-closed) and no error propagates.
    pub async fn load(&self) {
        let snapshot = match self.fetch_snapshot().await {
            Ok(snapshot) => {
                debug!(
                    user = snapshot.user.as_ref().map(|u| u.name.as_str()).unwrap_or("<anonymous>"),
                    records = snapshot.permissions.record_count(),
                    "Session loaded"
                );
                snapshot
            }
            Err(e) => {
                warn!(error = %e, "Session load failed - falling back to no identity, no permissions");
                SessionSnapshot::empty()
            }
        };

        *self.current.write().await = Arc::new(snapshot);
    }

    /// Re-fetches both records and fully replaces the prior values. Same
    /// semantics as [`SessionStore::load`]; the name marks intent at call
    /// sites.
    pub async fn reload(&self) {
        self.load().await;
    }

    /// Both fetches must succeed for a usable snapshot; they run
    /// concurrently since neither depends on the other.
    async fn fetch_snapshot(&self) -> ApiResult<SessionSnapshot> {
        let (user, records) = tokio::join!(
            queries::me(self.fetch.as_ref()),
            queries::my_permissions(self.fetch.as_ref()),
        );
        let user = user?;
        let records = records?;

        let roles: &[String] = user.as_ref().map(|u| u.roles.as_slice()).unwrap_or(&[]);
        let permissions = PermissionSet::from_records(roles, &records);

        Ok(SessionSnapshot { user, permissions })
    }

    /// Returns the current snapshot. Cheap (`Arc` clone); the returned view
    /// stays internally consistent even if a reload lands afterwards.
    pub async fn snapshot(&self) -> Arc<SessionSnapshot> {
        self.current.read().await.clone()
    }

    // =========================================================================
    // Capability Shortcuts
    // =========================================================================

    pub async fn is_admin(&self) -> bool {
        self.snapshot().await.permissions.is_admin()
    }

    pub async fn allows(&self, module: &str, action: Action) -> bool {
        self.snapshot().await.permissions.allows(module, action)
    }

    pub async fn can_view(&self, module: &str) -> bool {
        self.allows(module, Action::View).await
    }

    pub async fn can_create(&self, module: &str) -> bool {
        self.allows(module, Action::Create).await
    }

    pub async fn can_edit(&self, module: &str) -> bool {
        self.allows(module, Action::Edit).await
    }

    pub async fn can_delete(&self, module: &str) -> bool {
        self.allows(module, Action::Delete).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use crate::error::ApiError;
    use crate::queries::ME_QUERY;

    /// Fake session backend: switchable identity/permission payloads and a
    /// failure toggle.
    struct FakeBackend {
        failing: AtomicBool,
        me: Mutex<Value>,
        permissions: Mutex<Value>,
    }

    impl FakeBackend {
        fn new(me: Value, permissions: Value) -> Self {
            FakeBackend {
                failing: AtomicBool::new(false),
                me: Mutex::new(me),
                permissions: Mutex::new(permissions),
            }
        }
    }

    #[async_trait]
    impl Fetch for FakeBackend {
        async fn fetch(&self, query: &str, _variables: Value) -> ApiResult<Value> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(ApiError::Transport("connection refused".into()));
            }
            if query == ME_QUERY {
                Ok(json!({ "me": self.me.lock().unwrap().clone() }))
            } else {
                Ok(json!({ "myPermissions": self.permissions.lock().unwrap().clone() }))
            }
        }
    }

    fn storekeeper() -> Value {
        json!({
            "id": "u1",
            "name": "Asha",
            "email": "asha@example.com",
            "roles": ["STOREKEEPER"]
        })
    }

    fn sales_view_only() -> Value {
        json!([{
            "module": "SALES",
            "canView": true,
            "canCreate": false,
            "canEdit": false,
            "canDelete": false
        }])
    }

    #[tokio::test]
    async fn test_unloaded_store_is_fail_closed() {
        let backend = Arc::new(FakeBackend::new(storekeeper(), sales_view_only()));
        let store = SessionStore::new(backend);

        assert!(!store.is_admin().await);
        assert!(!store.can_view("SALES").await);
    }

    #[tokio::test]
    async fn test_load_resolves_capabilities() {
        let backend = Arc::new(FakeBackend::new(storekeeper(), sales_view_only()));
        let store = SessionStore::new(backend);
        store.load().await;

        assert!(!store.is_admin().await);
        assert!(store.can_view("sales").await); // case-insensitive
        assert!(!store.can_create("SALES").await);
        assert!(!store.can_view("PURCHASING").await); // absent module
    }

    #[tokio::test]
    async fn test_admin_needs_no_records() {
        let admin = json!({
            "id": "u2",
            "name": "Root",
            "email": "root@example.com",
            "roles": ["ADMIN"]
        });
        let backend = Arc::new(FakeBackend::new(admin, json!([])));
        let store = SessionStore::new(backend);
        store.load().await;

        assert!(store.is_admin().await);
        assert!(store.can_delete("ANYTHING").await);
    }

    #[tokio::test]
    async fn test_failed_load_installs_empty_snapshot() {
        let backend = Arc::new(FakeBackend::new(storekeeper(), sales_view_only()));
        let store = SessionStore::new(backend.clone());
        store.load().await;
        assert!(store.can_view("SALES").await);

        // Backend goes down; reload must fail CLOSED, not keep stale grants
        backend.failing.store(true, Ordering::SeqCst);
        store.reload().await;

        assert!(!store.can_view("SALES").await);
        assert!(store.snapshot().await.user.is_none());
    }

    #[tokio::test]
    async fn test_readers_keep_consistent_pre_reload_view() {
        let backend = Arc::new(FakeBackend::new(storekeeper(), sales_view_only()));
        let store = SessionStore::new(backend.clone());
        store.load().await;

        let before = store.snapshot().await;

        // Server revokes the view grant; reload swaps wholesale
        *backend.permissions.lock().unwrap() = json!([{
            "module": "SALES",
            "canView": false,
            "canCreate": false,
            "canEdit": false,
            "canDelete": false
        }]);
        store.reload().await;

        // The held snapshot still answers from its own point in time
        assert!(before.permissions.can_view("SALES"));
        // New readers see the replacement
        assert!(!store.can_view("SALES").await);
    }
}
