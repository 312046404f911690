//! Admin session holder.
//!
//! The session is an immutable value. Login and refresh swap in a new one,
//! logout clears it, and readers get an `Arc` to whatever was current when
//! they asked. Nothing ever edits a session in place.

use std::sync::{Arc, RwLock};

use staffdir_core::permissions::PermissionSnapshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    pub email: String,
    /// Token attached to every remote call made under this session.
    pub token: String,
    pub permissions: PermissionSnapshot,
}

#[derive(Debug, Default)]
pub struct SessionStore {
    current: RwLock<Option<Arc<AdminSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Arc<AdminSession>> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    /// Replaces the session wholesale and returns the new one.
    pub fn replace(&self, session: AdminSession) -> Arc<AdminSession> {
        let session = Arc::new(session);
        *self.slot() = Some(Arc::clone(&session));
        session
    }

    /// Drops the session; returns the one that was active, if any.
    pub fn clear(&self) -> Option<Arc<AdminSession>> {
        self.slot().take()
    }

    fn slot(&self) -> std::sync::RwLockWriteGuard<'_, Option<Arc<AdminSession>>> {
        match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use staffdir_core::permissions::{Capability, has_capability};

    fn session(token: &str, permissions: PermissionSnapshot) -> AdminSession {
        AdminSession {
            email: "ops@example.com".to_string(),
            token: token.to_string(),
            permissions,
        }
    }

    #[test]
    fn test_starts_empty() {
        let store = SessionStore::new();
        assert!(store.current().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_replace_is_wholesale() {
        let store = SessionStore::new();
        let first = store.replace(session("t1", PermissionSnapshot::super_admin()));
        let held = store.current().unwrap();

        store.replace(session("t2", PermissionSnapshot::default()));

        // A reader holding the old session still sees the old snapshot.
        assert!(has_capability(Some(&held.permissions), Capability::ManageAdmins));
        assert_eq!(first.token, "t1");

        let now = store.current().unwrap();
        assert_eq!(now.token, "t2");
        assert!(!has_capability(Some(&now.permissions), Capability::ManageAdmins));
    }

    #[test]
    fn test_clear() {
        let store = SessionStore::new();
        store.replace(session("t1", PermissionSnapshot::default()));
        assert_eq!(store.clear().unwrap().token, "t1");
        assert!(store.clear().is_none());
        assert!(!store.is_authenticated());
    }
}
