//! Local Persistent Cache
//!
//! Browser localStorage holds the authoritative on-device copy: the full
//! snapshot plus one cached reflection text per milestone. Keys are
//! namespaced; the schema migration runs against this same store through
//! the `KeyStore` trait.

use milepost_core::migrate::{self, keys, KeyStore, MigrationOutcome};
use milepost_core::Snapshot;

/// Storage namespace for this deployment; passed explicitly from the entry
/// point into every storage and sync call.
pub const STORAGE_NAMESPACE: &str = "default";

#[derive(Clone)]
pub struct LocalStore {
    namespace: String,
    storage: web_sys::Storage,
}

impl LocalStore {
    /// `None` only when the browser exposes no localStorage at all; callers
    /// then run memory-only for the session.
    pub fn open(namespace: &str) -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self {
            namespace: namespace.to_string(),
            storage,
        })
    }

    /// One-time idempotent schema upgrade; safe to call on every load.
    pub fn migrate(&mut self) -> MigrationOutcome {
        let namespace = self.namespace.clone();
        migrate::migrate(self, &namespace)
    }

    pub fn load(&self) -> Snapshot {
        migrate::load_snapshot(self, &self.namespace)
    }

    pub fn save(&mut self, snapshot: &Snapshot) {
        let namespace = self.namespace.clone();
        migrate::save_snapshot(self, &namespace, snapshot);
    }

    pub fn cached_summary(&self, milestone_id: &str) -> Option<String> {
        self.get(&keys::summary(&self.namespace, milestone_id))
    }

    pub fn store_summary(&mut self, milestone_id: &str, text: &str) {
        let key = keys::summary(&self.namespace, milestone_id);
        self.set(&key, text);
    }

    /// Part of the milestone-delete cascade: the snapshot entry goes through
    /// `Snapshot::delete_milestone`, this removes the cached artifacts.
    pub fn remove_milestone_artifacts(&mut self, milestone_id: &str) {
        let namespace = self.namespace.clone();
        migrate::remove_milestone_artifacts(self, &namespace, milestone_id);
    }
}

impl KeyStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        // Quota errors are swallowed: the in-memory state stays correct and
        // the next save retries.
        let _ = self.storage.set_item(key, value);
    }

    fn remove(&mut self, key: &str) {
        let _ = self.storage.remove_item(key);
    }
}
