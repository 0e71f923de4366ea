//! Application Context
//!
//! Shared signals provided via the Leptos Context API, plus the persistence
//! hook every mutation goes through: write the local cache synchronously,
//! then restart the debounced remote push.

use leptos::prelude::*;

use crate::storage::{LocalStore, STORAGE_NAMESPACE};
use crate::store::{store_snapshot, AppStore};
use crate::sync;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Monotonic counter identifying the latest scheduled push; a debounce
    /// task only fires if it is still the latest when its timer ends
    pub push_seq: RwSignal<u64>,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            push_seq: RwSignal::new(0),
        }
    }

    /// Persist after a mutation: local cache first (synchronously, so a
    /// reload never loses more than the debounce window of remote sync),
    /// then schedule the coalesced push.
    pub fn persist(&self, store: &AppStore) {
        let snapshot = store_snapshot(store);
        if let Some(mut local) = LocalStore::open(STORAGE_NAMESPACE) {
            local.save(&snapshot);
        }
        sync::schedule_push(*self, *store);
    }

    /// Persist plus the delete cascade for one milestone's cached artifacts.
    pub fn persist_after_delete(&self, store: &AppStore, milestone_id: &str) {
        if let Some(mut local) = LocalStore::open(STORAGE_NAMESPACE) {
            local.remove_milestone_artifacts(milestone_id);
        }
        self.persist(store);
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
