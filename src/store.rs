//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The store mirrors
//! the persisted snapshot plus transient UI state; every mutation goes
//! through a helper here and is followed by `AppContext::persist`.

use leptos::prelude::*;
use reactive_stores::Store;

use milepost_core::{Milestone, Snapshot, SyncStatus, Task, ViewState};

/// Global application state
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// All milestones, in user display order
    pub milestones: Vec<Milestone>,
    /// Current (and persisted last) view
    pub last_view: ViewState,
    /// Remote sync indicator state
    pub sync_status: SyncStatus,
    /// True until the initial local load has run
    pub loading: bool,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Assemble the persistable document from the store
pub fn store_snapshot(store: &AppStore) -> Snapshot {
    Snapshot {
        milestones: store.milestones().get_untracked(),
        last_view: store.last_view().get_untracked(),
    }
}

/// Replace the working set wholesale (initial load, pull, refresh)
pub fn store_set_snapshot(store: &AppStore, snapshot: Snapshot) {
    let view = snapshot.resolve_view();
    store.milestones().set(snapshot.milestones);
    store.last_view().set(view);
}

/// Remove a milestone from the store by id
pub fn store_remove_milestone(store: &AppStore, milestone_id: &str) {
    store.milestones().write().retain(|m| m.id != milestone_id);
    let falls_back = matches!(
        store.last_view().get_untracked(),
        ViewState::Milestone { milestone_id: ref id } if id == milestone_id
    );
    if falls_back {
        store.last_view().set(ViewState::Dashboard);
    }
}

/// Add a milestone to the store
pub fn store_add_milestone(store: &AppStore, milestone: Milestone) {
    store.milestones().write().push(milestone);
}

/// Navigate, keeping the persisted last view in step
pub fn store_set_view(store: &AppStore, view: ViewState) {
    store.last_view().set(view);
}

/// Apply a closure to one milestone in place; returns whether it was found
pub fn store_update_milestone_with(
    store: &AppStore,
    milestone_id: &str,
    f: impl FnOnce(&mut Milestone),
) -> bool {
    let binding = store.milestones();
    let mut milestones = binding.write();
    match milestones.iter_mut().find(|m| m.id == milestone_id) {
        Some(milestone) => {
            f(milestone);
            true
        }
        None => false,
    }
}

/// Apply a closure to one task in place; returns whether it was found
pub fn store_update_task(
    store: &AppStore,
    milestone_id: &str,
    task_id: &str,
    f: impl FnOnce(&mut Task),
) -> bool {
    store_update_milestone_with(store, milestone_id, |milestone| {
        if let Some(task) = milestone.task_mut(task_id) {
            f(task);
        }
    })
}

/// Read one milestone out of the store (cloned)
pub fn store_milestone(store: &AppStore, milestone_id: &str) -> Option<Milestone> {
    store
        .milestones()
        .get()
        .into_iter()
        .find(|m| m.id == milestone_id)
}
