//! Reconciling Sync Service
//!
//! Best-effort mirror of the local working set to the remote store.
//!
//! Pull on load: remote data wins on a cold start; a populated local cache
//! seeds an empty remote; with neither, the built-in sample data is used.
//! Push on change: mutations restart a one-second debounce and the whole
//! document goes up in a single write, last writer wins. A failed push
//! leaves the local cache authoritative; the next mutation or a manual
//! refresh retries.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use milepost_core::{seed, SyncStatus};

use crate::api;
use crate::context::AppContext;
use crate::storage::{LocalStore, STORAGE_NAMESPACE};
use crate::store::{store_set_snapshot, store_snapshot, AppStore, AppStateStoreFields};

/// Quiescence window before a push fires
const DEBOUNCE_MS: u32 = 1000;

/// Restart the debounce; when it runs out without a newer mutation, push the
/// whole document once. N rapid mutations collapse into one write.
pub fn schedule_push(ctx: AppContext, store: AppStore) {
    let seq = ctx.push_seq.get_untracked() + 1;
    ctx.push_seq.set(seq);
    spawn_local(async move {
        TimeoutFuture::new(DEBOUNCE_MS).await;
        if ctx.push_seq.get_untracked() != seq {
            // A newer mutation restarted the window.
            return;
        }
        push_now(store).await;
    });
}

/// Push immediately (debounce expiry or explicit flush)
pub async fn push_now(store: AppStore) {
    store.sync_status().set(SyncStatus::Syncing);
    let snapshot = store_snapshot(&store);
    match api::push_tracker(STORAGE_NAMESPACE, &snapshot).await {
        Ok(()) => store.sync_status().set(SyncStatus::Synced),
        Err(e) => {
            web_sys::console::warn_1(&format!("[SYNC] push failed: {}", e).into());
            store.sync_status().set(SyncStatus::Error);
        }
    }
}

/// Initial load: migrate and read the local cache, show it immediately, then
/// reconcile with the remote store in the background.
pub async fn initial_load(store: AppStore) {
    let local_snapshot = match LocalStore::open(STORAGE_NAMESPACE) {
        Some(mut local) => {
            local.migrate();
            local.load()
        }
        None => Default::default(),
    };
    let local_has_data = !local_snapshot.milestones.is_empty();
    store_set_snapshot(&store, local_snapshot);
    store.loading().set(false);

    store.sync_status().set(SyncStatus::Syncing);
    match api::fetch_tracker(STORAGE_NAMESPACE).await {
        Ok(remote) if !remote.milestones.is_empty() => {
            // Cold start: remote wins and is mirrored locally.
            if let Some(mut local) = LocalStore::open(STORAGE_NAMESPACE) {
                local.save(&remote);
            }
            store_set_snapshot(&store, remote);
            store.sync_status().set(SyncStatus::Synced);
        }
        Ok(_) => {
            if !local_has_data {
                // Nothing anywhere: start from the sample data.
                let today = chrono::Local::now().date_naive();
                let seeded = seed::starter_snapshot(today);
                if let Some(mut local) = LocalStore::open(STORAGE_NAMESPACE) {
                    local.save(&seeded);
                }
                store_set_snapshot(&store, seeded);
            }
            // First-run bootstrap: seed the remote from what we have.
            push_now(store).await;
        }
        Err(e) => {
            web_sys::console::warn_1(&format!("[SYNC] pull failed: {}", e).into());
            store.sync_status().set(SyncStatus::Offline);
        }
    }
}

/// Manual refresh from the sync indicator: pull, remote wins, mirror local.
pub async fn manual_refresh(store: AppStore) {
    store.sync_status().set(SyncStatus::Syncing);
    match api::fetch_tracker(STORAGE_NAMESPACE).await {
        Ok(remote) => {
            if let Some(mut local) = LocalStore::open(STORAGE_NAMESPACE) {
                local.save(&remote);
            }
            store_set_snapshot(&store, remote);
            store.sync_status().set(SyncStatus::Synced);
        }
        Err(e) => {
            web_sys::console::warn_1(&format!("[SYNC] refresh failed: {}", e).into());
            store.sync_status().set(SyncStatus::Error);
        }
    }
}
