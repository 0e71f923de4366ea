//! Sync Indicator Component
//!
//! Shows the remote sync state and doubles as the manual refresh button.

use leptos::prelude::*;
use leptos::task::spawn_local;

use milepost_core::SyncStatus;

use crate::store::{use_app_store, AppStateStoreFields};
use crate::sync;

#[component]
pub fn SyncIndicator() -> impl IntoView {
    let store = use_app_store();

    let label = move || match store.sync_status().get() {
        SyncStatus::Synced => "Synced",
        SyncStatus::Syncing => "Syncing...",
        SyncStatus::Offline => "Offline",
        SyncStatus::Error => "Retry",
    };

    let class = move || {
        let status = match store.sync_status().get() {
            SyncStatus::Synced => "synced",
            SyncStatus::Syncing => "syncing",
            SyncStatus::Offline => "offline",
            SyncStatus::Error => "error",
        };
        format!("sync-indicator {}", status)
    };

    view! {
        <button class=class on:click=move |_| spawn_local(sync::manual_refresh(store))>
            {label}
        </button>
    }
}
