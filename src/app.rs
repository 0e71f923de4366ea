//! Milepost Frontend App
//!
//! Main application component: initial load, then dashboard or milestone
//! view according to the (persisted) last view.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use milepost_core::ViewState;

use crate::components::{Dashboard, MilestoneView};
use crate::context::AppContext;
use crate::store::{AppState, AppStateStoreFields};
use crate::sync;

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState {
        loading: true,
        ..Default::default()
    });
    provide_context(store);
    provide_context(AppContext::new());

    // Migration + local load + remote reconcile, once at startup.
    spawn_local(sync::initial_load(store));

    view! {
        <div class="app">
            <Show
                when=move || !store.loading().get()
                fallback=|| view! { <div class="loading-screen">"Loading..."</div> }
            >
                {move || match store.last_view().get() {
                    ViewState::Dashboard => view! { <Dashboard/> }.into_any(),
                    ViewState::Milestone { milestone_id } => {
                        view! { <MilestoneView milestone_id=milestone_id.clone()/> }.into_any()
                    }
                }}
            </Show>
        </div>
    }
}
