//! Dashboard Component
//!
//! All milestones at a glance plus milestone creation.

use chrono::Timelike;
use leptos::prelude::*;

use milepost_core::{new_id, Milestone};

use crate::context::use_app_context;
use crate::dates;
use crate::store::{store_add_milestone, use_app_store, AppStateStoreFields};

use super::{MilestoneCard, MilestoneForm, SyncIndicator};

#[component]
pub fn Dashboard() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let (creating, set_creating) = signal(false);

    let now = chrono::Local::now();
    let today = dates::today();

    let create = move |goal: milepost_core::Goal| {
        let mut milestone = Milestone::new(
            new_id(),
            goal.title,
            goal.start_date,
            goal.end_date,
            chrono::Utc::now().to_rfc3339(),
        );
        // A fresh id colliding with an existing one would be a bug upstream;
        // regenerate rather than overwrite.
        while store
            .milestones()
            .get_untracked()
            .iter()
            .any(|m| m.id == milestone.id)
        {
            milestone.id = new_id();
        }
        store_add_milestone(&store, milestone);
        ctx.persist(&store);
        set_creating.set(false);
    };

    view! {
        <div class="dashboard">
            <header class="dashboard-header">
                <div>
                    <p class="greeting">{dates::greeting(now.hour())}</p>
                    <h1>{dates::format_today(today)}</h1>
                </div>
                <SyncIndicator/>
            </header>

            <div class="milestone-list">
                <For
                    each=move || store.milestones().get()
                    key=|m| {
                        // Tuple of the fields the card renders so edits re-render it
                        let progress = m.progress();
                        (
                            m.id.clone(),
                            m.title.clone(),
                            m.start_date,
                            m.end_date,
                            progress.completed_items,
                            progress.total_items,
                            m.note_count(),
                        )
                    }
                    children=move |milestone: Milestone| view! { <MilestoneCard milestone/> }
                />
                <Show when=move || store.milestones().get().is_empty()>
                    <p class="empty-hint">"No milestones yet. Create your first one below."</p>
                </Show>
            </div>

            <button class="fab" on:click=move |_| set_creating.set(true)>"+"</button>

            <Show when=move || creating.get()>
                <MilestoneForm
                    heading="New Milestone"
                    on_save=Callback::new(create.clone())
                    on_cancel=Callback::new(move |_| set_creating.set(false))
                />
            </Show>
        </div>
    }
}
