//! Milestone Card Component
//!
//! One milestone on the dashboard: derived status, progress, countdown, and
//! the delete cascade.

use leptos::prelude::*;

use milepost_core::{Milestone, MilestoneStatus, ViewState};

use crate::context::use_app_context;
use crate::dates;
use crate::store::{store_remove_milestone, store_set_view, use_app_store};

use super::DeleteConfirmButton;

#[component]
pub fn MilestoneCard(milestone: Milestone) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    let today = dates::today();
    let status = milestone.status_on(today);
    let status_label = match status {
        MilestoneStatus::Upcoming => "Upcoming",
        MilestoneStatus::Active => "Active",
        MilestoneStatus::Complete => "Complete",
    };
    let progress = milestone.progress();
    let days_label = match status {
        MilestoneStatus::Upcoming => {
            format!("starts in {}d", (milestone.start_date - today).num_days())
        }
        MilestoneStatus::Active => format!("{}d left", milestone.days_left(today)),
        MilestoneStatus::Complete => "finished".to_string(),
    };

    let id = milestone.id.clone();
    let id_for_delete = milestone.id.clone();
    let open = move |_| {
        store_set_view(&store, ViewState::milestone(id.clone()));
        ctx.persist(&store);
    };
    let delete = move |_| {
        store_remove_milestone(&store, &id_for_delete);
        ctx.persist_after_delete(&store, &id_for_delete);
    };

    view! {
        <div class="milestone-card" on:click=open>
            <div class="milestone-card-header">
                <h3>{milestone.title.clone()}</h3>
                <span class=format!("status-chip {}", status_label.to_lowercase())>
                    {status_label}
                </span>
                <DeleteConfirmButton button_class="delete-btn" on_confirm=Callback::new(delete)/>
            </div>
            <p class="milestone-card-dates">
                {dates::format_range(milestone.start_date, milestone.end_date)}
                " · "
                {days_label}
            </p>
            <div class="progress-track">
                <div
                    class="progress-fill"
                    style=format!("width: {}%;", progress.percent())
                ></div>
            </div>
            <p class="milestone-card-meta">
                {format!("{}/{} items", progress.completed_items, progress.total_items)}
                {if milestone.note_count() > 0 {
                    format!(" · {} notes", milestone.note_count())
                } else {
                    String::new()
                }}
            </p>
        </div>
    }
}
