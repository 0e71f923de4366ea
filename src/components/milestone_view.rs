//! Milestone View Component
//!
//! One milestone's working screen: header with greeting and progress, the
//! filter row, the sortable task list, journal, settings, and the
//! reflection card once the milestone's derived status is complete.
//!
//! Only the header and filter counts re-render on data changes; the task
//! list, panels, and modals are instantiated once per visit so their local
//! state (and the sortable bindings) survive edits.

use chrono::Timelike;
use leptos::prelude::*;

use milepost_core::{MilestoneStatus, ViewState};

use crate::context::use_app_context;
use crate::dates;
use crate::store::{store_milestone, store_set_view, store_update_milestone_with, use_app_store};

use super::{
    AddPanel, JournalView, MilestoneForm, NotesModal, SummaryCard, SyncIndicator, TagFilterModal,
    TaskList,
};

#[component]
pub fn MilestoneView(milestone_id: String) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    let filter_today = RwSignal::new(false);
    let selected_tags = RwSignal::new(Vec::<String>::new());
    let tag_modal_open = RwSignal::new(false);
    let add_open = RwSignal::new(false);
    let add_tab = RwSignal::new("task");
    let show_journal = RwSignal::new(false);
    let show_settings = RwSignal::new(false);
    let notes_task = RwSignal::new(None::<String>);

    let lookup_id = milestone_id.clone();
    let milestone = Memo::new(move |_| store_milestone(&store, &lookup_id));

    let today = dates::today();
    let now = chrono::Local::now();

    let is_complete = Memo::new(move |_| {
        milestone
            .get()
            .map(|m| m.status_on(today) == MilestoneStatus::Complete)
            .unwrap_or(false)
    });
    let note_count = Memo::new(move |_| milestone.get().map(|m| m.note_count()).unwrap_or(0));
    let due_today = Memo::new(move |_| {
        milestone
            .get()
            .map(|m| {
                m.tasks
                    .iter()
                    .filter(|t| t.is_due_on(today) && !t.status.is_complete())
                    .count()
            })
            .unwrap_or(0)
    });
    let all_tags = Signal::derive(move || {
        milestone.get().map(|m| m.all_tags()).unwrap_or_default()
    });

    let back = move |_| {
        store_set_view(&store, ViewState::Dashboard);
        ctx.persist(&store);
    };

    let settings_id = milestone_id.clone();
    let save_settings = move |goal: milepost_core::Goal| {
        // Title/date edits never cascade into tasks or notes.
        store_update_milestone_with(&store, &settings_id, |m| {
            m.title = goal.title;
            m.start_date = goal.start_date;
            m.end_date = goal.end_date;
        });
        ctx.persist(&store);
        show_settings.set(false);
    };

    let summary_id = milestone_id.clone();
    let list_id = milestone_id.clone();
    let notes_id = milestone_id.clone();
    let panel_id = milestone_id.clone();
    let journal_id = milestone_id.clone();

    view! {
        <div class="milestone-view" class:milestone-complete=move || is_complete.get()>
            <Show when=move || show_journal.get()>
                <JournalView
                    milestone_id=journal_id.clone()
                    on_close=Callback::new(move |_| show_journal.set(false))
                />
            </Show>

            <header class="milestone-header">
                <div class="header-row">
                    <button class="back-btn" on:click=back>"‹"</button>
                    <p class="greeting">
                        {move || {
                            if is_complete.get() {
                                "Milestone complete".to_string()
                            } else {
                                dates::greeting(now.hour()).to_string()
                            }
                        }}
                    </p>
                    <SyncIndicator/>
                </div>
                {move || {
                    let Some(m) = milestone.get() else {
                        return view! {
                            <div class="empty-hint">"This milestone no longer exists."</div>
                        }
                        .into_any();
                    };
                    let status = m.status_on(today);
                    let progress = m.progress();
                    let days_label = match status {
                        MilestoneStatus::Upcoming => {
                            format!("starts in {}d", (m.start_date - today).num_days())
                        }
                        MilestoneStatus::Active => format!("{}d left", m.days_left(today)),
                        MilestoneStatus::Complete => "Finished!".to_string(),
                    };
                    let complete = status == MilestoneStatus::Complete;
                    view! {
                        <h1>
                            {if complete { m.title.clone() } else { dates::format_today(today) }}
                        </h1>
                        <p class="header-sub">
                            {format!(
                                "{} · {} · {}",
                                m.title,
                                dates::format_range(m.start_date, m.end_date),
                                days_label,
                            )}
                        </p>
                        <div class="progress-row">
                            <span>{if complete { "Final Progress" } else { "Overall Progress" }}</span>
                            <span>
                                {format!("{}/{}", progress.completed_items, progress.total_items)}
                            </span>
                        </div>
                        <div class="progress-track">
                            <div
                                class="progress-fill"
                                style=format!("width: {}%;", progress.percent())
                            ></div>
                        </div>
                    }
                    .into_any()
                }}
                <div class="header-actions">
                    <button class="journal-btn" on:click=move |_| show_journal.set(true)>
                        "Journal"
                        <Show when=move || (note_count.get() > 0)>
                            <span class="badge">
                                {move || {
                                    let count = note_count.get();
                                    if count > 9 { "9+".to_string() } else { count.to_string() }
                                }}
                            </span>
                        </Show>
                    </button>
                    <button on:click=move |_| show_settings.set(true)>"Settings"</button>
                </div>
            </header>

            <Show when=move || is_complete.get()>
                <SummaryCard milestone_id=summary_id.clone()/>
            </Show>

            <div class="filter-row">
                <button
                    class=move || {
                        if !filter_today.get() { "filter-chip active" } else { "filter-chip" }
                    }
                    on:click=move |_| filter_today.set(false)
                >
                    "All"
                </button>
                <Show when=move || !is_complete.get()>
                    <button
                        class=move || {
                            if filter_today.get() { "filter-chip active" } else { "filter-chip" }
                        }
                        on:click=move |_| filter_today.set(true)
                    >
                        "Today"
                        <Show when=move || (due_today.get() > 0)>
                            <span class="badge">{move || due_today.get()}</span>
                        </Show>
                    </button>
                </Show>
                <button
                    class=move || {
                        if selected_tags.get().is_empty() {
                            "filter-chip"
                        } else {
                            "filter-chip active"
                        }
                    }
                    on:click=move |_| tag_modal_open.set(true)
                >
                    "Tags"
                    <Show when=move || !selected_tags.get().is_empty()>
                        <span class="badge">{move || selected_tags.get().len()}</span>
                    </Show>
                </button>
            </div>

            <TaskList
                milestone_id=list_id
                filter_today=filter_today
                selected_tags=selected_tags
                on_open_notes=Callback::new(move |task_id| notes_task.set(Some(task_id)))
            />

            <button
                class="fab"
                on:click=move |_| {
                    add_tab.set("task");
                    add_open.set(true);
                }
            >
                "+"
            </button>

            <AddPanel milestone_id=panel_id open=add_open default_tab=add_tab/>
            <NotesModal milestone_id=notes_id task_id=notes_task/>
            <TagFilterModal open=tag_modal_open selected=selected_tags all_tags=all_tags/>
            <Show when=move || show_settings.get()>
                {
                    let save_settings = save_settings.clone();
                    move || {
                        let initial = milestone.get_untracked().map(|m| m.goal());
                        view! {
                            <MilestoneForm
                                heading="Milestone Settings"
                                initial=initial
                                on_save=Callback::new({
                                    let save_settings = save_settings.clone();
                                    move |goal| save_settings(goal)
                                })
                                on_cancel=Callback::new(move |_| show_settings.set(false))
                            />
                        }
                    }
                }
            </Show>
        </div>
    }
}
