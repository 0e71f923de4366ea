//! Task List Component
//!
//! The sortable task list of one milestone. Filters (due-today, tags) only
//! narrow what is rendered; a drag commit always applies to the milestone's
//! full task array by id, so a reorder done in a filtered view lands with
//! the adjacency the user saw.

use leptos::prelude::*;

use leptos_sortable::{bind_sortable, create_sort_signals};
use milepost_core::reorder::reorder_by_id;
use milepost_core::Task;

use crate::context::use_app_context;
use crate::dates;
use crate::store::{store_milestone, store_update_milestone_with, use_app_store};

use super::TaskItem;

/// DOM id of the sortable container, matched by the gesture layer
const LIST_ID: &str = "task-list";

#[component]
pub fn TaskList(
    milestone_id: String,
    #[prop(into)] filter_today: Signal<bool>,
    selected_tags: RwSignal<Vec<String>>,
    #[prop(into)] on_open_notes: Callback<String>,
) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let sort = create_sort_signals(LIST_ID);

    let commit_id = milestone_id.clone();
    bind_sortable(sort, move |dragged, target| {
        let mut changed = false;
        store_update_milestone_with(&store, &commit_id, |milestone| {
            changed = reorder_by_id(&mut milestone.tasks, &dragged, &target);
        });
        if changed {
            ctx.persist(&store);
        }
    });

    let list_id = milestone_id.clone();
    let visible = Memo::new(move |_| {
        let today = dates::today();
        let tags = selected_tags.get();
        let only_today = filter_today.get();
        store_milestone(&store, &list_id)
            .map(|milestone| {
                milestone
                    .tasks
                    .into_iter()
                    .filter(|task| !only_today || task.is_due_on(today))
                    .filter(|task| {
                        tags.is_empty()
                            || task.tags.is_empty()
                            || task.tags.iter().any(|tag| tags.contains(tag))
                    })
                    .collect::<Vec<Task>>()
            })
            .unwrap_or_default()
    });

    view! {
        <div class="task-list" id=LIST_ID>
            <For
                each=move || visible.get()
                key=|task| {
                    // Tuple of the mutable fields so edits re-render the row
                    (
                        task.id.clone(),
                        task.title.clone(),
                        task.status,
                        task.due_date,
                        task.tags.clone(),
                        task.subtasks
                            .iter()
                            .map(|s| (s.id.clone(), s.title.clone(), s.status))
                            .collect::<Vec<_>>(),
                        task.notes.len(),
                    )
                }
                children={
                    let milestone_id = milestone_id.clone();
                    move |task: Task| {
                        let row_id = task.id.clone();
                        let style_id = task.id.clone();
                        view! {
                            <div
                                class="task-row"
                                data-sort-id=row_id.clone()
                                class:dragging=move || sort.is_dragging(&row_id)
                                style=move || sort.row_style(&style_id)
                            >
                                <TaskItem
                                    milestone_id=milestone_id.clone()
                                    task=task
                                    sort=sort
                                    on_open_notes=on_open_notes
                                />
                            </div>
                        }
                    }
                }
            />
            <Show when=move || visible.get().is_empty()>
                <p class="empty-hint">
                    {move || {
                        if filter_today.get() || !selected_tags.get().is_empty() {
                            "No tasks match the filters"
                        } else {
                            "No tasks yet"
                        }
                    }}
                </p>
            </Show>
        </div>
    }
}
