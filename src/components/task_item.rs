//! Task Item Component
//!
//! One task card: status toggles, inline editing (title, due date, tags,
//! new subtasks), subtask checklist, note badge, and the drag handle that
//! hands the row to the sortable layer.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use leptos_sortable::{make_on_handle_mousedown, make_on_handle_touchstart, SortSignals};
use milepost_core::{new_id, Subtask, Task, TaskStatus};

use crate::context::use_app_context;
use crate::dates;
use crate::store::{store_milestone, store_update_task, use_app_store};

use super::{StatusButton, TagEditor};

fn input_value(ev: &web_sys::Event) -> String {
    ev.target()
        .and_then(|t| t.dyn_ref::<web_sys::HtmlInputElement>().map(|i| i.value()))
        .unwrap_or_default()
}

#[component]
pub fn TaskItem(
    milestone_id: String,
    task: Task,
    sort: SortSignals,
    #[prop(into)] on_open_notes: Callback<String>,
) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    let task_id = task.id.clone();
    let (editing, set_editing) = signal(false);
    let (expanded, set_expanded) = signal(false);
    let (title_value, set_title_value) = signal(task.title.clone());
    let (due_value, set_due_value) = signal(
        task.due_date.map(|d| d.to_string()).unwrap_or_default(),
    );
    let (new_subtask, set_new_subtask) = signal(String::new());

    let is_complete = task.status == TaskStatus::Complete;
    let completed_subtasks = task.completed_subtasks();
    let subtask_count = task.subtasks.len();
    let note_count = task.notes.len();
    let today = dates::today();

    // Mutation helpers; each writes the store and persists.
    let mutate = {
        let milestone_id = milestone_id.clone();
        let task_id = task_id.clone();
        move |f: Box<dyn FnOnce(&mut Task)>| {
            store_update_task(&store, &milestone_id, &task_id, f);
            ctx.persist(&store);
        }
    };

    let tap = {
        let mutate = mutate.clone();
        move || mutate(Box::new(|t| t.status = t.status.toggled_tap()))
    };
    let hold = {
        let mutate = mutate.clone();
        move || mutate(Box::new(|t| t.status = t.status.toggled_hold()))
    };

    let save_edit = {
        let mutate = mutate.clone();
        move || {
            let title = title_value.get_untracked().trim().to_string();
            let due = due_value.get_untracked().parse().ok();
            if !title.is_empty() {
                mutate(Box::new(move |t| {
                    t.title = title;
                    t.due_date = due;
                }));
            }
            set_editing.set(false);
        }
    };

    let add_subtask = {
        let mutate = mutate.clone();
        move || {
            let title = new_subtask.get_untracked().trim().to_string();
            if title.is_empty() {
                return;
            }
            mutate(Box::new(move |t| {
                t.subtasks.push(Subtask::new(new_id(), title));
            }));
            set_new_subtask.set(String::new());
        }
    };

    let set_tags = {
        let mutate = mutate.clone();
        move |tags: Vec<String>| mutate(Box::new(move |t| t.tags = tags))
    };

    let all_tags = {
        let milestone_id = milestone_id.clone();
        Signal::derive(move || {
            store_milestone(&store, &milestone_id)
                .map(|m| m.all_tags())
                .unwrap_or_default()
        })
    };

    let begin_edit = {
        let title = task.title.clone();
        let due = task.due_date;
        move || {
            if editing.get_untracked() || sort.dragging_any() {
                return;
            }
            set_title_value.set(title.clone());
            set_due_value.set(due.map(|d| d.to_string()).unwrap_or_default());
            set_editing.set(true);
        }
    };

    let handle_mousedown = make_on_handle_mousedown(sort, task_id.clone());
    let handle_touchstart = make_on_handle_touchstart(sort, task_id.clone());

    let selected_tags = {
        let tags = task.tags.clone();
        Signal::derive(move || tags.clone())
    };

    let notes_id = task_id.clone();
    let subtasks = task.subtasks.clone();
    let tags_for_badges = task.tags.clone();

    view! {
        <div class="task-card" class:complete=is_complete>
            <div class="task-main" on:click=move |_| begin_edit()>
                <StatusButton
                    status=task.status
                    on_tap=Callback::new({
                        let tap = tap.clone();
                        move |_| tap()
                    })
                    on_hold=Callback::new({
                        let hold = hold.clone();
                        move |_| hold()
                    })
                />
                <div class="task-body">
                    <Show
                        when=move || editing.get()
                        fallback={
                            let title = task.title.clone();
                            let tags = tags_for_badges.clone();
                            let due = task.due_date;
                            let notes_id = notes_id.clone();
                            move || {
                                let badges = tags.clone();
                                let notes_id = notes_id.clone();
                                view! {
                                    <p class="task-title" class:struck=is_complete>
                                        {title.clone()}
                                    </p>
                                    <div class="task-badges">
                                        {due.map(|d| view! {
                                            <span
                                                class="date-badge"
                                                class:today={d == today}
                                            >
                                                {dates::format_date_short(d, today)}
                                            </span>
                                        })}
                                        {badges
                                            .iter()
                                            .map(|tag| view! { <span class="tag-badge">{tag.clone()}</span> })
                                            .collect_view()}
                                        <Show when=move || (note_count > 0)>
                                            <button
                                                class="note-badge"
                                                on:click={
                                                    let notes_id = notes_id.clone();
                                                    move |ev: web_sys::MouseEvent| {
                                                        ev.stop_propagation();
                                                        on_open_notes.run(notes_id.clone());
                                                    }
                                                }
                                            >
                                                {format!("{} notes", note_count)}
                                            </button>
                                        </Show>
                                        <Show when=move || (subtask_count > 0)>
                                            <button
                                                class="subtask-toggle"
                                                on:click=move |ev: web_sys::MouseEvent| {
                                                    ev.stop_propagation();
                                                    set_expanded.update(|e| *e = !*e);
                                                }
                                            >
                                                {format!("{}/{}", completed_subtasks, subtask_count)}
                                            </button>
                                        </Show>
                                    </div>
                                }
                            }
                        }
                    >
                        <div class="task-edit" on:click=move |ev| ev.stop_propagation()>
                            <input
                                type="text"
                                prop:value=move || title_value.get()
                                on:input=move |ev| set_title_value.set(input_value(&ev))
                                on:keydown={
                                    let save_edit = save_edit.clone();
                                    move |ev: web_sys::KeyboardEvent| {
                                        if ev.key() == "Enter" {
                                            save_edit();
                                        }
                                        if ev.key() == "Escape" {
                                            set_editing.set(false);
                                        }
                                    }
                                }
                            />
                            <div class="due-row">
                                <input
                                    type="date"
                                    prop:value=move || due_value.get()
                                    on:input=move |ev| set_due_value.set(input_value(&ev))
                                />
                                <Show when=move || !due_value.get().is_empty()>
                                    <button on:click=move |_| set_due_value.set(String::new())>
                                        "×"
                                    </button>
                                </Show>
                            </div>
                            <TagEditor
                                selected=selected_tags
                                all_tags=all_tags
                                on_change=Callback::new({
                                    let set_tags = set_tags.clone();
                                    move |tags| set_tags(tags)
                                })
                            />
                            <div class="task-edit-actions">
                                <button
                                    class="primary-btn"
                                    on:click={
                                        let save_edit = save_edit.clone();
                                        move |_| save_edit()
                                    }
                                >
                                    "Done"
                                </button>
                                <button
                                    on:click={
                                        let notes_id = task_id.clone();
                                        move |_| on_open_notes.run(notes_id.clone())
                                    }
                                >
                                    {if note_count > 0 {
                                        format!("{} notes", note_count)
                                    } else {
                                        "Add note".to_string()
                                    }}
                                </button>
                            </div>
                        </div>
                    </Show>
                </div>
                <div
                    class="drag-handle"
                    on:click=move |ev: web_sys::MouseEvent| ev.stop_propagation()
                    on:mousedown=handle_mousedown
                    on:touchstart=handle_touchstart
                >
                    "⠿"
                </div>
            </div>

            <Show when=move || (expanded.get() && subtask_count > 0) || editing.get()>
                <div class="subtask-section">
                    {subtasks
                        .iter()
                        .map(|subtask| {
                            let subtask_id = subtask.id.clone();
                            let hold_id = subtask.id.clone();
                            let struck = subtask.status == TaskStatus::Complete;
                            let mutate_tap = mutate.clone();
                            let mutate_hold = mutate.clone();
                            view! {
                                <div class="subtask-row">
                                    <StatusButton
                                        status=subtask.status
                                        small=true
                                        on_tap=Callback::new(move |_| {
                                            let id = subtask_id.clone();
                                            mutate_tap(Box::new(move |t| {
                                                if let Some(s) =
                                                    t.subtasks.iter_mut().find(|s| s.id == id)
                                                {
                                                    s.status = s.status.toggled_tap();
                                                }
                                            }));
                                        })
                                        on_hold=Callback::new(move |_| {
                                            let id = hold_id.clone();
                                            mutate_hold(Box::new(move |t| {
                                                if let Some(s) =
                                                    t.subtasks.iter_mut().find(|s| s.id == id)
                                                {
                                                    s.status = s.status.toggled_hold();
                                                }
                                            }));
                                        })
                                    />
                                    <span class="subtask-title" class:struck=struck>
                                        {subtask.title.clone()}
                                    </span>
                                </div>
                            }
                        })
                        .collect_view()}
                    {
                        let add_subtask = add_subtask.clone();
                        view! {
                    <Show when=move || editing.get()>
                        <div class="subtask-add">
                            <input
                                type="text"
                                placeholder="Add subtask..."
                                prop:value=move || new_subtask.get()
                                on:input=move |ev| set_new_subtask.set(input_value(&ev))
                                on:keydown={
                                    let add_subtask = add_subtask.clone();
                                    move |ev: web_sys::KeyboardEvent| {
                                        if ev.key() == "Enter" {
                                            ev.prevent_default();
                                            add_subtask();
                                        }
                                    }
                                }
                            />
                            <button
                                on:click={
                                    let add_subtask = add_subtask.clone();
                                    move |_| add_subtask()
                                }
                            >
                                "+"
                            </button>
                        </div>
                    </Show>
                        }
                    }
                </div>
            </Show>
        </div>
    }
}
