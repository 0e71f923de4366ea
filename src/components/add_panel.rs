//! Add Panel Component
//!
//! Tabbed modal for adding either a task or a standalone journal note to a
//! milestone.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use milepost_core::{new_id, Note, Task};

use crate::context::use_app_context;
use crate::dates;
use crate::store::{store_milestone, store_update_milestone_with, use_app_store};

use super::TagEditor;

fn input_value(ev: &web_sys::Event) -> String {
    ev.target()
        .and_then(|t| t.dyn_ref::<web_sys::HtmlInputElement>().map(|i| i.value()))
        .unwrap_or_default()
}

fn textarea_value(ev: &web_sys::Event) -> String {
    ev.target()
        .and_then(|t| t.dyn_ref::<web_sys::HtmlTextAreaElement>().map(|i| i.value()))
        .unwrap_or_default()
}

#[component]
pub fn AddPanel(
    milestone_id: String,
    open: RwSignal<bool>,
    /// "task" or "note"; which tab the panel opens on
    default_tab: RwSignal<&'static str>,
) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    let (tab, set_tab) = signal("task");
    Effect::new(move |_| {
        if open.get() {
            set_tab.set(default_tab.get_untracked());
        }
    });

    let (title, set_title) = signal(String::new());
    let (due, set_due) = signal(String::new());
    let (tags, set_tags) = signal(Vec::<String>::new());
    let (note_content, set_note_content) = signal(String::new());
    let (note_date, set_note_date) = signal(dates::today().to_string());

    let reset = move || {
        set_title.set(String::new());
        set_due.set(String::new());
        set_tags.set(Vec::new());
        set_note_content.set(String::new());
        set_note_date.set(dates::today().to_string());
    };

    let all_tags = {
        let milestone_id = milestone_id.clone();
        Signal::derive(move || {
            store_milestone(&store, &milestone_id)
                .map(|m| m.all_tags())
                .unwrap_or_default()
        })
    };

    let task_milestone = milestone_id.clone();
    let submit_task = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let task_title = title.get_untracked().trim().to_string();
        if task_title.is_empty() {
            return;
        }
        let mut task = Task::new(new_id(), task_title);
        task.tags = tags.get_untracked();
        task.due_date = due.get_untracked().parse().ok();
        store_update_milestone_with(&store, &task_milestone, move |milestone| {
            milestone.tasks.push(task);
        });
        ctx.persist(&store);
        reset();
        open.set(false);
    };

    let note_milestone = milestone_id.clone();
    let submit_note = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let content = note_content.get_untracked().trim().to_string();
        if content.is_empty() {
            return;
        }
        let date = note_date
            .get_untracked()
            .parse()
            .unwrap_or_else(|_| dates::today());
        let note = Note::new(new_id(), content, date, chrono::Utc::now().to_rfc3339());
        store_update_milestone_with(&store, &note_milestone, move |milestone| {
            milestone.standalone_notes.push(note);
        });
        ctx.persist(&store);
        reset();
        open.set(false);
    };

    view! {
        <Show when=move || open.get()>
            <div class="modal-backdrop" on:click=move |_| open.set(false)>
                <div class="modal add-panel" on:click=move |ev| ev.stop_propagation()>
                    <div class="modal-header">
                        <h2>"Add New"</h2>
                        <button class="close-btn" on:click=move |_| open.set(false)>"×"</button>
                    </div>

                    <div class="tab-row">
                        <button
                            class=move || if tab.get() == "task" { "tab active" } else { "tab" }
                            on:click=move |_| set_tab.set("task")
                        >
                            "Task"
                        </button>
                        <button
                            class=move || if tab.get() == "note" { "tab active" } else { "tab" }
                            on:click=move |_| set_tab.set("note")
                        >
                            "Note"
                        </button>
                    </div>

                    {
                        let submit_task = submit_task.clone();
                        view! {
                    <Show when=move || tab.get() == "task">
                        <form on:submit=submit_task.clone()>
                            <label>"Task Title"</label>
                            <input
                                type="text"
                                placeholder="What do you want to accomplish?"
                                prop:value=move || title.get()
                                on:input=move |ev| set_title.set(input_value(&ev))
                            />
                            <label>"Due Date"</label>
                            <input
                                type="date"
                                prop:value=move || due.get()
                                on:input=move |ev| set_due.set(input_value(&ev))
                            />
                            <label>"Tags"</label>
                            <TagEditor
                                selected=tags
                                all_tags=all_tags
                                on_change=Callback::new(move |next| set_tags.set(next))
                            />
                            <button type="submit" class="primary-btn">"Add Task"</button>
                        </form>
                    </Show>
                        }
                    }

                    {
                        let submit_note = submit_note.clone();
                        view! {
                    <Show when=move || tab.get() == "note">
                        <form on:submit=submit_note.clone()>
                            <label>"Note"</label>
                            <textarea
                                placeholder="What's on your mind?"
                                prop:value=move || note_content.get()
                                on:input=move |ev| set_note_content.set(textarea_value(&ev))
                            ></textarea>
                            <label>"Date"</label>
                            <input
                                type="date"
                                prop:value=move || note_date.get()
                                on:input=move |ev| set_note_date.set(input_value(&ev))
                            />
                            <button type="submit" class="primary-btn">"Add Note"</button>
                        </form>
                    </Show>
                        }
                    }
                </div>
            </div>
        </Show>
    }
}
