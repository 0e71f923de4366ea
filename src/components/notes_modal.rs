//! Notes Modal Component
//!
//! Diary entries for one task: add (with a backdatable date), edit, delete.
//! The capture time is set once and never edited.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use milepost_core::{new_id, Note};

use crate::context::use_app_context;
use crate::dates;
use crate::store::{store_milestone, store_update_task, use_app_store};

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
pub fn NotesModal(
    milestone_id: String,
    /// Task whose notes are shown; the modal is open while this is `Some`
    task_id: RwSignal<Option<String>>,
) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    let (new_content, set_new_content) = signal(String::new());
    let (new_date, set_new_date) = signal(dates::today().to_string());
    let (editing_note, set_editing_note) = signal(None::<String>);
    let (edit_content, set_edit_content) = signal(String::new());
    let (edit_date, set_edit_date) = signal(String::new());

    let lookup_id = milestone_id.clone();
    let task = Memo::new(move |_| {
        let id = task_id.get()?;
        store_milestone(&store, &lookup_id).and_then(|m| m.task(&id).cloned())
    });

    let mutate_id = milestone_id.clone();
    let mutate = move |f: Box<dyn FnOnce(&mut milepost_core::Task)>| {
        if let Some(id) = task_id.get_untracked() {
            store_update_task(&store, &mutate_id, &id, f);
            ctx.persist(&store);
        }
    };

    let add_note = {
        let mutate = mutate.clone();
        move || {
            let content = new_content.get_untracked().trim().to_string();
            if content.is_empty() {
                return;
            }
            let date = new_date
                .get_untracked()
                .parse()
                .unwrap_or_else(|_| dates::today());
            let note = Note::new(new_id(), content, date, chrono::Utc::now().to_rfc3339());
            mutate(Box::new(move |t| t.notes.push(note)));
            set_new_content.set(String::new());
            set_new_date.set(dates::today().to_string());
        }
    };

    let save_edit = {
        let mutate = mutate.clone();
        move || {
            let Some(note_id) = editing_note.get_untracked() else {
                return;
            };
            let content = edit_content.get_untracked();
            let date = edit_date.get_untracked().parse().ok();
            mutate(Box::new(move |t| {
                if let Some(note) = t.notes.iter_mut().find(|n| n.id == note_id) {
                    note.content = content;
                    if let Some(date) = date {
                        note.date = date;
                    }
                }
            }));
            set_editing_note.set(None);
        }
    };

    let delete_note = {
        let mutate = mutate.clone();
        move |note_id: String| {
            mutate(Box::new(move |t| t.notes.retain(|n| n.id != note_id)));
        }
    };

    view! {
        <Show when=move || task.get().is_some()>
            <div class="modal-backdrop" on:click=move |_| task_id.set(None)>
                <div class="modal notes-modal" on:click=move |ev| ev.stop_propagation()>
                    <div class="modal-header">
                        <div>
                            <h2>"Notes"</h2>
                            <p class="modal-subtitle">
                                {move || task.get().map(|t| t.title).unwrap_or_default()}
                            </p>
                        </div>
                        <button class="close-btn" on:click=move |_| task_id.set(None)>"×"</button>
                    </div>

                    <div class="note-add">
                        <textarea
                            placeholder="Add a note..."
                            prop:value=move || new_content.get()
                            on:input=move |ev| set_new_content.set(textarea_value(&ev))
                        ></textarea>
                        <div class="note-add-row">
                            <input
                                type="date"
                                prop:value=move || new_date.get()
                                on:input=move |ev| set_new_date.set(input_value(&ev))
                            />
                            <button
                                class="primary-btn"
                                disabled=move || new_content.get().trim().is_empty()
                                on:click={
                                    let add_note = add_note.clone();
                                    move |_| add_note()
                                }
                            >
                                "Add Note"
                            </button>
                        </div>
                    </div>

                    <div class="note-list">
                        <For
                            each=move || {
                                let mut notes = task.get().map(|t| t.notes).unwrap_or_default();
                                notes.sort_by(|a, b| b.date.cmp(&a.date));
                                notes
                            }
                            key=|note| (note.id.clone(), note.content.clone(), note.date)
                            children={
                                let delete_note = delete_note.clone();
                                let save_edit = save_edit.clone();
                                move |note: Note| {
                                let note_for_edit = note.clone();
                                let delete_id = note.id.clone();
                                let is_editing = {
                                    let id = note.id.clone();
                                    move || editing_note.get().as_deref() == Some(id.as_str())
                                };
                                let delete_note = delete_note.clone();
                                let save_edit = save_edit.clone();
                                view! {
                                    <div class="note-card">
                                        <Show
                                            when=is_editing.clone()
                                            fallback={
                                                let note = note.clone();
                                                let start_edit_note = note_for_edit.clone();
                                                let delete_note = delete_note.clone();
                                                move || {
                                                    let start = start_edit_note.clone();
                                                    let delete_id = delete_id.clone();
                                                    let delete_note = delete_note.clone();
                                                    view! {
                                                        <p class="note-content">{note.content.clone()}</p>
                                                        <div class="note-meta">
                                                            <span>{dates::format_note_date(note.date)}</span>
                                                            <button on:click=move |_| {
                                                                set_edit_content.set(start.content.clone());
                                                                set_edit_date.set(start.date.to_string());
                                                                set_editing_note.set(Some(start.id.clone()));
                                                            }>
                                                                "Edit"
                                                            </button>
                                                            <button
                                                                class="danger"
                                                                on:click=move |_| delete_note(delete_id.clone())
                                                            >
                                                                "Delete"
                                                            </button>
                                                        </div>
                                                    }
                                                }
                                            }
                                        >
                                            <textarea
                                                prop:value=move || edit_content.get()
                                                on:input=move |ev| set_edit_content.set(textarea_value(&ev))
                                            ></textarea>
                                            <div class="note-meta">
                                                <input
                                                    type="date"
                                                    prop:value=move || edit_date.get()
                                                    on:input=move |ev| set_edit_date.set(input_value(&ev))
                                                />
                                                <button on:click=move |_| set_editing_note.set(None)>
                                                    "Cancel"
                                                </button>
                                                <button
                                                    class="primary-btn"
                                                    on:click={
                                                        let save_edit = save_edit.clone();
                                                        move |_| save_edit()
                                                    }
                                                >
                                                    "Save"
                                                </button>
                                            </div>
                                        </Show>
                                    </div>
                                }
                            }
                            }
                        />
                        <Show when=move || task.get().map(|t| t.notes.is_empty()).unwrap_or(true)>
                            <p class="empty-hint">"No notes yet"</p>
                        </Show>
                    </div>
                </div>
            </div>
        </Show>
    }
}
