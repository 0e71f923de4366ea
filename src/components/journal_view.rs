//! Journal View Component
//!
//! Chronological timeline of every note in a milestone, task notes and
//! standalone entries together, newest day first. Edits and deletes route
//! back to the owning task or the milestone's standalone list.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use milepost_core::Note;

use crate::context::use_app_context;
use crate::dates;
use crate::store::{store_milestone, store_update_milestone_with, store_update_task, use_app_store};

/// One timeline row: the note plus, for task notes, where it came from
#[derive(Clone, PartialEq)]
struct JournalEntry {
    note: Note,
    /// `None` for standalone entries
    task: Option<(String, String)>,
    tags: Vec<String>,
}

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
pub fn JournalView(milestone_id: String, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    let (editing_note, set_editing_note) = signal(None::<String>);
    let (edit_content, set_edit_content) = signal(String::new());
    let (edit_date, set_edit_date) = signal(String::new());

    let title_id = milestone_id.clone();
    let milestone_title = Memo::new(move |_| {
        store_milestone(&store, &title_id)
            .map(|m| m.title)
            .unwrap_or_default()
    });

    let entries_id = milestone_id.clone();
    let grouped = Memo::new(move |_| {
        let Some(milestone) = store_milestone(&store, &entries_id) else {
            return Vec::new();
        };
        let mut entries: Vec<JournalEntry> = milestone
            .tasks
            .iter()
            .flat_map(|task| {
                task.notes.iter().map(move |note| JournalEntry {
                    note: note.clone(),
                    task: Some((task.id.clone(), task.title.clone())),
                    tags: task.tags.clone(),
                })
            })
            .chain(milestone.standalone_notes.iter().map(|note| JournalEntry {
                note: note.clone(),
                task: None,
                tags: Vec::new(),
            }))
            .collect();
        entries.sort_by(|a, b| b.note.date.cmp(&a.note.date));

        // Group consecutive same-date entries into day buckets.
        let mut days: Vec<(chrono::NaiveDate, Vec<JournalEntry>)> = Vec::new();
        for entry in entries {
            match days.last_mut() {
                Some((date, bucket)) if *date == entry.note.date => bucket.push(entry),
                _ => days.push((entry.note.date, vec![entry])),
            }
        }
        days
    });

    let save_id = milestone_id.clone();
    let save_edit = move |entry: JournalEntry| {
        let content = edit_content.get_untracked();
        let Some(date) = edit_date.get_untracked().parse::<chrono::NaiveDate>().ok() else {
            return;
        };
        let note_id = entry.note.id.clone();
        match &entry.task {
            Some((task_id, _)) => {
                store_update_task(&store, &save_id, task_id, move |task| {
                    if let Some(note) = task.notes.iter_mut().find(|n| n.id == note_id) {
                        note.content = content;
                        note.date = date;
                    }
                });
            }
            None => {
                store_update_milestone_with(&store, &save_id, move |milestone| {
                    if let Some(note) =
                        milestone.standalone_notes.iter_mut().find(|n| n.id == note_id)
                    {
                        note.content = content;
                        note.date = date;
                    }
                });
            }
        }
        ctx.persist(&store);
        set_editing_note.set(None);
    };

    let delete_id_ns = milestone_id.clone();
    let delete_entry = move |entry: JournalEntry| {
        let note_id = entry.note.id.clone();
        match &entry.task {
            Some((task_id, _)) => {
                store_update_task(&store, &delete_id_ns, task_id, move |task| {
                    task.notes.retain(|n| n.id != note_id);
                });
            }
            None => {
                store_update_milestone_with(&store, &delete_id_ns, move |milestone| {
                    milestone.standalone_notes.retain(|n| n.id != note_id);
                });
            }
        }
        ctx.persist(&store);
    };

    view! {
        <div class="journal-view">
            <header class="journal-header">
                <button class="back-btn" on:click=move |_| on_close.run(())>"‹"</button>
                <div>
                    <h1>"Journal"</h1>
                    <p class="modal-subtitle">{move || milestone_title.get()}</p>
                </div>
            </header>

            <div class="journal-timeline">
                <For
                    each=move || grouped.get()
                    key=|(date, entries)| {
                        (
                            *date,
                            entries
                                .iter()
                                .map(|e| (e.note.id.clone(), e.note.content.clone(), e.note.date))
                                .collect::<Vec<_>>(),
                        )
                    }
                    children=move |(date, entries): (chrono::NaiveDate, Vec<JournalEntry>)| {
                        let save_edit = save_edit.clone();
                        let delete_entry = delete_entry.clone();
                        view! {
                            <div class="journal-day">
                                <h2 class="journal-date">{dates::format_note_date(date)}</h2>
                                <div class="journal-entries">
                                    {entries
                                        .into_iter()
                                        .map(|entry| {
                                            let is_editing = {
                                                let id = entry.note.id.clone();
                                                move || {
                                                    editing_note.get().as_deref()
                                                        == Some(id.as_str())
                                                }
                                            };
                                            let entry_for_save = entry.clone();
                                            let entry_for_delete = entry.clone();
                                            let entry_for_edit = entry.clone();
                                            let save_edit = save_edit.clone();
                                            let delete_entry = delete_entry.clone();
                                            view! {
                                                <div class="note-card">
                                                    <Show
                                                        when=is_editing.clone()
                                                        fallback={
                                                            let entry = entry.clone();
                                                            let delete_entry = delete_entry.clone();
                                                            move || {
                                                                let start = entry_for_edit.clone();
                                                                let delete_entry = delete_entry.clone();
                                                                let target = entry_for_delete.clone();
                                                                view! {
                                                                    <p class="note-content">
                                                                        {entry.note.content.clone()}
                                                                    </p>
                                                                    <div class="note-meta">
                                                                        {match &entry.task {
                                                                            Some((_, title)) => view! {
                                                                                <span class="note-origin">
                                                                                    {title.clone()}
                                                                                </span>
                                                                            }
                                                                            .into_any(),
                                                                            None => view! {
                                                                                <span class="note-origin standalone">
                                                                                    "Journal Entry"
                                                                                </span>
                                                                            }
                                                                            .into_any(),
                                                                        }}
                                                                        {entry
                                                                            .tags
                                                                            .iter()
                                                                            .take(2)
                                                                            .map(|tag| view! {
                                                                                <span class="tag-badge">
                                                                                    {tag.clone()}
                                                                                </span>
                                                                            })
                                                                            .collect_view()}
                                                                        <button on:click=move |_| {
                                                                            set_edit_content
                                                                                .set(start.note.content.clone());
                                                                            set_edit_date
                                                                                .set(start.note.date.to_string());
                                                                            set_editing_note
                                                                                .set(Some(start.note.id.clone()));
                                                                        }>
                                                                            "Edit"
                                                                        </button>
                                                                        <button
                                                                            class="danger"
                                                                            on:click=move |_| {
                                                                                delete_entry(target.clone())
                                                                            }
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
                                                            on:input=move |ev| {
                                                                set_edit_content.set(textarea_value(&ev))
                                                            }
                                                        ></textarea>
                                                        <div class="note-meta">
                                                            <input
                                                                type="date"
                                                                prop:value=move || edit_date.get()
                                                                on:input=move |ev| {
                                                                    set_edit_date.set(input_value(&ev))
                                                                }
                                                            />
                                                            <button on:click=move |_| {
                                                                set_editing_note.set(None)
                                                            }>
                                                                "Cancel"
                                                            </button>
                                                            <button
                                                                class="primary-btn"
                                                                on:click={
                                                                    let save_edit = save_edit.clone();
                                                                    let entry = entry_for_save.clone();
                                                                    move |_| save_edit(entry.clone())
                                                                }
                                                            >
                                                                "Save"
                                                            </button>
                                                        </div>
                                                    </Show>
                                                </div>
                                            }
                                        })
                                        .collect_view()}
                                </div>
                            </div>
                        }
                    }
                />
                <Show when=move || grouped.get().is_empty()>
                    <div class="empty-hint journal-empty">
                        <p>"No notes yet"</p>
                        <p>"Add one from a task or the add panel"</p>
                    </div>
                </Show>
            </div>
        </div>
    }
}
