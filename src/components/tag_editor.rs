//! Tag Editor Component
//!
//! Toggleable tag chips for a task: the default palette, every tag already
//! in use, and a free-form input for new ones.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use milepost_core::seed::DEFAULT_TAGS;

#[component]
pub fn TagEditor(
    #[prop(into)] selected: Signal<Vec<String>>,
    #[prop(into)] all_tags: Signal<Vec<String>>,
    #[prop(into)] on_change: Callback<Vec<String>>,
) -> impl IntoView {
    let (adding, set_adding) = signal(false);
    let (new_tag, set_new_tag) = signal(String::new());

    let available = move || {
        let mut tags: Vec<String> = DEFAULT_TAGS.iter().map(|t| t.to_string()).collect();
        for tag in all_tags.get() {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        tags
    };

    let toggle = move |tag: String| {
        let mut tags = selected.get_untracked();
        if let Some(index) = tags.iter().position(|t| *t == tag) {
            tags.remove(index);
        } else {
            tags.push(tag);
        }
        on_change.run(tags);
    };

    let add_new = move || {
        let tag = new_tag.get_untracked().trim().to_string();
        if tag.is_empty() {
            return;
        }
        let mut tags = selected.get_untracked();
        if !tags.contains(&tag) {
            tags.push(tag);
            on_change.run(tags);
        }
        set_new_tag.set(String::new());
        set_adding.set(false);
    };

    view! {
        <div class="tag-editor">
            <For
                each=available
                key=|tag| tag.clone()
                children=move |tag: String| {
                    let label = tag.clone();
                    let tag_for_class = tag.clone();
                    view! {
                        <button
                            type="button"
                            class=move || {
                                if selected.get().contains(&tag_for_class) {
                                    "tag-chip selected"
                                } else {
                                    "tag-chip"
                                }
                            }
                            on:click=move |_| toggle(tag.clone())
                        >
                            {label}
                        </button>
                    }
                }
            />
            <Show when=move || !adding.get()>
                <button type="button" class="tag-chip new" on:click=move |_| set_adding.set(true)>
                    "+ New"
                </button>
            </Show>
            <Show when=move || adding.get()>
                <span class="tag-new-input">
                    <input
                        type="text"
                        placeholder="Tag name..."
                        prop:value=move || new_tag.get()
                        on:input=move |ev| {
                            let target = ev.target().unwrap();
                            let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                            set_new_tag.set(input.value());
                        }
                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                add_new();
                            }
                            if ev.key() == "Escape" {
                                set_adding.set(false);
                                set_new_tag.set(String::new());
                            }
                        }
                    />
                    <button type="button" class="confirm-btn" on:click=move |_| add_new()>
                        "✓"
                    </button>
                    <button
                        type="button"
                        class="cancel-btn"
                        on:click=move |_| {
                            set_adding.set(false);
                            set_new_tag.set(String::new());
                        }
                    >
                        "✗"
                    </button>
                </span>
            </Show>
        </div>
    }
}
