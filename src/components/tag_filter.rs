//! Tag Filter Modal
//!
//! Filters the task list by tags. An empty selection means "no tag filter";
//! the selection only narrows the view, never the backing data.

use leptos::prelude::*;

#[component]
pub fn TagFilterModal(
    open: RwSignal<bool>,
    selected: RwSignal<Vec<String>>,
    #[prop(into)] all_tags: Signal<Vec<String>>,
) -> impl IntoView {
    let toggle = move |tag: String| {
        let mut tags = selected.get_untracked();
        if let Some(index) = tags.iter().position(|t| *t == tag) {
            tags.remove(index);
        } else {
            tags.push(tag);
        }
        selected.set(tags);
    };

    view! {
        <Show when=move || open.get()>
            <div class="modal-backdrop" on:click=move |_| open.set(false)>
                <div class="modal tag-filter-modal" on:click=move |ev| ev.stop_propagation()>
                    <div class="modal-header">
                        <h2>"Filter by Tags"</h2>
                        <button class="close-btn" on:click=move |_| open.set(false)>"×"</button>
                    </div>
                    <div class="modal-actions">
                        <button on:click=move |_| selected.set(all_tags.get_untracked())>
                            "Select All"
                        </button>
                        <button on:click=move |_| selected.set(Vec::new())>"Clear All"</button>
                    </div>
                    <div class="tag-filter-list">
                        <For
                            each=move || all_tags.get()
                            key=|tag| tag.clone()
                            children=move |tag: String| {
                                let label = tag.clone();
                                let tag_for_class = tag.clone();
                                view! {
                                    <button
                                        class=move || {
                                            if selected.get().contains(&tag_for_class) {
                                                "tag-filter-row selected"
                                            } else {
                                                "tag-filter-row"
                                            }
                                        }
                                        on:click=move |_| toggle(tag.clone())
                                    >
                                        {label}
                                    </button>
                                }
                            }
                        />
                        <Show when=move || all_tags.get().is_empty()>
                            <p class="empty-hint">"No tags yet."</p>
                        </Show>
                    </div>
                    <button class="primary-btn" on:click=move |_| open.set(false)>"Done"</button>
                </div>
            </div>
        </Show>
    }
}
