//! Summary Card Component
//!
//! End-of-milestone reflection. The generated text is cached per milestone
//! id in the local store; regenerating is explicit. Responses are tagged
//! with a request counter so a slow older response never overwrites a newer
//! one, and failures never touch milestone data.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::storage::{LocalStore, STORAGE_NAMESPACE};
use crate::store::{store_milestone, use_app_store};

#[component]
pub fn SummaryCard(milestone_id: String) -> impl IntoView {
    let store = use_app_store();

    let cached = LocalStore::open(STORAGE_NAMESPACE)
        .and_then(|local| local.cached_summary(&milestone_id));
    let has_cached = cached.is_some();
    let summary = RwSignal::new(cached);
    let (expanded, set_expanded) = signal(has_cached);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let request_seq = RwSignal::new(0u64);

    let generate_id = milestone_id.clone();
    let generate = move || {
        let Some(milestone) = store_milestone(&store, &generate_id) else {
            return;
        };
        let seq = request_seq.get_untracked() + 1;
        request_seq.set(seq);
        set_loading.set(true);
        set_error.set(None);
        let cache_id = generate_id.clone();
        spawn_local(async move {
            let result = api::request_summary(
                milestone.tasks.clone(),
                milestone.standalone_notes.clone(),
                milestone.goal(),
            )
            .await;
            if request_seq.get_untracked() != seq {
                // A newer request superseded this one; drop the response.
                return;
            }
            set_loading.set(false);
            match result {
                Ok(text) => {
                    if let Some(mut local) = LocalStore::open(STORAGE_NAMESPACE) {
                        local.store_summary(&cache_id, &text);
                    }
                    summary.set(Some(text));
                    set_expanded.set(true);
                }
                Err(e) => {
                    web_sys::console::warn_1(&format!("[SUMMARY] {}", e).into());
                    set_error.set(Some("Unable to generate summary. Please try again.".into()));
                }
            }
        });
    };

    let header_generate = generate.clone();

    view! {
        <div class="summary-card">
            <button
                class="summary-header"
                on:click=move |_| {
                    if summary.get_untracked().is_some() {
                        set_expanded.update(|e| *e = !*e);
                    } else if !loading.get_untracked() {
                        header_generate();
                    }
                }
            >
                <div>
                    <h3>"Reflection"</h3>
                    <p class="modal-subtitle">
                        {move || {
                            if summary.get().is_some() {
                                "Your milestone summary"
                            } else {
                                "Generate a summary of your journey"
                            }
                        }}
                    </p>
                </div>
                <span class="summary-chevron">
                    {move || {
                        if loading.get() {
                            "…"
                        } else if summary.get().is_some() {
                            if expanded.get() { "▴" } else { "▾" }
                        } else {
                            "›"
                        }
                    }}
                </span>
            </button>

            <Show when=move || expanded.get() && summary.get().is_some()>
                <div class="summary-body">
                    <p class="summary-text">{move || summary.get().unwrap_or_default()}</p>
                    <button
                        class="regenerate-btn"
                        disabled=move || loading.get()
                        on:click={
                            let generate = generate.clone();
                            move |_| generate()
                        }
                    >
                        "Regenerate"
                    </button>
                </div>
            </Show>

            <Show when=move || error.get().is_some()>
                <p class="form-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
        </div>
    }
}
