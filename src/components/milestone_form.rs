//! Milestone Form Component
//!
//! Title and date range, used both to create a milestone and to edit one
//! from settings. Dates are validated here so the form can stay open and
//! show the problem; the snapshot operations validate again underneath.

use chrono::NaiveDate;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use milepost_core::Goal;

use crate::dates;

fn input_value(ev: &web_sys::Event) -> String {
    ev.target()
        .and_then(|t| t.dyn_ref::<web_sys::HtmlInputElement>().map(|i| i.value()))
        .unwrap_or_default()
}

#[component]
pub fn MilestoneForm(
    #[prop(optional_no_strip)] initial: Option<Goal>,
    #[prop(into)] heading: String,
    #[prop(into)] on_save: Callback<Goal>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let today = dates::today();
    let (title, set_title) = signal(initial.as_ref().map(|g| g.title.clone()).unwrap_or_default());
    let (start, set_start) = signal(
        initial
            .as_ref()
            .map(|g| g.start_date.to_string())
            .unwrap_or_else(|| today.to_string()),
    );
    let (end, set_end) = signal(
        initial
            .as_ref()
            .map(|g| g.end_date.to_string())
            .unwrap_or_else(|| (today + chrono::Duration::days(13)).to_string()),
    );
    let (error, set_error) = signal(None::<String>);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let title = title.get_untracked().trim().to_string();
        if title.is_empty() {
            set_error.set(Some("A title is required".into()));
            return;
        }
        let (start_date, end_date) = match (
            start.get_untracked().parse::<NaiveDate>(),
            end.get_untracked().parse::<NaiveDate>(),
        ) {
            (Ok(start_date), Ok(end_date)) => (start_date, end_date),
            _ => {
                set_error.set(Some("Both dates are required".into()));
                return;
            }
        };
        if end_date < start_date {
            set_error.set(Some("The end date is before the start date".into()));
            return;
        }
        set_error.set(None);
        on_save.run(Goal {
            title,
            start_date,
            end_date,
        });
    };

    view! {
        <div class="modal-backdrop">
            <div class="modal milestone-form" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2>{heading}</h2>
                    <button class="close-btn" on:click=move |_| on_cancel.run(())>"×"</button>
                </div>
                <form on:submit=submit>
                    <label>"Title"</label>
                    <input
                        type="text"
                        placeholder="What is this milestone about?"
                        prop:value=move || title.get()
                        on:input=move |ev| set_title.set(input_value(&ev))
                    />
                    <div class="date-row">
                        <div>
                            <label>"Start"</label>
                            <input
                                type="date"
                                prop:value=move || start.get()
                                on:input=move |ev| set_start.set(input_value(&ev))
                            />
                        </div>
                        <div>
                            <label>"End"</label>
                            <input
                                type="date"
                                prop:value=move || end.get()
                                on:input=move |ev| set_end.set(input_value(&ev))
                            />
                        </div>
                    </div>
                    {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
                    <button type="submit" class="primary-btn">"Save"</button>
                </form>
            </div>
        </div>
    }
}
