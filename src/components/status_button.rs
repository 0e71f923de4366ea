//! Status Button Component
//!
//! The tri-state toggle on tasks and subtasks. A tap flips complete /
//! not-started; holding the button flips in-progress / not-started, so the
//! press only counts as a tap when it ends before the hold delay.

use leptos::prelude::*;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;

use milepost_core::TaskStatus;

const HOLD_MS: i32 = 500;

#[component]
pub fn StatusButton(
    #[prop(into)] status: Signal<TaskStatus>,
    #[prop(into)] on_tap: Callback<()>,
    #[prop(into)] on_hold: Callback<()>,
    #[prop(optional)] small: bool,
) -> impl IntoView {
    let timer = RwSignal::new(None::<i32>);
    let did_hold = RwSignal::new(false);

    let clear_timer = move || {
        if let Some(handle) = timer.get_untracked() {
            if let Some(win) = web_sys::window() {
                win.clear_timeout_with_handle(handle);
            }
        }
        timer.set(None);
    };

    let start_press = move || {
        did_hold.set(false);
        let cb = Closure::<dyn FnMut()>::new(move || {
            did_hold.set(true);
            on_hold.run(());
        });
        if let Some(win) = web_sys::window() {
            if let Ok(handle) = win.set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                HOLD_MS,
            ) {
                timer.set(Some(handle));
            }
        }
        cb.forget();
    };

    let end_press = move || {
        clear_timer();
        if !did_hold.get_untracked() {
            on_tap.run(());
        }
    };

    let label = move || match status.get() {
        TaskStatus::NotStarted => "○",
        TaskStatus::InProgress => "◔",
        TaskStatus::Complete => "✓",
    };

    view! {
        <button
            class=move || {
                let base = if small { "status-btn small" } else { "status-btn" };
                format!("{} {}", base, status.get().as_str())
            }
            on:mousedown=move |_| start_press()
            on:mouseup=move |_| end_press()
            on:mouseleave=move |_| clear_timer()
            on:touchstart=move |_| start_press()
            on:touchend=move |ev: web_sys::TouchEvent| {
                ev.prevent_default();
                end_press();
            }
            on:touchcancel=move |_| clear_timer()
            on:click=move |ev| ev.prevent_default()
        >
            {label}
        </button>
    }
}
