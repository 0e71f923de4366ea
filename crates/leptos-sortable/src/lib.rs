//! Leptos Sortable Lists
//!
//! Long-press drag-to-reorder for a vertical list, using mouse and touch
//! events. A press on the drag handle only becomes a drag after the
//! long-press delay; a shorter press stays a tap. Geometry is captured once
//! when the drag starts (see `milepost_core::reorder`) so the visual shift
//! of the other rows never feeds back into the drop computation.

use leptos::prelude::*;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;

pub use milepost_core::reorder::{DragSession, Shift};

/// Press-and-hold delay before a press becomes a drag
const LONG_PRESS_MS: i32 = 300;

/// Sortable state signals
#[derive(Clone, Copy)]
pub struct SortSignals {
    /// Item pressed but not yet dragging
    pending_read: ReadSignal<Option<String>>,
    pending_write: WriteSignal<Option<String>>,
    /// Geometry captured at drag start; `Some` while dragging
    session_read: ReadSignal<Option<DragSession>>,
    session_write: WriteSignal<Option<DragSession>>,
    /// Current drop index while dragging
    drop_read: ReadSignal<Option<usize>>,
    drop_write: WriteSignal<Option<usize>>,
    /// Pending long-press timer handle
    timer_read: ReadSignal<Option<i32>>,
    timer_write: WriteSignal<Option<i32>>,
    /// DOM id of the list container holding `data-sort-id` rows
    container_id: &'static str,
}

pub fn create_sort_signals(container_id: &'static str) -> SortSignals {
    let (pending_read, pending_write) = signal(None::<String>);
    let (session_read, session_write) = signal(None::<DragSession>);
    let (drop_read, drop_write) = signal(None::<usize>);
    let (timer_read, timer_write) = signal(None::<i32>);
    SortSignals {
        pending_read,
        pending_write,
        session_read,
        session_write,
        drop_read,
        drop_write,
        timer_read,
        timer_write,
        container_id,
    }
}

impl SortSignals {
    pub fn is_dragging(&self, id: &str) -> bool {
        self.session_read
            .get()
            .map(|s| s.dragged_id() == id)
            .unwrap_or(false)
    }

    pub fn dragging_any(&self) -> bool {
        self.session_read.get().is_some()
    }

    /// Inline style for a row: its current shift as a transform, using the
    /// captured row pitch as the distance
    pub fn row_style(&self, id: &str) -> String {
        let pitch = self
            .session_read
            .get()
            .map(|s| s.row_pitch())
            .unwrap_or(0.0);
        shift_style(self.row_shift(id), pitch)
    }

    /// Visual shift for the row with this id given the current drop index
    pub fn row_shift(&self, id: &str) -> Shift {
        let (session, drop) = match (self.session_read.get(), self.drop_read.get()) {
            (Some(session), Some(drop)) => (session, drop),
            _ => return Shift::None,
        };
        match (0..session.len()).find(|&i| session.id_at(i) == Some(id)) {
            Some(index) => session.shift_for(index, drop),
            None => Shift::None,
        }
    }
}

/// Inline transform for a shifted row
pub fn shift_style(shift: Shift, item_height_px: f64) -> String {
    match shift {
        Shift::None => String::new(),
        Shift::Up => format!("transform: translateY(-{}px);", item_height_px),
        Shift::Down => format!("transform: translateY({}px);", item_height_px),
    }
}

/// Measure the rows currently in the container, in display order
fn capture_rows(container_id: &str) -> Vec<(String, f64)> {
    let mut rows = Vec::new();
    let document = match web_sys::window().and_then(|w| w.document()) {
        Some(doc) => doc,
        None => return rows,
    };
    let container = match document.get_element_by_id(container_id) {
        Some(el) => el,
        None => return rows,
    };
    let nodes = match container.query_selector_all("[data-sort-id]") {
        Ok(nodes) => nodes,
        Err(_) => return rows,
    };
    for i in 0..nodes.length() {
        let Some(node) = nodes.get(i) else { continue };
        let Some(element) = node.dyn_ref::<web_sys::Element>() else {
            continue;
        };
        let Some(id) = element.get_attribute("data-sort-id") else {
            continue;
        };
        let rect = element.get_bounding_client_rect();
        rows.push((id, rect.top() + rect.height() / 2.0));
    }
    rows
}

fn begin_drag(sort: &SortSignals, id: &str) {
    let rows = capture_rows(sort.container_id);
    let start = match rows.iter().position(|(row_id, _)| row_id == id) {
        Some(start) => start,
        None => return,
    };
    if let Some(session) = DragSession::capture(rows, start) {
        sort.drop_write.try_set(Some(session.start_index()));
        sort.session_write.try_set(Some(session));
    }
}

// The document-level listeners and the long-press timer can outlive the list
// that created them, so every access below tolerates disposed signals.

fn clear_timer(sort: &SortSignals) {
    if let Some(Some(handle)) = sort.timer_read.try_get_untracked() {
        if let Some(win) = web_sys::window() {
            win.clear_timeout_with_handle(handle);
        }
    }
    sort.timer_write.try_set(None);
}

/// Reset to idle with no mutation (release without a move, or cancellation)
pub fn end_drag(sort: &SortSignals) {
    clear_timer(sort);
    sort.pending_write.try_set(None);
    sort.session_write.try_set(None);
    sort.drop_write.try_set(None);
}

fn press(sort: SortSignals, id: String) {
    sort.pending_write.try_set(Some(id.clone()));
    let cb = Closure::<dyn FnMut()>::new(move || {
        // Still pressed after the delay: this is a drag, not a tap.
        let pending = sort.pending_read.try_get_untracked().flatten();
        if pending.as_deref() == Some(id.as_str()) {
            begin_drag(&sort, &id);
        }
    });
    if let Some(win) = web_sys::window() {
        if let Ok(handle) = win
            .set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), LONG_PRESS_MS)
        {
            sort.timer_write.set(Some(handle));
        }
    }
    cb.forget();
}

/// Create a mousedown handler for a row's drag handle
pub fn make_on_handle_mousedown(sort: SortSignals, id: String) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            ev.prevent_default();
            press(sort, id.clone());
        }
    }
}

/// Create a touchstart handler for a row's drag handle
pub fn make_on_handle_touchstart(sort: SortSignals, id: String) -> impl Fn(web_sys::TouchEvent) + Clone + 'static {
    move |_ev: web_sys::TouchEvent| {
        press(sort, id.clone());
    }
}

fn pointer_y_of_mouse(ev: &web_sys::MouseEvent) -> f64 {
    ev.client_y() as f64
}

fn pointer_y_of_touch(ev: &web_sys::TouchEvent) -> Option<f64> {
    ev.touches().get(0).map(|touch| touch.client_y() as f64)
}

fn track_pointer(sort: &SortSignals, pointer_y: f64) {
    if let Some(Some(session)) = sort.session_read.try_get_untracked() {
        sort.drop_write.try_set(Some(session.drop_index(pointer_y)));
    }
}

fn release<F>(sort: &SortSignals, on_commit: &F)
where
    F: Fn(String, String),
{
    let session = sort.session_read.try_get_untracked().flatten();
    let drop = sort.drop_read.try_get_untracked().flatten();
    if let (Some(session), Some(drop)) = (session, drop) {
        if drop != session.start_index() {
            if let Some(target) = session.id_at(drop) {
                on_commit(session.dragged_id().to_string(), target.to_string());
            }
        }
    }
    end_drag(sort);
}

/// Bind the document-level listeners that drive the gesture. Call once per
/// sortable list, after mount. `on_commit(dragged_id, target_id)` fires only
/// when the drop index differs from the start index; cancellation paths
/// (touchcancel, pointer leaving the document) reset with no mutation.
pub fn bind_sortable<F>(sort: SortSignals, on_commit: F)
where
    F: Fn(String, String) + Clone + 'static,
{
    let document = match web_sys::window().and_then(|w| w.document()) {
        Some(doc) => doc,
        None => return,
    };

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        if matches!(sort.session_read.try_get_untracked(), Some(Some(_))) {
            ev.prevent_default();
            track_pointer(&sort, pointer_y_of_mouse(&ev));
        }
    });
    let _ = document
        .add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
    on_mousemove.forget();

    let on_touchmove = Closure::<dyn FnMut(web_sys::TouchEvent)>::new(move |ev: web_sys::TouchEvent| {
        if matches!(sort.session_read.try_get_untracked(), Some(Some(_))) {
            ev.prevent_default();
            if let Some(y) = pointer_y_of_touch(&ev) {
                track_pointer(&sort, y);
            }
        }
    });
    let _ = document
        .add_event_listener_with_callback("touchmove", on_touchmove.as_ref().unchecked_ref());
    on_touchmove.forget();

    let commit = on_commit.clone();
    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        release(&sort, &commit);
    });
    let _ = document.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    on_mouseup.forget();

    let commit = on_commit;
    let on_touchend = Closure::<dyn FnMut(web_sys::TouchEvent)>::new(move |_ev: web_sys::TouchEvent| {
        release(&sort, &commit);
    });
    let _ = document
        .add_event_listener_with_callback("touchend", on_touchend.as_ref().unchecked_ref());
    on_touchend.forget();

    // Cancellation: no commit, list unchanged.
    let on_touchcancel = Closure::<dyn FnMut(web_sys::TouchEvent)>::new(move |_ev: web_sys::TouchEvent| {
        end_drag(&sort);
    });
    let _ = document
        .add_event_listener_with_callback("touchcancel", on_touchcancel.as_ref().unchecked_ref());
    on_touchcancel.forget();

    let on_mouseleave = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        end_drag(&sort);
    });
    let _ = document
        .add_event_listener_with_callback("mouseleave", on_mouseleave.as_ref().unchecked_ref());
    on_mouseleave.forget();
}
