//! Leptos DragDrop Utilities
//!
//! Row reordering for Leptos lists using mouse events.
//! Uses a movement threshold to distinguish click from drag, and the pointer's
//! position against the hovered row's midpoint to decide where the dragged row lands.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Attribute carrying the row key on every draggable row
pub const DRAG_KEY_ATTR: &str = "data-drag-key";

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

/// Where the dragged row goes relative to the hovered row
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Before,
    After,
}

/// Upper half of a row means "before", lower half means "after".
pub fn placement_for(pointer_y: f64, row_top: f64, row_height: f64) -> Placement {
    if pointer_y - row_top > row_height / 2.0 {
        Placement::After
    } else {
        Placement::Before
    }
}

/// Current hover target while dragging
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropTarget {
    pub key: String,
    pub placement: Placement,
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_key_read: ReadSignal<Option<String>>,
    pub dragging_key_write: WriteSignal<Option<String>>,
    pub drop_target_read: ReadSignal<Option<DropTarget>>,
    pub drop_target_write: WriteSignal<Option<DropTarget>>,
    /// Pending row key (mousedown on a handle but not yet dragging)
    pub pending_key_read: ReadSignal<Option<String>>,
    pub pending_key_write: WriteSignal<Option<String>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
}

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_key_read, dragging_key_write) = signal(None::<String>);
    let (drop_target_read, drop_target_write) = signal(None::<DropTarget>);
    let (pending_key_read, pending_key_write) = signal(None::<String>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    DndSignals {
        dragging_key_read,
        dragging_key_write,
        drop_target_read,
        drop_target_write,
        pending_key_read,
        pending_key_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
    }
}

impl DndSignals {
    /// Whether a drag is in progress (tracked)
    pub fn is_dragging(&self, key: &str) -> bool {
        self.dragging_key_read.with(|k| k.as_deref() == Some(key))
    }
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_key_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_key_write.set(None);
}

/// Find the draggable row under an event target and read its key.
fn row_under(target: Option<web_sys::EventTarget>) -> Option<(web_sys::Element, String)> {
    let element = target?.dyn_into::<web_sys::Element>().ok()?;
    let row = element.closest(&format!("[{}]", DRAG_KEY_ATTR)).ok()??;
    let key = row.get_attribute(DRAG_KEY_ATTR)?;
    Some((row, key))
}

/// Create mousedown handler for a row's drag handle.
/// Records a pending drag with the start position.
pub fn make_on_handle_mousedown(dnd: DndSignals, key: String) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
        }
        // Keep the browser from starting a text selection
        ev.prevent_default();
        dnd.pending_key_write.set(Some(key.clone()));
        dnd.start_x_write.set(ev.client_x());
        dnd.start_y_write.set(ev.client_y());
    }
}

/// Create mousemove handler for the list container.
///
/// While dragging, resolves the hovered row and the placement against its midpoint.
/// `on_hover(dragged, target)` fires only when the target actually changes.
pub fn make_on_list_mousemove<F>(dnd: DndSignals, on_hover: F) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    F: Fn(String, DropTarget) + Clone + 'static,
{
    move |ev: web_sys::MouseEvent| {
        let Some(dragged) = dnd.dragging_key_read.get_untracked() else { return };
        let Some((row, key)) = row_under(ev.target()) else { return };
        if key == dragged {
            return;
        }
        let rect = row.get_bounding_client_rect();
        let target = DropTarget {
            key,
            placement: placement_for(ev.client_y() as f64, rect.top(), rect.height()),
        };
        if dnd.drop_target_read.get_untracked().as_ref() == Some(&target) {
            return;
        }
        dnd.drop_target_write.set(Some(target.clone()));
        on_hover(dragged, target);
    }
}

/// Create mouseleave handler for the list container.
/// Leaving the list drops the target, so releasing outside cancels.
pub fn make_on_list_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_key_read.get_untracked().is_some() {
            dnd.drop_target_write.set(None);
        }
    }
}

/// Bind global mousemove handler - starts a drag once the pointer moved enough
pub fn bind_global_mousemove<F>(dnd: DndSignals, on_start: F)
where
    F: Fn(String) + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let Some(pending) = dnd.pending_key_read.get_untracked() else { return };
        if dnd.dragging_key_read.get_untracked().is_some() {
            return;
        }
        let dx = (ev.client_x() - dnd.start_x_read.get_untracked()).abs();
        let dy = (ev.client_y() - dnd.start_y_read.get_untracked()).abs();
        if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
            dnd.dragging_key_write.set(Some(pending.clone()));
            on_start(pending);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
    }
    on_mousemove.forget();
}

/// Bind global mouseup handler for drop detection.
///
/// `on_drop(dragged, target)` receives `None` as target when the pointer was
/// released outside the list.
pub fn bind_global_mouseup<S, F>(dnd: DndSignals, on_start: S, on_drop: F)
where
    S: Fn(String) + 'static,
    F: Fn(String, Option<DropTarget>) + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let dragging = dnd.dragging_key_read.get_untracked();
        let target = dnd.drop_target_read.get_untracked();
        end_drag(&dnd);
        // A click without movement never started a drag
        if let Some(dragged) = dragging {
            on_drop(dragged, target);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    }
    on_mouseup.forget();

    bind_global_mousemove(dnd, on_start);
}
