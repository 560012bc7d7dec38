//! Modal Dialog Component
//!
//! Backdrop plus dialog panel. Escape and backdrop clicks close it, Tab
//! cycles through the panel's focusable elements only. Focus goes back to
//! the element that had it before the modal opened.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

const FOCUSABLE: &str =
    "button:not([disabled]), input:not([disabled]), select:not([disabled]), textarea, [tabindex]:not([tabindex='-1'])";

fn focusable_at(nodes: &web_sys::NodeList, index: u32) -> Option<web_sys::HtmlElement> {
    nodes.item(index)?.dyn_into::<web_sys::HtmlElement>().ok()
}

fn focus_first(panel: &web_sys::Element) {
    if let Ok(nodes) = panel.query_selector_all(FOCUSABLE) {
        if let Some(first) = focusable_at(&nodes, 0) {
            let _ = first.focus();
        }
    }
}

fn active_element() -> Option<web_sys::HtmlElement> {
    web_sys::window()?.document()?.active_element()?.dyn_into().ok()
}

/// The opener gets focus back only while it is still in the document
fn restore_target<T>(opener: Option<T>, attached: impl Fn(&T) -> bool) -> Option<T> {
    opener.filter(|el| attached(el))
}

/// Keep Tab focus inside the panel
fn trap_tab(panel: &web_sys::Element, ev: &web_sys::KeyboardEvent) {
    let Ok(nodes) = panel.query_selector_all(FOCUSABLE) else { return };
    let len = nodes.length();
    if len == 0 {
        return;
    }
    let (Some(first), Some(last)) = (focusable_at(&nodes, 0), focusable_at(&nodes, len - 1)) else { return };
    let active: Option<web_sys::Element> = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.active_element());
    let on = |el: &web_sys::HtmlElement| active.as_ref().is_some_and(|a| a == el.unchecked_ref::<web_sys::Element>());

    if ev.shift_key() && on(&first) {
        ev.prevent_default();
        let _ = last.focus();
    } else if !ev.shift_key() && on(&last) {
        ev.prevent_default();
        let _ = first.focus();
    }
}

#[component]
pub fn Modal(
    #[prop(into)] title: String,
    #[prop(into)] on_close: Callback<()>,
    children: Children,
) -> impl IntoView {
    let panel = NodeRef::<leptos::html::Div>::new();
    let opener = StoredValue::new_local(active_element());

    on_cleanup(move || {
        let Some(opener) = opener.try_get_value() else { return };
        request_animation_frame(move || {
            if let Some(el) = restore_target(opener, |el| el.is_connected()) {
                let _ = el.focus();
            }
        });
    });

    Effect::new(move |_| {
        if let Some(el) = panel.get() {
            request_animation_frame(move || focus_first(&el));
        }
    });

    let on_keydown = move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
        "Escape" => {
            ev.prevent_default();
            on_close.run(());
        }
        "Tab" => {
            if let Some(el) = panel.get_untracked() {
                trap_tab(&el, &ev);
            }
        }
        _ => {}
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <div
                class="modal"
                role="dialog"
                aria-modal="true"
                node_ref=panel
                on:keydown=on_keydown
                on:click=|ev| ev.stop_propagation()
            >
                <h2 class="modal-title">{title}</h2>
                {children()}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_target_skips_detached_opener() {
        assert_eq!(restore_target(Some("edit-a"), |_| true), Some("edit-a"));
        assert_eq!(restore_target(Some("edit-a"), |_| false), None);
        assert_eq!(restore_target(None::<&str>, |_| true), None);
    }
}
