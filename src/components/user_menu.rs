//! User Menu Component
//!
//! Avatar button with a dropdown (name, roles, log out) and the logout
//! confirmation modal. Outside clicks and Escape close the dropdown.

use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::actions;
use crate::components::Modal;
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn UserMenu() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (open, set_open) = signal(false);
    let (confirm_logout, set_confirm_logout) = signal(false);
    let menu = NodeRef::<leptos::html::Div>::new();

    let _ = window_event_listener(ev::click, move |ev| {
        if !open.get_untracked() {
            return;
        }
        let inside = menu.get_untracked().zip(ev.target()).is_some_and(|(menu, target)| {
            target.dyn_ref::<web_sys::Node>().is_some_and(|node| menu.contains(Some(node)))
        });
        if !inside {
            set_open.set(false);
        }
    });
    let _ = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" && open.get_untracked() {
            set_open.set(false);
        }
    });

    let name = move || store.session().with(|s| s.as_ref().map(|s| s.display_name.clone()).unwrap_or_default());
    let initials = move || store.session().with(|s| s.as_ref().map(|s| s.initials()).unwrap_or_default());
    let roles = move || store.session().with(|s| s.as_ref().map(|s| s.roles_label()).unwrap_or_default());

    view! {
        <div class="user-menu" node_ref=menu>
            <button
                class="avatar-btn"
                aria-haspopup="menu"
                aria-expanded=move || open.get().to_string()
                on:click=move |_| set_open.update(|o| *o = !*o)
            >
                <span class="avatar">{initials}</span>
                <span class="user-name">{name}</span>
            </button>
            <Show when=move || open.get()>
                <div class="dropdown" role="menu">
                    <div class="dropdown-header">
                        <strong>{name}</strong>
                        <small>{roles}</small>
                    </div>
                    <button
                        role="menuitem"
                        on:click=move |_| {
                            set_open.set(false);
                            set_confirm_logout.set(true);
                        }
                    >
                        "Log out"
                    </button>
                </div>
            </Show>
            <Show when=move || confirm_logout.get()>
                <Modal title="Log out?" on_close=move |_| set_confirm_logout.set(false)>
                    <p>"You will need to sign in again to manage the checklist."</p>
                    <div class="modal-actions">
                        <button type="button" on:click=move |_| set_confirm_logout.set(false)>"Cancel"</button>
                        <button type="button" class="danger" on:click=move |_| actions::logout(ctx)>
                            "Log out"
                        </button>
                    </div>
                </Modal>
            </Show>
        </div>
    }
}
