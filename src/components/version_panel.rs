//! Version Panel Component
//!
//! Version list with view/activate/delete, and the create form.

use leptos::prelude::*;

use crate::actions;
use crate::checklist::NewVersion;
use crate::context::use_app_context;
use crate::models::CloneSource;
use crate::store::{store_locked, use_app_store, AppStateStoreFields};

#[component]
pub fn VersionPanel() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let locked = move || store_locked(&store);

    let versions = move || store.versions().with(|b| {
        b.versions()
            .iter()
            .map(|v| (v.clone(), b.is_active(v), b.can_activate(v), b.can_delete(v)))
            .collect::<Vec<_>>()
    });

    view! {
        <div class="version-panel">
            <div class="panel-header">
                <h2>"Checklist versions"</h2>
                <span class="active-version">
                    {move || store.versions().with(|b| match (b.active_name(), b.active_id()) {
                        (Some(name), Some(id)) => format!("Active: {} (id {})", name, id),
                        _ => "No active version".to_string(),
                    })}
                </span>
            </div>

            <Show
                when=move || store.versions().with(|b| !b.versions().is_empty())
                fallback=|| view! { <p class="empty-state">"No versions."</p> }
            >
                <table class="versions">
                    <thead>
                        <tr>
                            <th>"ID"</th>
                            <th>"Name"</th>
                            <th>"Status"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=versions
                            key=|(v, active, act, del)| (v.id, v.version_name.clone(), *active, *act, *del)
                            children=move |(version, active, can_activate, can_delete)| {
                                let id = version.id;
                                view! {
                                    <tr class=if active { "version-row active" } else { "version-row" }>
                                        <td>{id}</td>
                                        <td>{version.version_name.clone()}</td>
                                        <td>
                                            <span class=if active { "badge active" } else { "badge" }>
                                                {if active { "Active" } else { "Inactive" }}
                                            </span>
                                        </td>
                                        <td class="row-actions">
                                            <button on:click=move |_| actions::view_version(ctx, store, id)>"View"</button>
                                            <button
                                                disabled=move || !can_activate || store.busy().get()
                                                on:click=move |_| actions::activate_version(ctx, store, id)
                                            >
                                                "Activate"
                                            </button>
                                            <button
                                                class="danger"
                                                disabled=move || !can_delete || store.busy().get()
                                                on:click=move |_| actions::delete_version(ctx, store, id)
                                            >
                                                "Delete"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </Show>

            <CreateVersionForm locked=Signal::derive(locked) />
        </div>
    }
}

#[component]
fn CreateVersionForm(locked: Signal<bool>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let name = RwSignal::new(String::new());
    let clone_from = RwSignal::new(String::from(CloneSource::Active));
    let activate = RwSignal::new(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = NewVersion {
            name: name.get_untracked(),
            clone_from: CloneSource::from_option_value(&clone_from.get_untracked()),
            activate: activate.get_untracked(),
        };
        actions::create_version(ctx, store, form, move |ok| {
            if ok {
                name.set(String::new());
                clone_from.set(String::from(CloneSource::Active));
                activate.set(false);
            }
        });
    };

    view! {
        <form class="version-form" on:submit=on_submit>
            <h3>"New version"</h3>
            <label>
                "Name"
                <input
                    type="text"
                    placeholder="e.g. SY 2026-2027"
                    prop:value=move || name.get()
                    disabled=move || locked.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
            </label>
            <label>
                "Clone from"
                <select
                    prop:value=move || clone_from.get()
                    disabled=move || locked.get()
                    on:change=move |ev| clone_from.set(event_target_value(&ev))
                >
                    {move || store.versions().with(|b| b.clone_options()).into_iter().map(|(value, label)| {
                        let selected = clone_from.get_untracked() == value;
                        view! { <option value=value selected=selected>{label}</option> }
                    }).collect_view()}
                </select>
            </label>
            <label class="checkbox">
                <input
                    type="checkbox"
                    prop:checked=move || activate.get()
                    disabled=move || locked.get()
                    on:change=move |ev| activate.set(event_target_checked(&ev))
                />
                "Activate immediately"
            </label>
            <button type="submit" class="primary" disabled=move || locked.get()>"Create version"</button>
        </form>
    }
}
