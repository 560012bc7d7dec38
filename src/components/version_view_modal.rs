//! Read-only listing of one version's items

use leptos::prelude::*;

use crate::components::Modal;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn VersionViewModal() -> impl IntoView {
    let store = use_app_store();
    let close = move || store.viewing().set(None);

    move || store.viewing().get().map(|shown| {
        let title = format!("{} (id {})", shown.name, shown.id);
        let status = shown.status_label();
        let empty = shown.items.is_empty();
        view! {
            <Modal title=title on_close=move |_| close()>
                <p class="version-status">"Status: " {status}</p>
                {empty.then(|| view! { <p class="empty-state">"This version has no items."</p> })}
                {(!empty).then(|| view! {
                    <table class="version-items">
                        <thead>
                            <tr>
                                <th>"Order"</th>
                                <th>"Code"</th>
                                <th>"Display name"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {shown.items.into_iter().map(|item| view! {
                                <tr>
                                    <td class="order">{item.order_label()}</td>
                                    <td><code>{item.code}</code></td>
                                    <td>{item.display_name}</td>
                                </tr>
                            }).collect_view()}
                        </tbody>
                    </table>
                })}
                <div class="modal-actions">
                    <button type="button" on:click=move |_| close()>"Close"</button>
                </div>
            </Modal>
        }
    })
}
