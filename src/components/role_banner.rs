//! Read-only notice for non-admin users

use leptos::prelude::*;

use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn RoleBanner() -> impl IntoView {
    let store = use_app_store();

    move || {
        store.session().get().filter(|s| !s.can_edit()).map(|session| view! {
            <div class="role-banner" role="note">
                "Signed in as " <strong>{session.roles_label()}</strong>
                ". The checklist is read-only; only administrators can change it."
            </div>
        })
    }
}
