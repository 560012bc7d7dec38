//! API base input in the header

use leptos::prelude::*;

use crate::actions;
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ApiBaseField() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    view! {
        <label class="api-base">
            "API"
            <input
                type="url"
                spellcheck="false"
                prop:value=move || ctx.api.base_url()
                disabled=move || store.busy().get()
                on:change=move |ev| actions::change_api_base(ctx, store, event_target_value(&ev))
            />
        </label>
    }
}
