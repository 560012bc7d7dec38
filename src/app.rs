//! Checklist Admin App
//!
//! Page shell: header, item table, version panel and the modals.

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::actions;
use crate::api::HttpClient;
use crate::components::{
    ApiBaseField, ItemDialog, ItemModal, ItemTable, RoleBanner, ToastHost, UserMenu, VersionPanel,
    VersionViewModal,
};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::store::{AppState, AppStateStoreFields, AppStore};

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let ctx = AppContext::new(HttpClient::new(&config));
    let store: AppStore = Store::new(AppState::default());
    provide_context(ctx);
    provide_context(store);

    let dialog = RwSignal::new(None::<ItemDialog>);

    // Browser prompt when leaving with an unsaved order
    let _ = window_event_listener(ev::beforeunload, move |ev| {
        if store.editor().with_untracked(|e| e.is_dirty()) {
            ev.prevent_default();
            ev.set_return_value("");
        }
    });

    actions::show_expired_notice(ctx);
    spawn_local(actions::boot(ctx, store));

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Document checklist"</h1>
                <ApiBaseField />
                <button
                    class="reload-btn"
                    title="Reload"
                    disabled=move || store.busy().get()
                    on:click=move |_| actions::reload(ctx, store)
                >
                    "⟳"
                </button>
                <UserMenu />
            </header>

            <RoleBanner />

            <main class="main-content">
                <section class="panel">
                    <ItemTable dialog=dialog />
                </section>
                <section class="panel">
                    <VersionPanel />
                </section>
            </main>

            <ItemModal dialog=dialog />
            <VersionViewModal />
            <ToastHost />
        </div>
    }
}
