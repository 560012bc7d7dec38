//! UI Actions
//!
//! Bridges between components and the checklist services. Each action copies
//! the state it needs out of the store, awaits the service, writes the state
//! back and reports the outcome as a toast. `busy` is held for the duration,
//! reloads included, so no two requests write the same store field.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{SessionApi, LOGIN_URL};
use crate::browser;
use crate::config;
use crate::checklist::{service, versions, NewVersion};
use crate::context::{AppContext, ToastKind, NOTICE_MS};
use crate::session;
use crate::store::{store_set_session, AppStore, AppStateStoreFields};

/// Take a free flag; false when it is already held
fn try_claim(busy: &mut bool) -> bool {
    if *busy {
        return false;
    }
    *busy = true;
    true
}

/// Claim the busy flag; false when another request is still pending
fn claim(store: AppStore) -> bool {
    let mut busy = store.busy().get_untracked();
    if !try_claim(&mut busy) {
        return false;
    }
    store.busy().set(busy);
    true
}

fn release(store: AppStore) {
    store.busy().set(false);
}

/// Detect the API prefix, resolve the user and load both lists
pub async fn boot(ctx: AppContext, store: AppStore) {
    if !claim(store) {
        return;
    }
    ctx.api.detect_prefix().await;

    let session = match session::establish(&ctx.api).await {
        Ok(session) => session,
        Err(e) => {
            if !e.is_silent() {
                log::warn!(target: "app", "no session ({}), redirecting to login", e);
                browser::navigate(LOGIN_URL);
            }
            release(store);
            return;
        }
    };
    store_set_session(&store, session);
    reload_all(ctx, store).await;
    release(store);
}

/// Callers hold `busy`
async fn reload_all(ctx: AppContext, store: AppStore) {
    let mut book = store.versions().get_untracked();
    let mut editor = store.editor().get_untracked();
    let versions_result = versions::refresh(&ctx.api, &mut book).await;
    let items_result = service::load(&ctx.api, &mut editor).await;
    store.versions().set(book);
    store.editor().set(editor);
    ctx.report(versions_result, "Load versions failed");
    ctx.report(items_result, "Load checklist failed");
}

pub fn reload(ctx: AppContext, store: AppStore) {
    if !claim(store) {
        return;
    }
    spawn_local(async move {
        reload_all(ctx, store).await;
        release(store);
    });
}

pub fn save_order(ctx: AppContext, store: AppStore) {
    if !claim(store) {
        return;
    }
    spawn_local(async move {
        let mut editor = store.editor().get_untracked();
        let result = service::save(&ctx.api, &mut editor).await;
        store.editor().set(editor);
        release(store);
        ctx.report_applied(result, "Order saved", "Save order failed");
    });
}

/// `on_done(true)` once the backend accepted the new item
pub fn add_item(ctx: AppContext, store: AppStore, code: String, name: String, on_done: impl FnOnce(bool) + 'static) {
    if !claim(store) {
        return;
    }
    spawn_local(async move {
        let mut editor = store.editor().get_untracked();
        let result = service::add_item(&ctx.api, &mut editor, &code, &name).await;
        store.editor().set(editor);
        release(store);
        on_done(ctx.report_applied(result, "Item added", "Add item failed"));
    });
}

pub fn rename_item(ctx: AppContext, store: AppStore, code: String, name: String, on_done: impl FnOnce(bool) + 'static) {
    if !claim(store) {
        return;
    }
    spawn_local(async move {
        let mut editor = store.editor().get_untracked();
        let result = service::rename_item(&ctx.api, &mut editor, &code, &name).await;
        store.editor().set(editor);
        release(store);
        on_done(ctx.report_applied(result, "Item updated", "Update item failed"));
    });
}

/// Asks for confirmation first, twice when there is an unsaved order
pub fn delete_item(ctx: AppContext, store: AppStore, code: String) {
    let dirty = store.editor().with_untracked(|e| e.is_dirty());
    if dirty && !browser::confirm("You have unsaved order changes that will be lost. Continue?") {
        return;
    }
    if !browser::confirm(&format!("Delete item '{}'?", code)) {
        return;
    }
    if !claim(store) {
        return;
    }
    spawn_local(async move {
        let mut editor = store.editor().get_untracked();
        let result = service::delete_item(&ctx.api, &mut editor, &code).await;
        store.editor().set(editor);
        release(store);
        ctx.report_applied(result, "Item deleted", "Delete item failed");
    });
}

pub fn create_version(ctx: AppContext, store: AppStore, form: NewVersion, on_done: impl FnOnce(bool) + 'static) {
    if !claim(store) {
        return;
    }
    spawn_local(async move {
        let mut book = store.versions().get_untracked();
        let mut editor = store.editor().get_untracked();
        let result = versions::create(&ctx.api, &mut book, &mut editor, &form).await;
        store.versions().set(book);
        store.editor().set(editor);
        release(store);
        on_done(ctx.report_applied(result, "Version created", "Create version failed"));
    });
}

pub fn activate_version(ctx: AppContext, store: AppStore, id: i64) {
    if !claim(store) {
        return;
    }
    spawn_local(async move {
        let mut book = store.versions().get_untracked();
        let mut editor = store.editor().get_untracked();
        let result = versions::activate(&ctx.api, &mut book, &mut editor, id).await;
        store.versions().set(book);
        store.editor().set(editor);
        release(store);
        ctx.report_applied(result, "Version activated", "Activate failed");
    });
}

pub fn delete_version(ctx: AppContext, store: AppStore, id: i64) {
    let name = store.versions().with_untracked(|b| b.name_of(id).map(str::to_string));
    let label = name.unwrap_or_else(|| format!("#{}", id));
    if !browser::confirm(&format!("Delete version '{}'? This cannot be undone.", label)) {
        return;
    }
    if !claim(store) {
        return;
    }
    spawn_local(async move {
        let mut book = store.versions().get_untracked();
        let mut editor = store.editor().get_untracked();
        let result = versions::delete(&ctx.api, &mut book, &mut editor, id).await;
        store.versions().set(book);
        store.editor().set(editor);
        release(store);
        ctx.report_applied(result, "Version deleted", "Delete version failed");
    });
}

/// Open the read-only modal for a version
pub fn view_version(ctx: AppContext, store: AppStore, id: i64) {
    spawn_local(async move {
        let book = store.versions().get_untracked();
        if let Some(view) = ctx.report(versions::view_version(&ctx.api, &book, id).await, "Load version failed") {
            store.viewing().set(Some(view));
        }
    });
}

/// Logout errors are ignored; the user lands on the login page either way
pub fn logout(ctx: AppContext) {
    spawn_local(async move {
        if let Err(e) = ctx.api.logout().await {
            log::warn!(target: "session", "logout failed: {}", e);
        }
        browser::navigate(LOGIN_URL);
    });
}

/// Show the session-expired notice left by a previous 401
pub fn show_expired_notice(ctx: AppContext) {
    if browser::take_session_expired_notice() {
        ctx.toast_for(ToastKind::Warn, "Your session expired. Please sign in again.", NOTICE_MS);
    }
}

/// Point the client at a new backend origin and start over
pub fn change_api_base(ctx: AppContext, store: AppStore, raw: String) {
    if !claim(store) {
        ctx.toast(ToastKind::Info, "A request is still running. Change the API base once it finishes.");
        return;
    }
    let base = config::save_api_base(&raw);
    if base.is_empty() || base == ctx.api.base_url_untracked() {
        release(store);
        return;
    }
    log::info!(target: "app", "API base changed to {}", base);
    ctx.api.set_base_url(base);
    spawn_local(async move {
        ctx.api.detect_prefix().await;
        reload_all(ctx, store).await;
        release(store);
    });
}
