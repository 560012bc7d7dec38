//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::checklist::{ChecklistEditor, VersionBook, VersionView};
use crate::session::Session;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Signed-in user, once `/me` answered
    pub session: Option<Session>,
    /// Working list of the active version
    pub editor: ChecklistEditor,
    /// Version list
    pub versions: VersionBook,
    /// Version shown in the read-only modal
    pub viewing: Option<VersionView>,
    /// A mutating request is in flight; mutating controls are disabled
    pub busy: bool,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Apply the session's edit rights to every state object
pub fn store_set_session(store: &AppStore, session: Session) {
    let can_edit = session.can_edit();
    store.editor().write().set_can_edit(can_edit);
    store.versions().write().set_can_edit(can_edit);
    store.session().set(Some(session));
}

/// Whether the current user may change anything (tracked)
pub fn store_can_edit(store: &AppStore) -> bool {
    store.session().with(|s| s.as_ref().is_some_and(Session::can_edit))
}

/// Whether mutating controls should render disabled (tracked)
pub fn store_locked(store: &AppStore) -> bool {
    !store_can_edit(store) || store.busy().get()
}
