//! Add / Edit Item Dialog

use leptos::prelude::*;

use crate::actions;
use crate::components::Modal;
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

/// Which dialog is open
#[derive(Clone, Debug, PartialEq)]
pub enum ItemDialog {
    Add,
    Edit { code: String, display_name: String },
}

impl ItemDialog {
    /// Only new items take a code; existing codes are fixed
    fn code_editable(&self) -> bool {
        matches!(self, ItemDialog::Add)
    }

    fn title(&self) -> String {
        match self {
            ItemDialog::Add => "Add item".to_string(),
            ItemDialog::Edit { code, .. } => format!("Edit item {}", code),
        }
    }
}

#[component]
pub fn ItemModal(dialog: RwSignal<Option<ItemDialog>>) -> impl IntoView {
    move || dialog.get().map(|current| view! { <ItemForm current=current dialog=dialog /> })
}

#[component]
fn ItemForm(current: ItemDialog, dialog: RwSignal<Option<ItemDialog>>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let title = current.title();
    let editing = !current.code_editable();
    let (initial_code, initial_name) = match current {
        ItemDialog::Add => (String::new(), String::new()),
        ItemDialog::Edit { code, display_name } => (code, display_name),
    };
    let code = RwSignal::new(initial_code);
    let name = RwSignal::new(initial_name);
    let close = move || dialog.set(None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let done = move |ok: bool| {
            if ok {
                dialog.set(None);
            }
        };
        if editing {
            actions::rename_item(ctx, store, code.get_untracked(), name.get_untracked(), done);
        } else {
            actions::add_item(ctx, store, code.get_untracked(), name.get_untracked(), done);
        }
    };

    view! {
        <Modal title=title on_close=move |_| close()>
            <form class="item-form" on:submit=on_submit>
                <Show when=move || !editing>
                    <label>
                        "Code"
                        <input
                            type="text"
                            placeholder="e.g. birth_cert"
                            prop:value=move || code.get()
                            on:input=move |ev| code.set(event_target_value(&ev))
                        />
                    </label>
                    <small class="hint">"Lowercase letters, digits and underscores"</small>
                </Show>
                <label>
                    "Display name"
                    <input
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                </label>
                <div class="modal-actions">
                    <button type="button" on:click=move |_| close()>"Cancel"</button>
                    <button type="submit" class="primary" disabled=move || store.busy().get()>
                        "Save"
                    </button>
                </div>
            </form>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_dialog_hides_code_input() {
        let edit = ItemDialog::Edit { code: "birth_cert".into(), display_name: "Birth certificate".into() };
        assert!(!edit.code_editable());
        assert_eq!(edit.title(), "Edit item birth_cert");
        assert!(ItemDialog::Add.code_editable());
        assert_eq!(ItemDialog::Add.title(), "Add item");
    }
}
