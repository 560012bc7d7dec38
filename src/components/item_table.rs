//! Checklist Item Table Component
//!
//! Ordered rows of the active version with reorder controls.
//! Rows render from the editor model; the DOM is never read back for order.
//! Reordering works with the arrow buttons, with ArrowUp/ArrowDown/Home/End on
//! a row's handle, and by dragging the handle (leptos-dragdrop).

use leptos::prelude::*;

use leptos_dragdrop::*;

use crate::actions;
use crate::browser;
use crate::checklist::{ChecklistEditor, KeyCommand};
use crate::components::ItemDialog;
use crate::context::use_app_context;
use crate::store::{store_locked, use_app_store, AppStateStoreFields, AppStore};

/// Whether the row at `index` has a row below it
fn can_move_down(index: usize, len: usize) -> bool {
    index + 1 < len
}

/// Focus a row's handle once the moved row has re-rendered
fn focus_handle(code: String) {
    browser::after_render(move || browser::focus_selector(&format!(".drag-handle[data-code=\"{}\"]", code)));
}

/// Run a model move on the row `code`; keeps focus on the moved row
fn move_row(store: AppStore, code: &str, op: impl FnOnce(&mut ChecklistEditor, usize) -> Option<usize>) {
    if store.busy().get_untracked() {
        return;
    }
    let Some(index) = store.editor().with_untracked(|e| e.position_of(code)) else { return };
    let moved = op(&mut store.editor().write(), index);
    if moved.is_some() {
        focus_handle(code.to_string());
    }
}

#[component]
pub fn ItemTable(dialog: RwSignal<Option<ItemDialog>>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let locked = move || store_locked(&store);

    let dnd = create_dnd_signals();

    bind_global_mouseup(
        dnd,
        move |code| {
            if store.busy().get_untracked() || !store.editor().write().begin_drag(&code) {
                end_drag(&dnd);
                return;
            }
            log::debug!(target: "dnd", "drag start {}", code);
        },
        move |code, target| {
            let field = store.editor();
            let mut editor = field.write();
            match target {
                Some(_) => {
                    let changed = editor.finish_drag();
                    log::debug!(target: "dnd", "drop {} (changed: {})", code, changed);
                }
                None => {
                    editor.cancel_drag();
                    log::debug!(target: "dnd", "drag of {} cancelled", code);
                }
            }
        },
    );

    let on_list_mousemove = make_on_list_mousemove(dnd, move |_dragged, target| {
        store.editor().write().drag_over(&target.key, target.placement);
    });
    let on_list_mouseleave = make_on_list_mouseleave(dnd);

    let rows = move || {
        store.editor().with(|e| {
            e.items()
                .iter()
                .enumerate()
                .map(|(i, item)| (i, item.clone()))
                .collect::<Vec<_>>()
        })
    };
    let count = move || store.editor().with(|e| e.len());
    let dirty = move || store.editor().with(|e| e.is_dirty());
    let can_save = move || store.editor().with(|e| e.can_save()) && !store.busy().get();

    view! {
        <div class="item-table">
            <div class="panel-header">
                <h2>
                    "Checklist items"
                    {move || store.editor().with(|e| e.version_name().map(|n| format!(" · {}", n)))}
                </h2>
                <div class="panel-actions">
                    <Show when=dirty>
                        <span class="dirty-badge">"Unsaved order"</span>
                    </Show>
                    <button
                        class="primary"
                        disabled=move || !can_save()
                        on:click=move |_| actions::save_order(ctx, store)
                    >
                        "Save order"
                    </button>
                    <button disabled=locked on:click=move |_| dialog.set(Some(ItemDialog::Add))>
                        "Add item"
                    </button>
                </div>
            </div>

            <Show
                when=move || { count() > 0 }
                fallback=move || {
                    let loaded = store.editor().with(|e| e.is_loaded());
                    view! {
                        <p class="empty-state">
                            {if loaded { "No checklist items in the active version." } else { "Checklist not loaded." }}
                        </p>
                    }
                }
            >
                <table class="items" on:mousemove=on_list_mousemove.clone() on:mouseleave=on_list_mouseleave>
                    <thead>
                        <tr>
                            <th></th>
                            <th>"#"</th>
                            <th>"Code"</th>
                            <th>"Display name"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=rows
                            key=|(i, item)| (*i, item.code.clone(), item.display_name.clone())
                            children=move |(index, item)| {
                                let code = item.code.clone();

                                let on_handle_mousedown = make_on_handle_mousedown(dnd, code.clone());
                                let on_handle_keydown = {
                                    let code = code.clone();
                                    move |ev: web_sys::KeyboardEvent| {
                                        let Some(command) = KeyCommand::from_key(&ev.key()) else { return };
                                        ev.prevent_default();
                                        if locked() {
                                            return;
                                        }
                                        move_row(store, &code, |e, i| e.apply_key(i, command));
                                    }
                                };

                                let row_class = {
                                    let code = code.clone();
                                    move || {
                                        let mut c = String::from("item-row");
                                        if dnd.is_dragging(&code) { c.push_str(" dragging"); }
                                        c
                                    }
                                };

                                let up_code = code.clone();
                                let down_code = code.clone();
                                let edit_item = item.clone();
                                let delete_code = code.clone();

                                view! {
                                    <tr class=row_class data-drag-key=code.clone()>
                                        <td>
                                            <span
                                                class="drag-handle"
                                                role="button"
                                                aria-label=format!("Reorder {}", item.display_name)
                                                data-code=code.clone()
                                                tabindex=move || if locked() { "-1" } else { "0" }
                                                aria-disabled=move || locked().to_string()
                                                on:mousedown=move |ev| if !locked() { on_handle_mousedown(ev) }
                                                on:keydown=on_handle_keydown
                                            >
                                                "⋮⋮"
                                            </span>
                                        </td>
                                        <td class="order">{index + 1}</td>
                                        <td class="code">{code.clone()}</td>
                                        <td>{item.display_name.clone()}</td>
                                        <td class="row-actions">
                                            <button
                                                title="Move up"
                                                disabled=move || locked() || index == 0
                                                on:click=move |_| move_row(store, &up_code, |e, i| e.move_up(i))
                                            >
                                                "↑"
                                            </button>
                                            <button
                                                title="Move down"
                                                disabled=move || { locked() || !can_move_down(index, count()) }
                                                on:click=move |_| move_row(store, &down_code, |e, i| e.move_down(i))
                                            >
                                                "↓"
                                            </button>
                                            <button
                                                disabled=locked
                                                on:click=move |_| dialog.set(Some(ItemDialog::Edit {
                                                    code: edit_item.code.clone(),
                                                    display_name: edit_item.display_name.clone(),
                                                }))
                                            >
                                                "Edit"
                                            </button>
                                            <button
                                                class="danger"
                                                disabled=locked
                                                on:click=move |_| actions::delete_item(ctx, store, delete_code.clone())
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
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_move_down() {
        assert!(can_move_down(0, 3));
        assert!(can_move_down(1, 3));
        assert!(!can_move_down(2, 3));
        assert!(!can_move_down(0, 1));
        assert!(!can_move_down(0, 0));
    }
}
