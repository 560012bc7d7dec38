//! Checklist item operations
//!
//! Each mutation confirms with the backend first and then reloads the
//! working list; membership never changes optimistically.

use crate::api::ChecklistApi;
use crate::error::{AppError, AppResult};
use crate::models::CreateItemRequest;

use super::editor::ChecklistEditor;
use super::validation;

/// A mutation the backend accepted, plus the outcome of the reload after it
#[must_use]
#[derive(Debug, PartialEq)]
pub struct Applied {
    pub reload: AppResult<()>,
}

impl Applied {
    pub fn after(reload: AppResult<()>) -> Self {
        Self { reload }
    }
}

fn ensure_editable(editor: &ChecklistEditor) -> AppResult<()> {
    if editor.can_edit() {
        Ok(())
    } else {
        Err(AppError::ReadOnly)
    }
}

/// Fetch the active version and replace the working list.
/// On failure a previously loaded list is kept as is.
pub async fn load(api: &impl ChecklistApi, editor: &mut ChecklistEditor) -> AppResult<()> {
    match api.active_checklist().await {
        Ok(snapshot) => {
            log::debug!(target: "checklist", "loaded {} items", snapshot.items.len());
            editor.replace(snapshot);
            Ok(())
        }
        Err(e) => {
            log::warn!(target: "checklist", "load failed: {}", e);
            editor.load_failed();
            Err(e)
        }
    }
}

/// Post the full working order. Dirty and order survive a failure.
pub async fn save(api: &impl ChecklistApi, editor: &mut ChecklistEditor) -> AppResult<Applied> {
    ensure_editable(editor)?;
    if !editor.is_dirty() {
        return Ok(Applied::after(Ok(())));
    }
    let codes = editor.codes();
    log::info!(target: "checklist", "saving order of {} items", codes.len());
    api.reorder(&codes).await?;
    editor.mark_saved();
    Ok(Applied::after(load(api, editor).await))
}

pub async fn add_item(
    api: &impl ChecklistApi,
    editor: &mut ChecklistEditor,
    code: &str,
    display_name: &str,
) -> AppResult<Applied> {
    ensure_editable(editor)?;
    let code = validation::item_code(code)?;
    let display_name = validation::display_name(display_name)?;
    api.create_item(&CreateItemRequest { code, display_name }).await?;
    Ok(Applied::after(load(api, editor).await))
}

pub async fn rename_item(
    api: &impl ChecklistApi,
    editor: &mut ChecklistEditor,
    code: &str,
    display_name: &str,
) -> AppResult<Applied> {
    ensure_editable(editor)?;
    let display_name = validation::display_name(display_name)?;
    api.rename_item(code, &display_name).await?;
    Ok(Applied::after(load(api, editor).await))
}

pub async fn delete_item(api: &impl ChecklistApi, editor: &mut ChecklistEditor, code: &str) -> AppResult<Applied> {
    ensure_editable(editor)?;
    api.delete_item(code).await?;
    log::info!(target: "checklist", "deleted item {}", code);
    Ok(Applied::after(load(api, editor).await))
}
