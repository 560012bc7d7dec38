//! Checklist Versions
//!
//! Version list state and the create / activate / delete / view operations.
//! Every successful mutation refreshes both the version list and the items.

use crate::api::ChecklistApi;
use crate::error::{AppError, AppResult};
use crate::models::{sort_items, ChecklistItem, ChecklistVersion, CloneSource, CreateVersionRequest};

use super::editor::ChecklistEditor;
use super::service::{self, Applied};
use super::validation;

/// Shown when the backend cannot flip the active flag
pub const ACTIVATE_SCHEMA_MESSAGE: &str =
    "Cannot activate: the versions table is missing its 'active'/'is_active' column";

/// Known versions and which one is active
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VersionBook {
    versions: Vec<ChecklistVersion>,
    active_id: Option<i64>,
    active_name: Option<String>,
    can_edit: bool,
}

impl VersionBook {
    pub fn new(can_edit: bool) -> Self {
        Self { can_edit, ..Default::default() }
    }

    pub fn versions(&self) -> &[ChecklistVersion] {
        &self.versions
    }

    pub fn active_id(&self) -> Option<i64> {
        self.active_id
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active_name.as_deref()
    }

    pub fn can_edit(&self) -> bool {
        self.can_edit
    }

    pub fn set_can_edit(&mut self, can_edit: bool) {
        self.can_edit = can_edit;
    }

    /// The active id reported by `/checklist/active` wins over per-row flags
    pub fn is_active(&self, version: &ChecklistVersion) -> bool {
        match self.active_id {
            Some(id) => id == version.id,
            None => version.flagged_active(),
        }
    }

    pub fn is_active_id(&self, id: i64) -> bool {
        self.versions.iter().find(|v| v.id == id).map_or(self.active_id == Some(id), |v| self.is_active(v))
    }

    pub fn can_activate(&self, version: &ChecklistVersion) -> bool {
        self.can_edit && !self.is_active(version)
    }

    pub fn can_delete(&self, version: &ChecklistVersion) -> bool {
        self.can_edit && !self.is_active(version)
    }

    pub fn name_of(&self, id: i64) -> Option<&str> {
        self.versions.iter().find(|v| v.id == id).map(|v| v.version_name.as_str())
    }

    /// `(value, label)` pairs for the "clone from" select
    pub fn clone_options(&self) -> Vec<(String, String)> {
        let mut options = vec![(String::from(CloneSource::Active), "Active version".to_string())];
        options.extend(
            self.versions
                .iter()
                .map(|v| (v.id.to_string(), format!("{} (id {})", v.version_name, v.id))),
        );
        options
    }
}

/// Input of the create-version form
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewVersion {
    pub name: String,
    pub clone_from: CloneSource,
    pub activate: bool,
}

/// Read-only listing of one version
#[derive(Clone, Debug, PartialEq)]
pub struct VersionView {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
    pub items: Vec<ChecklistItem>,
}

impl VersionView {
    pub fn status_label(&self) -> &'static str {
        if self.is_active { "Active" } else { "Inactive" }
    }
}

fn ensure_editable(book: &VersionBook) -> AppResult<()> {
    if book.can_edit { Ok(()) } else { Err(AppError::ReadOnly) }
}

/// Reload the active version header and the version list.
/// A failed list leaves the book empty.
pub async fn refresh(api: &impl ChecklistApi, book: &mut VersionBook) -> AppResult<()> {
    match api.active_checklist().await {
        Ok(active) => {
            book.active_id = active.version_id;
            book.active_name = active.version_name;
        }
        Err(e) => {
            log::warn!(target: "versions", "active version lookup failed: {}", e);
            book.active_id = None;
            book.active_name = None;
        }
    }

    match api.list_versions().await {
        Ok(versions) => {
            book.versions = versions;
            if book.active_id.is_none() {
                if let Some(flagged) = book.versions.iter().find(|v| v.flagged_active()) {
                    book.active_id = Some(flagged.id);
                    book.active_name = Some(flagged.version_name.clone());
                }
            }
            Ok(())
        }
        Err(e) => {
            book.versions.clear();
            Err(e)
        }
    }
}

/// Refresh the version list and the working list together.
/// Both are attempted; the first failure is reported.
pub async fn reload_all(api: &impl ChecklistApi, book: &mut VersionBook, editor: &mut ChecklistEditor) -> AppResult<()> {
    let versions = refresh(api, book).await;
    let items = service::load(api, editor).await;
    versions.and(items)
}

pub async fn create(
    api: &impl ChecklistApi,
    book: &mut VersionBook,
    editor: &mut ChecklistEditor,
    form: &NewVersion,
) -> AppResult<Applied> {
    ensure_editable(book)?;
    let request = CreateVersionRequest {
        version_name: validation::version_name(&form.name)?,
        clone_from: form.clone_from,
        activate: form.activate,
    };
    api.create_version(&request).await?;
    log::info!(target: "versions", "created version '{}'", request.version_name);
    Ok(Applied::after(reload_all(api, book, editor).await))
}

pub async fn activate(
    api: &impl ChecklistApi,
    book: &mut VersionBook,
    editor: &mut ChecklistEditor,
    id: i64,
) -> AppResult<Applied> {
    ensure_editable(book)?;
    api.activate_version(id).await.map_err(|e| match e.status() {
        Some(400) => AppError::Api { status: 400, message: ACTIVATE_SCHEMA_MESSAGE.to_string() },
        _ => e,
    })?;
    log::info!(target: "versions", "activated version {}", id);
    Ok(Applied::after(reload_all(api, book, editor).await))
}

/// Delete an inactive version. The active one is refused before any request.
pub async fn delete(
    api: &impl ChecklistApi,
    book: &mut VersionBook,
    editor: &mut ChecklistEditor,
    id: i64,
) -> AppResult<Applied> {
    ensure_editable(book)?;
    if book.is_active_id(id) {
        return Err(AppError::ActiveVersionLocked);
    }
    api.delete_version(id).await?;
    log::info!(target: "versions", "deleted version {}", id);
    Ok(Applied::after(reload_all(api, book, editor).await))
}

/// Fetch any version's items for the read-only view. The working list is untouched.
pub async fn view_version(api: &impl ChecklistApi, book: &VersionBook, id: i64) -> AppResult<VersionView> {
    let snapshot = api.version_items(id).await?;
    let name = snapshot
        .version_name
        .clone()
        .or_else(|| book.name_of(id).map(str::to_string))
        .unwrap_or_else(|| format!("Version {}", id));
    let is_active = snapshot.is_active.unwrap_or_else(|| book.is_active_id(id));
    Ok(VersionView {
        id,
        name,
        is_active,
        items: sort_items(snapshot.items),
    })
}
