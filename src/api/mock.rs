//! In-memory checklist backend for tests

use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;

use super::{ChecklistApi, SessionApi};
use crate::error::{AppError, AppResult};
use crate::models::{
    ChecklistItem, ChecklistSnapshot, ChecklistVersion, CloneSource, CreateItemRequest,
    CreateVersionRequest, CurrentUser,
};

struct StoredVersion {
    id: i64,
    name: String,
    items: Vec<ChecklistItem>,
}

#[derive(Default)]
struct MockState {
    versions: Vec<StoredVersion>,
    active_id: i64,
    calls: Vec<String>,
    failures: HashMap<&'static str, AppError>,
    user: CurrentUser,
}

/// Backend double that behaves like the real server and records every call
pub struct MockApi {
    state: RefCell<MockState>,
}

impl MockApi {
    /// One active version (id 1) holding the given codes in order
    pub fn with_items(codes: &[&str]) -> Self {
        let items = codes
            .iter()
            .enumerate()
            .map(|(i, c)| ChecklistItem::new(c, &format!("Item {}", c), (i as i64 + 1) * 10))
            .collect();
        let state = MockState {
            versions: vec![StoredVersion { id: 1, name: "2025".to_string(), items }],
            active_id: 1,
            ..Default::default()
        };
        Self { state: RefCell::new(state) }
    }

    /// Add an inactive version
    pub fn add_version(&self, id: i64, name: &str, codes: &[&str]) {
        let items = codes
            .iter()
            .enumerate()
            .map(|(i, c)| ChecklistItem::new(c, c, i as i64))
            .collect();
        self.state.borrow_mut().versions.push(StoredVersion { id, name: name.to_string(), items });
    }

    pub fn set_user(&self, user: CurrentUser) {
        self.state.borrow_mut().user = user;
    }

    /// Make the named operation fail with `error` from now on
    pub fn fail(&self, op: &'static str, error: AppError) {
        self.state.borrow_mut().failures.insert(op, error);
    }

    pub fn heal(&self, op: &'static str) {
        self.state.borrow_mut().failures.remove(op);
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn active_id(&self) -> i64 {
        self.state.borrow().active_id
    }

    pub fn version_ids(&self) -> Vec<i64> {
        self.state.borrow().versions.iter().map(|v| v.id).collect()
    }

    /// Codes of the active version in server order
    pub fn active_codes(&self) -> Vec<String> {
        let state = self.state.borrow();
        let active = state.versions.iter().find(|v| v.id == state.active_id);
        active.map(|v| v.items.iter().map(|i| i.code.clone()).collect()).unwrap_or_default()
    }

    fn enter(&self, op: &'static str, detail: String) -> AppResult<()> {
        let mut state = self.state.borrow_mut();
        state.calls.push(if detail.is_empty() { op.to_string() } else { format!("{} {}", op, detail) });
        match state.failures.get(op) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn snapshot(version: &StoredVersion, active_id: i64) -> ChecklistSnapshot {
        ChecklistSnapshot {
            version_id: Some(version.id),
            version_name: Some(version.name.clone()),
            items: version.items.clone(),
            is_active: Some(version.id == active_id),
        }
    }

    fn not_found() -> AppError {
        AppError::Api { status: 404, message: "Not found".to_string() }
    }
}

#[async_trait(?Send)]
impl ChecklistApi for MockApi {
    async fn active_checklist(&self) -> AppResult<ChecklistSnapshot> {
        self.enter("active", String::new())?;
        let state = self.state.borrow();
        let version = state.versions.iter().find(|v| v.id == state.active_id).ok_or_else(Self::not_found)?;
        // Served in storage order; the client sorts
        let mut snapshot = Self::snapshot(version, state.active_id);
        snapshot.items.reverse();
        snapshot.is_active = None;
        Ok(snapshot)
    }

    async fn list_versions(&self) -> AppResult<Vec<ChecklistVersion>> {
        self.enter("versions", String::new())?;
        let state = self.state.borrow();
        Ok(state
            .versions
            .iter()
            .map(|v| ChecklistVersion {
                id: v.id,
                version_name: v.name.clone(),
                is_active: Some(v.id == state.active_id),
                active: None,
            })
            .collect())
    }

    async fn create_version(&self, request: &CreateVersionRequest) -> AppResult<()> {
        self.enter("create_version", request.version_name.clone())?;
        let mut state = self.state.borrow_mut();
        let source_id = match request.clone_from {
            CloneSource::Active => state.active_id,
            CloneSource::Version(id) => id,
        };
        let items = state
            .versions
            .iter()
            .find(|v| v.id == source_id)
            .map(|v| v.items.clone())
            .ok_or_else(Self::not_found)?;
        let id = state.versions.iter().map(|v| v.id).max().unwrap_or(0) + 1;
        state.versions.push(StoredVersion { id, name: request.version_name.clone(), items });
        if request.activate {
            state.active_id = id;
        }
        Ok(())
    }

    async fn activate_version(&self, id: i64) -> AppResult<()> {
        self.enter("activate", id.to_string())?;
        let mut state = self.state.borrow_mut();
        if !state.versions.iter().any(|v| v.id == id) {
            return Err(Self::not_found());
        }
        state.active_id = id;
        Ok(())
    }

    async fn delete_version(&self, id: i64) -> AppResult<()> {
        self.enter("delete_version", id.to_string())?;
        let mut state = self.state.borrow_mut();
        if state.active_id == id {
            return Err(AppError::Api { status: 409, message: "Cannot delete the active version".to_string() });
        }
        let before = state.versions.len();
        state.versions.retain(|v| v.id != id);
        if state.versions.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }

    async fn version_items(&self, id: i64) -> AppResult<ChecklistSnapshot> {
        self.enter("version_items", id.to_string())?;
        let state = self.state.borrow();
        let version = state.versions.iter().find(|v| v.id == id).ok_or_else(Self::not_found)?;
        Ok(Self::snapshot(version, state.active_id))
    }

    async fn create_item(&self, request: &CreateItemRequest) -> AppResult<()> {
        self.enter("create_item", request.code.clone())?;
        let mut state = self.state.borrow_mut();
        let active_id = state.active_id;
        let version = state.versions.iter_mut().find(|v| v.id == active_id).ok_or_else(Self::not_found)?;
        if version.items.iter().any(|i| i.code == request.code) {
            return Err(AppError::Api { status: 409, message: "Code already exists".to_string() });
        }
        let next = version.items.iter().map(ChecklistItem::sort_key).max().unwrap_or(0) + 10;
        version.items.push(ChecklistItem::new(&request.code, &request.display_name, next));
        Ok(())
    }

    async fn rename_item(&self, code: &str, display_name: &str) -> AppResult<()> {
        self.enter("rename_item", code.to_string())?;
        let mut state = self.state.borrow_mut();
        let active_id = state.active_id;
        let item = state
            .versions
            .iter_mut()
            .find(|v| v.id == active_id)
            .and_then(|v| v.items.iter_mut().find(|i| i.code == code))
            .ok_or_else(Self::not_found)?;
        item.display_name = display_name.to_string();
        Ok(())
    }

    async fn delete_item(&self, code: &str) -> AppResult<()> {
        self.enter("delete_item", code.to_string())?;
        let mut state = self.state.borrow_mut();
        let active_id = state.active_id;
        let version = state.versions.iter_mut().find(|v| v.id == active_id).ok_or_else(Self::not_found)?;
        let before = version.items.len();
        version.items.retain(|i| i.code != code);
        if version.items.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }

    async fn reorder(&self, codes: &[String]) -> AppResult<()> {
        self.enter("reorder", codes.join(","))?;
        let mut state = self.state.borrow_mut();
        let active_id = state.active_id;
        let version = state.versions.iter_mut().find(|v| v.id == active_id).ok_or_else(Self::not_found)?;

        let mut current: Vec<&str> = version.items.iter().map(|i| i.code.as_str()).collect();
        let mut submitted: Vec<&str> = codes.iter().map(String::as_str).collect();
        current.sort_unstable();
        submitted.sort_unstable();
        if current != submitted {
            return Err(AppError::Api { status: 422, message: "codes must list every item once".to_string() });
        }

        let mut reordered = Vec::with_capacity(codes.len());
        for (pos, code) in codes.iter().enumerate() {
            if let Some(idx) = version.items.iter().position(|i| &i.code == code) {
                let mut item = version.items.remove(idx);
                // Server assigns its own dense, one-based indices
                item.order_index = Some(pos as i64 + 1);
                item.order_no = None;
                reordered.push(item);
            }
        }
        version.items = reordered;
        Ok(())
    }
}

#[async_trait(?Send)]
impl SessionApi for MockApi {
    async fn me(&self) -> AppResult<CurrentUser> {
        self.enter("me", String::new())?;
        Ok(self.state.borrow().user.clone())
    }

    async fn logout(&self) -> AppResult<()> {
        self.enter("logout", String::new())
    }
}
