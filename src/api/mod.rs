//! Backend API
//!
//! REST bindings for the checklist admin page, organized by domain.
//! The traits are the seam between page logic and the network.

mod http;
mod checklist;
mod session;

#[cfg(test)]
pub mod mock;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{
    ChecklistSnapshot, ChecklistVersion, CreateItemRequest, CreateVersionRequest, CurrentUser,
};

pub use http::{HttpClient, LOGIN_URL};

/// Checklist endpoints
#[async_trait(?Send)]
pub trait ChecklistApi {
    /// `GET /checklist/active`
    async fn active_checklist(&self) -> AppResult<ChecklistSnapshot>;

    /// `GET /checklist/versions`
    async fn list_versions(&self) -> AppResult<Vec<ChecklistVersion>>;

    /// `POST /checklist/versions`
    async fn create_version(&self, request: &CreateVersionRequest) -> AppResult<()>;

    /// `POST /checklist/versions/{id}/activate`
    async fn activate_version(&self, id: i64) -> AppResult<()>;

    /// `DELETE /checklist/versions/{id}`
    async fn delete_version(&self, id: i64) -> AppResult<()>;

    /// `GET /checklist/versions/{id}/items`
    async fn version_items(&self, id: i64) -> AppResult<ChecklistSnapshot>;

    /// `POST /checklist/items`
    async fn create_item(&self, request: &CreateItemRequest) -> AppResult<()>;

    /// `PATCH /checklist/items/{code}`
    async fn rename_item(&self, code: &str, display_name: &str) -> AppResult<()>;

    /// `DELETE /checklist/items/{code}`
    async fn delete_item(&self, code: &str) -> AppResult<()>;

    /// `POST /checklist/reorder` with the full ordered code list
    async fn reorder(&self, codes: &[String]) -> AppResult<()>;
}

/// Session endpoints
#[async_trait(?Send)]
pub trait SessionApi {
    /// `GET /me`
    async fn me(&self) -> AppResult<CurrentUser>;

    /// `POST /logout`
    async fn logout(&self) -> AppResult<()>;
}
