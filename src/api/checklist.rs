//! Checklist Endpoints
//!
//! `ChecklistApi` over HTTP.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::{ChecklistApi, HttpClient};
use crate::error::AppResult;
use crate::models::{
    ChecklistSnapshot, ChecklistVersion, CreateItemRequest, CreateVersionRequest, RenameItemRequest,
    ReorderRequest,
};

/// Unreserved characters stay literal in a path segment
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

fn item_path(code: &str) -> String {
    format!("/checklist/items/{}", utf8_percent_encode(code, PATH_SEGMENT))
}

#[async_trait(?Send)]
impl ChecklistApi for HttpClient {
    async fn active_checklist(&self) -> AppResult<ChecklistSnapshot> {
        self.get_json("/checklist/active").await
    }

    async fn list_versions(&self) -> AppResult<Vec<ChecklistVersion>> {
        self.get_json("/checklist/versions").await
    }

    async fn create_version(&self, request: &CreateVersionRequest) -> AppResult<()> {
        self.execute("POST", "/checklist/versions", Some(request)).await
    }

    async fn activate_version(&self, id: i64) -> AppResult<()> {
        self.execute::<()>("POST", &format!("/checklist/versions/{}/activate", id), None).await
    }

    async fn delete_version(&self, id: i64) -> AppResult<()> {
        self.execute::<()>("DELETE", &format!("/checklist/versions/{}", id), None).await
    }

    async fn version_items(&self, id: i64) -> AppResult<ChecklistSnapshot> {
        self.get_json(&format!("/checklist/versions/{}/items", id)).await
    }

    async fn create_item(&self, request: &CreateItemRequest) -> AppResult<()> {
        self.execute("POST", "/checklist/items", Some(request)).await
    }

    async fn rename_item(&self, code: &str, display_name: &str) -> AppResult<()> {
        let body = RenameItemRequest { display_name: display_name.to_string() };
        self.execute("PATCH", &item_path(code), Some(&body)).await
    }

    async fn delete_item(&self, code: &str) -> AppResult<()> {
        self.execute::<()>("DELETE", &item_path(code), None).await
    }

    async fn reorder(&self, codes: &[String]) -> AppResult<()> {
        let body = ReorderRequest { codes: codes.to_vec() };
        self.execute("POST", "/checklist/reorder", Some(&body)).await
    }
}
