//! Frontend Models
//!
//! Data structures matching backend payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Checklist item (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub code: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i64>,
    /// Older backends send `order_no` instead of `order_index`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_no: Option<i64>,
}

impl ChecklistItem {
    pub fn new(code: &str, display_name: &str, order_index: i64) -> Self {
        Self {
            code: code.to_string(),
            display_name: display_name.to_string(),
            order_index: Some(order_index),
            order_no: None,
        }
    }

    pub fn sort_key(&self) -> i64 {
        self.order_index.or(self.order_no).unwrap_or(0)
    }

    /// Stored position as shown to admins, `-` when the backend sent none
    pub fn order_label(&self) -> String {
        self.order_index.or(self.order_no).map_or_else(|| "-".to_string(), |n| n.to_string())
    }
}

/// Sort items by their server order, keeping arrival order for ties
pub fn sort_items(mut items: Vec<ChecklistItem>) -> Vec<ChecklistItem> {
    items.sort_by_key(ChecklistItem::sort_key);
    items
}

/// A version with its items, as returned by `/checklist/active`
/// and `/checklist/versions/{id}/items`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChecklistSnapshot {
    #[serde(default)]
    pub version_id: Option<i64>,
    #[serde(default)]
    pub version_name: Option<String>,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Checklist version (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistVersion {
    pub id: i64,
    #[serde(default)]
    pub version_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// Some backends name the flag `active`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl ChecklistVersion {
    /// Whether the payload itself marks this version active
    pub fn flagged_active(&self) -> bool {
        self.is_active == Some(true) || self.active == Some(true)
    }
}

/// Source of items for a new version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(into = "String")]
pub enum CloneSource {
    #[default]
    Active,
    Version(i64),
}

impl CloneSource {
    /// Parse the value of a `<select>` option ("active" or a version id)
    pub fn from_option_value(value: &str) -> Self {
        value.trim().parse().map(CloneSource::Version).unwrap_or(CloneSource::Active)
    }
}

impl From<CloneSource> for String {
    fn from(source: CloneSource) -> Self {
        match source {
            CloneSource::Active => "active".to_string(),
            CloneSource::Version(id) => id.to_string(),
        }
    }
}

/// Body of `POST /checklist/versions`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateVersionRequest {
    pub version_name: String,
    pub clone_from: CloneSource,
    pub activate: bool,
}

/// Body of `POST /checklist/items`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateItemRequest {
    pub code: String,
    pub display_name: String,
}

/// Body of `PATCH /checklist/items/{code}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenameItemRequest {
    pub display_name: String,
}

/// Body of `POST /checklist/reorder`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReorderRequest {
    pub codes: Vec<String>,
}

/// Role field of `/me`: either a list or a single string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Roles {
    Many(Vec<String>),
    One(String),
}

/// Current user from `/me` (matches backend)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub roles: Option<Roles>,
    #[serde(default)]
    pub role: Option<String>,
    /// `true`, `1` or `"1"` depending on the backend
    #[serde(default)]
    pub is_admin: Option<Value>,
}

impl CurrentUser {
    pub fn display_name(&self) -> String {
        [&self.full_name, &self.username]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| "User".to_string())
    }

    /// All roles the payload mentions; `["User"]` when none
    pub fn role_names(&self) -> Vec<String> {
        let mut roles = match &self.roles {
            Some(Roles::Many(list)) => list.clone(),
            Some(Roles::One(one)) if !one.is_empty() => vec![one.clone()],
            _ => Vec::new(),
        };
        if let Some(role) = self.role.as_ref().filter(|r| !r.is_empty()) {
            roles.push(role.clone());
        }
        let admin_flag = matches!(
            &self.is_admin,
            Some(Value::Bool(true))
        ) || self.is_admin.as_ref().and_then(Value::as_i64) == Some(1)
            || self.is_admin.as_ref().and_then(Value::as_str) == Some("1");
        if admin_flag {
            roles.push("Admin".to_string());
        }
        if roles.is_empty() {
            roles.push("User".to_string());
        }
        roles
    }

    pub fn is_admin(&self) -> bool {
        self.role_names().iter().any(|r| r.to_lowercase().contains("admin"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(value: Value) -> CurrentUser {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_sort_prefers_order_index_then_order_no() {
        let items: Vec<ChecklistItem> = serde_json::from_value(json!([
            {"code": "c", "display_name": "C", "order_index": 3},
            {"code": "a", "display_name": "A", "order_no": 1},
            {"code": "z", "display_name": "Z"},
            {"code": "b", "display_name": "B", "order_index": 2, "order_no": 9},
        ]))
        .unwrap();
        let codes: Vec<String> = sort_items(items).into_iter().map(|i| i.code).collect();
        assert_eq!(codes, ["z", "a", "b", "c"]);
    }

    #[test]
    fn test_order_label() {
        assert_eq!(ChecklistItem::new("a", "A", 20).order_label(), "20");
        let legacy = ChecklistItem { order_index: None, order_no: Some(3), ..ChecklistItem::new("b", "B", 0) };
        assert_eq!(legacy.order_label(), "3");
        let unordered = ChecklistItem { order_index: None, ..ChecklistItem::new("c", "C", 0) };
        assert_eq!(unordered.order_label(), "-");
    }

    #[test]
    fn test_version_active_flags() {
        let v: ChecklistVersion = serde_json::from_value(json!({"id": 2, "version_name": "2025", "active": true})).unwrap();
        assert!(v.flagged_active());
        let v: ChecklistVersion = serde_json::from_value(json!({"id": 3, "version_name": "2026"})).unwrap();
        assert!(!v.flagged_active());
    }

    #[test]
    fn test_clone_source_wire_format() {
        let req = CreateVersionRequest {
            version_name: "2026".into(),
            clone_from: CloneSource::Version(7),
            activate: true,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"version_name": "2026", "clone_from": "7", "activate": true})
        );
        assert_eq!(serde_json::to_value(CloneSource::Active).unwrap(), json!("active"));
        assert_eq!(CloneSource::from_option_value("active"), CloneSource::Active);
        assert_eq!(CloneSource::from_option_value("12"), CloneSource::Version(12));
    }

    #[test]
    fn test_admin_from_roles_list() {
        let me = user(json!({"username": "thu", "roles": ["Staff", "SysAdmin"]}));
        assert!(me.is_admin());
        assert_eq!(me.display_name(), "thu");
    }

    #[test]
    fn test_admin_flag_variants() {
        for flag in [json!(true), json!(1), json!("1")] {
            let me = user(json!({"username": "a", "is_admin": flag}));
            assert!(me.is_admin());
            assert!(me.role_names().contains(&"Admin".to_string()));
        }
        let me = user(json!({"username": "a", "is_admin": false, "role": "Staff"}));
        assert!(!me.is_admin());
    }

    #[test]
    fn test_default_role_and_name() {
        let me = user(json!({}));
        assert_eq!(me.role_names(), vec!["User".to_string()]);
        assert_eq!(me.display_name(), "User");
        assert!(!me.is_admin());
    }

    #[test]
    fn test_single_role_string() {
        let me = user(json!({"full_name": "Lan Tran", "roles": "administrator"}));
        assert!(me.is_admin());
        assert_eq!(me.display_name(), "Lan Tran");
    }
}
