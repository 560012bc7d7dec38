//! Error types for backend calls and client-side checks

use serde_json::Value;
use thiserror::Error;

/// Longest plain-text error body shown to the user
const TEXT_BODY_LIMIT: usize = 160;

/// Frontend error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    /// Request never produced a response (offline, CORS, timeout)
    #[error("cannot reach the server: {0}")]
    Network(String),

    /// Server answered with an error and a readable message
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Server answered with an error and no usable body
    #[error("HTTP {status}")]
    Status { status: u16 },

    /// Response body did not match the expected shape
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Input rejected before any request was made
    #[error("{0}")]
    Validation(String),

    /// Current user may only view the checklist
    #[error("you do not have permission to change the checklist")]
    ReadOnly,

    /// The active version cannot be deleted
    #[error("the active version cannot be deleted")]
    ActiveVersionLocked,

    /// Browser is being redirected to the login page
    #[error("session expired")]
    SessionExpired,

    /// Browser is being redirected to the password change page
    #[error("password change required")]
    PasswordChangeRequired,
}

/// Result type for frontend operations
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Build an error from a non-2xx response.
    ///
    /// Prefers a structured JSON message (`detail`, `message`, `error`), then a
    /// plain-text body, then the bare status.
    pub fn from_response(status: u16, content_type: &str, body: &str) -> Self {
        let message = if content_type.contains("application/json") {
            serde_json::from_str::<Value>(body).ok().and_then(|json| structured_message(&json))
        } else {
            let text: String = body.trim().chars().take(TEXT_BODY_LIMIT).collect();
            (!text.is_empty()).then_some(text)
        };

        match message {
            Some(message) => AppError::Api { status, message },
            None => AppError::Status { status },
        }
    }

    /// HTTP status, when the error came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Api { status, .. } | AppError::Status { status } => Some(*status),
            _ => None,
        }
    }

    /// Redirect-class errors: the page is navigating away, nothing to show
    pub fn is_silent(&self) -> bool {
        matches!(self, AppError::SessionExpired | AppError::PasswordChangeRequired)
    }

    /// Text for a toast, with `fallback` naming the failed action.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Network(_) => format!("{}: cannot reach the server", fallback),
            AppError::Api { message, .. } => message.clone(),
            AppError::Status { status } => status_message(*status)
                .map(str::to_string)
                .unwrap_or_else(|| format!("{} (HTTP {})", fallback, status)),
            AppError::Decode(_) => format!("{}: unexpected server response", fallback),
            AppError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

/// Fallback text for statuses that have a well-known meaning here
pub fn status_message(status: u16) -> Option<&'static str> {
    match status {
        409 => Some("State conflict (409)."),
        422 => Some("Invalid data (422)."),
        429 => Some("Too many requests (429). Please try again later."),
        _ => None,
    }
}

fn structured_message(json: &Value) -> Option<String> {
    for key in ["detail", "message", "error"] {
        match json.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.clone()),
            // Validation errors arrive as a list of {loc, msg, type}
            Some(Value::Array(entries)) => {
                let parts: Vec<&str> = entries
                    .iter()
                    .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                    .collect();
                if !parts.is_empty() {
                    return Some(parts.join("; "));
                }
            }
            _ => {}
        }
    }
    None
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_message_wins() {
        let err = AppError::from_response(400, "application/json", r#"{"detail":"Code already exists","message":"x"}"#);
        assert_eq!(err, AppError::Api { status: 400, message: "Code already exists".into() });
        assert_eq!(err.user_message("Add failed"), "Code already exists");
    }

    #[test]
    fn test_message_and_error_keys() {
        let err = AppError::from_response(500, "application/json; charset=utf-8", r#"{"message":"boom"}"#);
        assert_eq!(err.user_message("Save failed"), "boom");
        let err = AppError::from_response(500, "application/json", r#"{"error":"bad"}"#);
        assert_eq!(err.user_message("Save failed"), "bad");
    }

    #[test]
    fn test_validation_list_is_joined() {
        let body = r#"{"detail":[{"loc":["body","codes"],"msg":"field required"},{"msg":"too short"}]}"#;
        let err = AppError::from_response(422, "application/json", body);
        assert_eq!(err.user_message("Save failed"), "field required; too short");
    }

    #[test]
    fn test_conflict_without_body_uses_status_table() {
        let err = AppError::from_response(409, "application/json", "");
        assert_eq!(err, AppError::Status { status: 409 });
        assert!(err.user_message("Save order failed").contains("409"));
    }

    #[test]
    fn test_rate_limit_and_validation_fallbacks() {
        assert!(AppError::Status { status: 429 }.user_message("x").contains("429"));
        assert!(AppError::Status { status: 422 }.user_message("x").contains("422"));
    }

    #[test]
    fn test_unknown_status_mentions_action() {
        let err = AppError::from_response(503, "application/json", "{}");
        assert_eq!(err.user_message("Delete failed"), "Delete failed (HTTP 503)");
    }

    #[test]
    fn test_text_body_is_truncated() {
        let body = "x".repeat(400);
        match AppError::from_response(500, "text/plain", &body) {
            AppError::Api { message, .. } => assert_eq!(message.chars().count(), 160),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_empty_text_body_falls_back_to_status() {
        assert_eq!(AppError::from_response(502, "text/html", "  "), AppError::Status { status: 502 });
    }

    #[test]
    fn test_network_and_silent_errors() {
        let err = AppError::Network("TypeError".into());
        assert_eq!(err.user_message("Load failed"), "Load failed: cannot reach the server");
        assert!(!err.is_silent());
        assert!(AppError::SessionExpired.is_silent());
        assert!(AppError::PasswordChangeRequired.is_silent());
        assert_eq!(err.status(), None);
    }
}
