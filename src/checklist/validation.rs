//! Input checks done before any request is sent

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{AppError, AppResult};

fn code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z0-9_]+$").expect("static pattern"))
}

/// Item codes are lowercase letters, digits and underscores
pub fn item_code(code: &str) -> AppResult<String> {
    let code = code.trim();
    if !code_pattern().is_match(code) {
        return Err(AppError::Validation(
            "Code may only contain lowercase letters, digits and underscores".to_string(),
        ));
    }
    Ok(code.to_string())
}

pub fn display_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Enter a display name".to_string()));
    }
    Ok(name.to_string())
}

pub fn version_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Enter a version name".to_string()));
    }
    Ok(name.to_string())
}
