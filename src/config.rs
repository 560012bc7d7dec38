//! Runtime configuration
//!
//! Read once at boot from local storage, with defaults for everything.

use log::LevelFilter;

use crate::browser;

const API_BASE_KEY: &str = "apiBase";
const LOG_LEVEL_KEY: &str = "logLevel";

/// Request timeout used by the original admin pages
pub const DEFAULT_TIMEOUT_MS: u32 = 12_000;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Backend origin without trailing slash
    pub api_base: String,
    pub timeout_ms: u32,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            log_level: LevelFilter::Info,
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        let api_base = browser::storage_get(API_BASE_KEY)
            .map(|v| normalize_base(&v))
            .filter(|v| !v.is_empty())
            .or_else(|| browser::location_origin().map(|o| normalize_base(&o)))
            .unwrap_or_default();
        let log_level = browser::storage_get(LOG_LEVEL_KEY)
            .and_then(|v| parse_level(&v))
            .unwrap_or(LevelFilter::Info);
        Self { api_base, log_level, ..Default::default() }
    }
}

/// Trim and drop trailing slashes
pub fn normalize_base(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

pub fn parse_level(raw: &str) -> Option<LevelFilter> {
    raw.trim().parse().ok()
}

/// Persist a new API base; returns the normalized value
pub fn save_api_base(raw: &str) -> String {
    let base = normalize_base(raw);
    browser::storage_set(API_BASE_KEY, &base);
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base("  https://ams.example.edu/// "), "https://ams.example.edu");
        assert_eq!(normalize_base("http://localhost:8000"), "http://localhost:8000");
        assert_eq!(normalize_base("   "), "");
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_level(" WARN "), Some(LevelFilter::Warn));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.timeout_ms, 12_000);
        assert_eq!(config.log_level, LevelFilter::Info);
    }
}
