//! HTTP transport
//!
//! `fetch` wrapper with credentials, timeout, API prefix detection and
//! session redirects shared by every endpoint.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::browser;
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

/// Prefixes the backend may be mounted under, probed in order
const PREFIXES: [&str; 2] = ["", "/api"];

pub const LOGIN_URL: &str = "/auth_login.html";
const LOGIN_EXPIRED_URL: &str = "/auth_login.html?expired=1";
const CHANGE_PASSWORD_URL: &str = "/account?first=1";

/// Where a response forces the browser to go
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Redirect {
    Login,
    ChangePassword,
}

/// 401 sends the user to login; 403 with `force_change` to the password page.
pub fn session_redirect(status: u16, body: &str) -> Option<Redirect> {
    match status {
        401 => Some(Redirect::Login),
        403 => {
            let json: Value = serde_json::from_str(body).ok()?;
            let forced = match json.get("force_change")? {
                Value::Bool(b) => *b,
                Value::Number(n) => n.as_i64() == Some(1),
                Value::String(s) => s == "1" || s == "true",
                _ => false,
            };
            forced.then_some(Redirect::ChangePassword)
        }
        _ => None,
    }
}

pub fn join_url(base: &str, prefix: &str, path: &str) -> String {
    format!("{}{}{}", base.trim_end_matches('/'), prefix, path)
}

fn alternate_prefix(prefix: &str) -> &'static str {
    if prefix.is_empty() { PREFIXES[1] } else { PREFIXES[0] }
}

fn js_error(e: JsValue) -> AppError {
    AppError::Network(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

/// A fully read response
#[derive(Clone, Debug)]
pub struct Reply {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

impl Reply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx reply into an error
    pub fn error_for_status(self) -> AppResult<Reply> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(AppError::from_response(self.status, &self.content_type, &self.body))
        }
    }

    pub fn json<T: DeserializeOwned>(self) -> AppResult<T> {
        let reply = self.error_for_status()?;
        Ok(serde_json::from_str(&reply.body)?)
    }
}

/// REST client for the AMS backend
#[derive(Clone, Copy)]
pub struct HttpClient {
    base_url: RwSignal<String>,
    prefix: RwSignal<String>,
    timeout_ms: u32,
}

impl HttpClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: RwSignal::new(config.api_base.clone()),
            prefix: RwSignal::new(String::new()),
            timeout_ms: config.timeout_ms,
        }
    }

    /// Current API base (tracked)
    pub fn base_url(&self) -> String {
        self.base_url.get()
    }

    pub fn base_url_untracked(&self) -> String {
        self.base_url.get_untracked()
    }

    pub fn set_base_url(&self, url: String) {
        self.base_url.set(url);
    }

    /// Probe `/health` under each known prefix; the first 2xx wins.
    pub async fn detect_prefix(&self) {
        let base = self.base_url.get_untracked();
        for prefix in PREFIXES {
            let url = join_url(&base, prefix, "/health");
            if let Ok(reply) = self.fetch_once(&url, "GET", None).await {
                if reply.is_success() {
                    log::info!(target: "api", "API prefix detected: '{}'", prefix);
                    self.prefix.set(prefix.to_string());
                    return;
                }
            }
        }
        log::warn!(target: "api", "no /health endpoint answered, using root prefix");
        self.prefix.set(String::new());
    }

    /// Send a request under the current prefix.
    ///
    /// A 404 or an unreachable server is retried once under the alternate
    /// prefix, which becomes current when it answers successfully.
    pub async fn send(&self, method: &str, path: &str, body: Option<&str>) -> AppResult<Reply> {
        let prefix = self.prefix.get_untracked();
        let first = self.send_once(&prefix, method, path, body).await;
        match &first {
            Ok(reply) if reply.status != 404 => return first,
            Err(e) if e.is_silent() => return first,
            _ => {}
        }

        let alt = alternate_prefix(&prefix);
        let second = self.send_once(alt, method, path, body).await;
        if matches!(&second, Ok(reply) if reply.is_success()) {
            log::info!(target: "api", "switching API prefix to '{}'", alt);
            self.prefix.set(alt.to_string());
        }
        second
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.send("GET", path, None).await?.json()
    }

    /// Send a JSON body and only care about success
    pub async fn execute<B: Serialize>(&self, method: &str, path: &str, body: Option<&B>) -> AppResult<()> {
        let body = body.map(serde_json::to_string).transpose()?;
        self.send(method, path, body.as_deref()).await?.error_for_status()?;
        Ok(())
    }

    async fn send_once(&self, prefix: &str, method: &str, path: &str, body: Option<&str>) -> AppResult<Reply> {
        let url = join_url(&self.base_url.get_untracked(), prefix, path);
        let reply = self.fetch_once(&url, method, body).await?;
        match session_redirect(reply.status, &reply.body) {
            Some(Redirect::Login) => {
                log::warn!(target: "api", "{} {} -> 401, redirecting to login", method, path);
                browser::mark_session_expired();
                browser::navigate(LOGIN_EXPIRED_URL);
                Err(AppError::SessionExpired)
            }
            Some(Redirect::ChangePassword) => {
                browser::navigate(CHANGE_PASSWORD_URL);
                Err(AppError::PasswordChangeRequired)
            }
            None => Ok(reply),
        }
    }

    async fn fetch_once(&self, url: &str, method: &str, body: Option<&str>) -> AppResult<Reply> {
        let window = web_sys::window().ok_or_else(|| AppError::Network("no window".to_string()))?;

        let controller = web_sys::AbortController::new().map_err(js_error)?;
        let init = web_sys::RequestInit::new();
        init.set_method(method);
        init.set_credentials(web_sys::RequestCredentials::Include);
        init.set_signal(Some(&controller.signal()));
        if let Some(body) = body {
            init.set_body(&JsValue::from_str(body));
        }

        let request = web_sys::Request::new_with_str_and_init(url, &init).map_err(js_error)?;
        if body.is_some() {
            request.headers().set("Content-Type", "application/json").map_err(js_error)?;
        }

        // Dropping the timeout before it fires cancels it
        let _timeout = Timeout::new(self.timeout_ms, move || controller.abort());

        let response: web_sys::Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?
            .dyn_into()
            .map_err(js_error)?;

        let status = response.status();
        let content_type = response.headers().get("content-type").ok().flatten().unwrap_or_default();
        let body = JsFuture::from(response.text().map_err(js_error)?)
            .await
            .map_err(js_error)?
            .as_string()
            .unwrap_or_default();

        log::debug!(target: "api", "{} {} -> {}", method, url, status);
        Ok(Reply { status, content_type, body })
    }
}
