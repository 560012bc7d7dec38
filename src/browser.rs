//! Browser helpers
//!
//! Thin wrappers over `window`, `document`, cookies and local storage.
//! All of them are no-ops outside a browser.

use wasm_bindgen::JsCast;

const SESSION_EXPIRED_COOKIE: &str = "__session_expired";

fn html_document() -> Option<web_sys::HtmlDocument> {
    web_sys::window()?.document()?.dyn_into::<web_sys::HtmlDocument>().ok()
}

pub fn navigate(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_href(url) {
            log::error!(target: "browser", "navigation to {} failed: {:?}", url, e);
        }
    }
}

/// Leave a short-lived marker so the login page (and this page after
/// returning) can tell the user why they were sent away.
pub fn mark_session_expired() {
    if let Some(doc) = html_document() {
        let _ = doc.set_cookie(&format!("{}=1; Max-Age=30; Path=/; SameSite=Lax", SESSION_EXPIRED_COOKIE));
    }
}

/// Whether a cookie header string carries the session-expired marker
pub fn has_expired_marker(cookies: &str) -> bool {
    cookies
        .split(';')
        .map(str::trim)
        .any(|pair| pair == format!("{}=1", SESSION_EXPIRED_COOKIE))
}

/// Consume the session-expired notice (`?expired=1` or the marker cookie).
/// The cookie is cleared either way.
pub fn take_session_expired_notice() -> bool {
    let Some(window) = web_sys::window() else { return false };

    let from_query = window
        .location()
        .search()
        .ok()
        .and_then(|search| web_sys::UrlSearchParams::new_with_str(&search).ok())
        .and_then(|params| params.get("expired"))
        .is_some_and(|v| v == "1");

    let Some(doc) = html_document() else { return from_query };
    let from_cookie = doc.cookie().map(|c| has_expired_marker(&c)).unwrap_or(false);
    if from_cookie {
        let _ = doc.set_cookie(&format!("{}=; Max-Age=0; Path=/; SameSite=Lax", SESSION_EXPIRED_COOKIE));
    }
    from_query || from_cookie
}

/// Native `confirm()`. Declines when no window is available.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

pub fn storage_get(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?
}

pub fn storage_set(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        if storage.set_item(key, value).is_err() {
            log::warn!(target: "browser", "could not persist '{}'", key);
        }
    }
}

pub fn location_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

/// Focus the first element matching `selector`
pub fn focus_selector(selector: &str) {
    let element = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector(selector).ok().flatten())
        .and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok());
    if let Some(element) = element {
        let _ = element.focus();
    }
}

/// Run `f` on the next animation frame, after the view has re-rendered
pub fn after_render(f: impl FnOnce() + 'static) {
    leptos::prelude::request_animation_frame(f);
}
