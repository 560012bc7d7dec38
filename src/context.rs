//! Application Context
//!
//! Shared handles provided via Leptos Context API: the API client and the toast queue.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::api::HttpClient;
use crate::checklist::Applied;
use crate::error::{AppError, AppResult};

const TOAST_MS: u32 = 3_500;
pub const NOTICE_MS: u32 = 4_500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warn,
    Error,
}

impl ToastKind {
    pub fn class(self) -> &'static str {
        match self {
            ToastKind::Info => "toast info",
            ToastKind::Success => "toast success",
            ToastKind::Warn => "toast warn",
            ToastKind::Error => "toast error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub api: HttpClient,
    /// Visible toasts, oldest first
    pub toasts: ReadSignal<Vec<Toast>>,
    set_toasts: WriteSignal<Vec<Toast>>,
    next_toast: StoredValue<u32>,
}

impl AppContext {
    pub fn new(api: HttpClient) -> Self {
        let (toasts, set_toasts) = signal(Vec::new());
        Self {
            api,
            toasts,
            set_toasts,
            next_toast: StoredValue::new(0),
        }
    }

    /// Show a toast that dismisses itself after `duration_ms`
    pub fn toast_for(&self, kind: ToastKind, message: impl Into<String>, duration_ms: u32) {
        let id = self.next_toast.get_value();
        self.next_toast.set_value(id.wrapping_add(1));
        let message = message.into();
        self.set_toasts.update(|list| list.push(Toast { id, kind, message }));

        let ctx = *self;
        Timeout::new(duration_ms, move || ctx.dismiss(id)).forget();
    }

    pub fn toast(&self, kind: ToastKind, message: impl Into<String>) {
        self.toast_for(kind, message, TOAST_MS);
    }

    pub fn dismiss(&self, id: u32) {
        self.set_toasts.update(|list| list.retain(|t| t.id != id));
    }

    /// Error toast for a failed action; redirect-class errors stay quiet
    pub fn report_error(&self, error: &AppError, fallback: &str) {
        if error.is_silent() {
            return;
        }
        log::warn!(target: "app", "{}: {}", fallback, error);
        let kind = match error {
            AppError::Validation(_) | AppError::ReadOnly | AppError::ActiveVersionLocked => ToastKind::Warn,
            _ => ToastKind::Error,
        };
        self.toast(kind, error.user_message(fallback));
    }

    /// Toast a failure, hand back a success
    pub fn report<T>(&self, result: AppResult<T>, fallback: &str) -> Option<T> {
        result.map_err(|e| self.report_error(&e, fallback)).ok()
    }

    /// Success toast for the mutation, then an error toast if the reload after it failed.
    /// Returns whether the mutation itself went through.
    pub fn report_applied(&self, result: AppResult<Applied>, success: &str, fallback: &str) -> bool {
        match result {
            Ok(applied) => {
                self.toast(ToastKind::Success, success);
                if let Err(e) = applied.reload {
                    self.report_error(&e, "Reload failed");
                }
                true
            }
            Err(e) => {
                self.report_error(&e, fallback);
                false
            }
        }
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
