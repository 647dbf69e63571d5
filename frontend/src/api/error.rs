use leptos::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const REQUEST_FAILED: &str = "REQUEST_FAILED";
pub const TIMEOUT: &str = "TIMEOUT";
pub const ACCESS_DENIED: &str = "ACCESS_DENIED";
pub const AUTH_ERROR: &str = "AUTH_ERROR";

/// Failure taxonomy of the console. Every variant is recovered at the
/// controller boundary and turned into state; none reach the page shell as a
/// panic.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ApiError {
    /// Client-side constraint failure; blocks submit locally.
    #[error("{message}")]
    Validation {
        field: Option<String>,
        message: String,
    },
    /// `Envelope.success == false`.
    #[error("{message}")]
    Business { code: String, message: String },
    /// The request never produced a readable envelope.
    #[error("{0}")]
    Transport(String),
    #[error("request timed out after {after_ms} ms")]
    Timeout { after_ms: u64 },
    #[error("access denied: {path}")]
    AccessDenied { path: String },
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            field: None,
            message: msg.into(),
        }
    }

    pub fn field(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Validation {
            field: Some(field.into()),
            message: msg.into(),
        }
    }

    pub fn business(code: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Business {
            code: code.into(),
            message: msg.into(),
        }
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn timeout(after_ms: u64) -> Self {
        Self::Timeout { after_ms }
    }

    pub fn access_denied(path: impl Into<String>) -> Self {
        Self::AccessDenied { path: path.into() }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Validation { .. } => VALIDATION_ERROR,
            Self::Business { code, .. } => code,
            Self::Transport(_) => REQUEST_FAILED,
            Self::Timeout { .. } => TIMEOUT,
            Self::AccessDenied { .. } => ACCESS_DENIED,
        }
    }

    /// Timeouts are shown to the operator like business failures.
    pub fn is_business_like(&self) -> bool {
        matches!(self, Self::Business { .. } | Self::Timeout { .. })
    }

    /// Text for the transient notice. Transport details stay in the log.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => "网络异常，请稍后重试".to_string(),
            Self::Timeout { .. } => "提交超时，请重试".to_string(),
            Self::Business { message, .. } if message.trim().is_empty() => {
                "操作失败".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.user_message()
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.user_message().into_view()
    }
}
