use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ApiError;

/// Response wrapper returned by every service endpoint.
///
/// `success` defaults to `false` because the service omits it on parameter
/// and auth errors (`{data, code, message}` only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            code: "SUCCESS".into(),
            message: String::new(),
        }
    }

    pub fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            success: self.success,
            data: self.data.map(f),
            code: self.code,
            message: self.message,
        }
    }

    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Envelope<U>, E> {
        let data = match self.data {
            Some(value) => Some(f(value)?),
            None => None,
        };
        Ok(Envelope {
            success: self.success,
            data,
            code: self.code,
            message: self.message,
        })
    }

    pub fn failure_error(&self) -> Option<ApiError> {
        if self.success {
            None
        } else {
            Some(ApiError::business(self.code.clone(), self.message.clone()))
        }
    }

    /// Success with optional payload, or the business failure.
    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        match self.failure_error() {
            Some(err) => Err(err),
            None => Ok(self.data),
        }
    }

    /// Like [`Envelope::into_result`] but a successful envelope must carry data.
    pub fn into_data(self) -> Result<T, ApiError> {
        self.into_result()?
            .ok_or_else(|| ApiError::transport("Response is missing data"))
    }
}

impl Envelope<Value> {
    pub fn decode<T>(self) -> Result<Envelope<T>, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        // `null` data on a success envelope means "no payload", not a parse error.
        let data = self.data.filter(|value| !value.is_null());
        Envelope {
            success: self.success,
            data,
            code: self.code,
            message: self.message,
        }
        .try_map(serde_json::from_value)
        .map_err(|err| ApiError::transport(format!("Failed to parse response: {}", err)))
    }
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListData<T> {
    #[serde(default = "Vec::new")]
    pub list: Vec<T>,
    #[serde(default)]
    pub total: u64,
}

impl<T> Default for ListData<T> {
    fn default() -> Self {
        Self {
            list: Vec::new(),
            total: 0,
        }
    }
}

/// Admin account as returned by `/admin/login` and `/admin/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminInfo {
    pub id: i64,
    pub account: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    /// 0: super admin, 1: admin.
    #[serde(default = "default_admin_type", rename = "type")]
    pub admin_type: i32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_admin_type() -> i32 {
    1
}

fn default_enabled() -> bool {
    true
}

impl AdminInfo {
    pub fn is_super_admin(&self) -> bool {
        self.admin_type == 0
    }

    pub fn display_name(&self) -> &str {
        self.nickname
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.account)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub account: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(flatten)]
    pub admin: AdminInfo,
}
