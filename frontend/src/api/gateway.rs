use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

use super::{error::ApiError, types::Envelope};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GatewayRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl GatewayRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, path).with_body(body)
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Put, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for GatewayRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Uniform async data source for list and detail views.
///
/// A business failure comes back as `Ok(Envelope { success: false, .. })`.
/// `Err` is reserved for transport failures: no readable envelope at all.
#[async_trait(?Send)]
pub trait RemoteDataGateway {
    async fn request(&self, request: GatewayRequest) -> Result<Envelope<Value>, ApiError>;
}

/// Issues `request` and decodes the envelope payload into `T`.
pub async fn fetch<T>(
    gateway: &dyn RemoteDataGateway,
    request: GatewayRequest,
) -> Result<Envelope<T>, ApiError>
where
    T: DeserializeOwned,
{
    gateway.request(request).await?.decode()
}

/// Verb and path shape of one resource router's mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterLayout {
    /// `POST add`, `PUT {id}/update`, `PUT {id}/enabled`, `DELETE {id}/delete`.
    Rest,
    /// `POST create`, `POST {id}/update/`, `POST {id}/enabled/`, `POST {id}/delete/`.
    PostOnly,
}

/// Endpoints of one resource router mounted at `base`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceEndpoints {
    base: &'static str,
    layout: RouterLayout,
}

impl ResourceEndpoints {
    pub const fn new(base: &'static str) -> Self {
        Self {
            base,
            layout: RouterLayout::Rest,
        }
    }

    pub const fn with_layout(mut self, layout: RouterLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn base(&self) -> &'static str {
        self.base
    }

    pub fn list(&self) -> GatewayRequest {
        GatewayRequest::get(format!("{}/list", self.base))
    }

    pub fn detail(&self, id: i64) -> GatewayRequest {
        GatewayRequest::get(format!("{}/{}", self.base, id))
    }

    pub fn create(&self, body: Value) -> GatewayRequest {
        match self.layout {
            RouterLayout::Rest => GatewayRequest::post(format!("{}/add", self.base), body),
            RouterLayout::PostOnly => GatewayRequest::post(format!("{}/create", self.base), body),
        }
    }

    pub fn update(&self, id: i64, body: Value) -> GatewayRequest {
        match self.layout {
            RouterLayout::Rest => GatewayRequest::put(format!("{}/{}/update", self.base, id), body),
            RouterLayout::PostOnly => {
                GatewayRequest::post(format!("{}/{}/update/", self.base, id), body)
            }
        }
    }

    pub fn toggle_enabled(&self, id: i64) -> GatewayRequest {
        match self.layout {
            RouterLayout::Rest => {
                GatewayRequest::put(format!("{}/{}/enabled", self.base, id), Value::Null)
            }
            RouterLayout::PostOnly => {
                GatewayRequest::post(format!("{}/{}/enabled/", self.base, id), Value::Null)
            }
        }
    }

    pub fn delete(&self, id: i64) -> GatewayRequest {
        match self.layout {
            RouterLayout::Rest => GatewayRequest::delete(format!("{}/{}/delete", self.base, id)),
            RouterLayout::PostOnly => {
                GatewayRequest::post(format!("{}/{}/delete/", self.base, id), Value::Null)
            }
        }
    }
}
