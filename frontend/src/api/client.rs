use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::{cell::RefCell, rc::Rc};

use super::{
    error::{ApiError, AUTH_ERROR},
    gateway::{GatewayRequest, Method, RemoteDataGateway},
    types::Envelope,
};
use crate::config;

pub const LOGIN_PATH: &str = "/user/login";

/// HTTP implementation of [`RemoteDataGateway`] against the console service.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    token: Rc<RefCell<Option<String>>>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            token: Rc::new(RefCell::new(None)),
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::new()
        }
    }

    async fn resolved_base_url(&self) -> String {
        match &self.base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => config::await_api_base_url().await,
        }
    }

    pub fn access_token(&self) -> Option<String> {
        if let Some(token) = self.token.borrow().clone() {
            return Some(token);
        }
        stored_access_token()
    }

    pub fn set_access_token(&self, token: impl Into<String>) {
        let token = token.into();
        persist_access_token(&token);
        *self.token.borrow_mut() = Some(token);
    }

    pub fn clear_session(&self) {
        *self.token.borrow_mut() = None;
        clear_stored_session();
    }

    fn handle_unauthorized_status(&self, status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            self.expire_session();
        }
    }

    /// The service reports a missing or expired token as a 200 envelope
    /// with `code = AUTH_ERROR`.
    fn handle_auth_error(&self, envelope: &Envelope<Value>) {
        if !envelope.success && envelope.code == AUTH_ERROR {
            self.expire_session();
        }
    }

    fn expire_session(&self) {
        log::warn!("session rejected by the service, clearing credentials");
        self.clear_session();
        redirect_to_login_if_needed();
    }

    fn builder_for(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
            Method::Delete => self.client.delete(url),
        }
    }
}

#[async_trait(?Send)]
impl RemoteDataGateway for ApiClient {
    async fn request(&self, request: GatewayRequest) -> Result<Envelope<Value>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = format!("{}{}", base_url, request.path);
        log::debug!("{} {}", request.method, url);

        let mut builder = self.builder_for(request.method, &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(token) = self.access_token() {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| {
            log::error!("{} failed: {}", request, e);
            ApiError::transport(format!("Request failed: {}", e))
        })?;

        let status = response.status();
        self.handle_unauthorized_status(status);
        let envelope: Envelope<Value> = response.json().await.map_err(|e| {
            log::error!("{} returned unreadable body ({}): {}", request, status, e);
            ApiError::transport(format!("Failed to parse response: {}", e))
        })?;
        self.handle_auth_error(&envelope);
        if !envelope.success {
            log::warn!(
                "{} rejected: code={} message={}",
                request,
                envelope.code,
                envelope.message
            );
        }
        Ok(envelope)
    }
}

#[cfg(target_arch = "wasm32")]
fn stored_access_token() -> Option<String> {
    crate::utils::storage::read_access_token()
}

#[cfg(not(target_arch = "wasm32"))]
fn stored_access_token() -> Option<String> {
    None
}

#[cfg(target_arch = "wasm32")]
fn persist_access_token(token: &str) {
    if let Err(err) = crate::utils::storage::write_access_token(token) {
        log::warn!("{}", err);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn persist_access_token(_token: &str) {}

#[cfg(target_arch = "wasm32")]
fn clear_stored_session() {
    crate::utils::storage::clear_session();
}

#[cfg(not(target_arch = "wasm32"))]
fn clear_stored_session() {}

#[cfg(target_arch = "wasm32")]
fn redirect_to_login_if_needed() {
    if let Some(window) = web_sys::window() {
        let location = window.location();
        if let Ok(pathname) = location.pathname() {
            if pathname == LOGIN_PATH {
                return;
            }
        }
        let _ = location.set_href(LOGIN_PATH);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn redirect_to_login_if_needed() {}
