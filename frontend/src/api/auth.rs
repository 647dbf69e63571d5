use serde_json::json;

use super::{
    client::ApiClient,
    error::ApiError,
    gateway::{fetch, GatewayRequest},
    types::{AdminInfo, LoginRequest, LoginResponse},
};

impl ApiClient {
    /// Signs in and keeps the returned token for subsequent requests.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ApiError> {
        if request.account.trim().is_empty() {
            return Err(ApiError::field("account", "请输入账号"));
        }
        if request.password.is_empty() {
            return Err(ApiError::field("password", "请输入密码"));
        }
        let body = json!({ "account": request.account.trim(), "password": request.password });
        let response: LoginResponse =
            fetch(self, GatewayRequest::post("/admin/login", body))
                .await?
                .into_data()?;
        self.set_access_token(response.token.clone());
        log::info!("signed in as {}", response.admin.account);
        Ok(response)
    }

    pub async fn current_admin(&self) -> Result<AdminInfo, ApiError> {
        if self.access_token().is_none() {
            return Err(ApiError::business(super::error::AUTH_ERROR, "TOKEN不存在"));
        }
        fetch(self, GatewayRequest::get("/admin/me"))
            .await?
            .into_data()
    }

    pub fn logout(&self) {
        self.clear_session();
    }
}
