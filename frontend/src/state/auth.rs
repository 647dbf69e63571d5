use crate::{
    api::{AdminInfo, ApiClient, ApiError, LoginRequest},
    routes::{Capabilities, Principal, CAN_ADMIN},
};
use leptos::*;

type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub admin: Option<AdminInfo>,
    pub is_authenticated: bool,
    pub loading: bool,
}

impl AuthState {
    pub fn signed_in(admin: AdminInfo) -> Self {
        Self {
            admin: Some(admin),
            is_authenticated: true,
            loading: false,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        capabilities_for(self.admin.as_ref())
    }
}

impl Principal for AuthState {
    fn has_capability(&self, tag: &str) -> bool {
        self.capabilities().has_capability(tag)
    }
}

/// Super admins hold `canAdmin`; everyone else holds nothing.
pub fn capabilities_for(admin: Option<&AdminInfo>) -> Capabilities {
    match admin {
        Some(admin) if admin.enabled && admin.is_super_admin() => {
            Capabilities::none().with(CAN_ADMIN)
        }
        _ => Capabilities::none(),
    }
}

pub fn use_api_client() -> ApiClient {
    use_context::<ApiClient>().unwrap_or_default()
}

fn create_auth_context() -> AuthContext {
    let (auth_state, set_auth_state) = create_signal(AuthState::default());
    let api_client = use_api_client();
    if api_client.access_token().is_none() {
        return (auth_state, set_auth_state);
    }

    set_auth_state.update(|state| state.loading = true);
    spawn_local(async move {
        match api_client.current_admin().await {
            Ok(admin) => set_auth_state.set(AuthState::signed_in(admin)),
            Err(err) => {
                log::warn!("session check failed: {}", err);
                set_auth_state.set(AuthState::default());
            }
        }
    });

    (auth_state, set_auth_state)
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let ctx = create_auth_context();
    provide_context::<AuthContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

pub async fn login_request(
    request: LoginRequest,
    client: &ApiClient,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), ApiError> {
    set_auth_state.update(|state| state.loading = true);

    match client.login(request).await {
        Ok(response) => {
            set_auth_state.set(AuthState::signed_in(response.admin));
            Ok(())
        }
        Err(error) => {
            set_auth_state.update(|state| state.loading = false);
            Err(error)
        }
    }
}

pub fn logout(client: &ApiClient, set_auth_state: WriteSignal<AuthState>) {
    client.logout();
    set_auth_state.set(AuthState::default());
}

pub fn use_login_action() -> Action<LoginRequest, Result<(), ApiError>> {
    let (_auth, set_auth) = use_auth();
    let client = use_api_client();

    create_action(move |request: &LoginRequest| {
        let payload = request.clone();
        let client = client.clone();
        async move { login_request(payload, &client, set_auth).await }
    })
}

pub fn use_logout() -> Callback<()> {
    let (_auth, set_auth) = use_auth();
    let client = use_api_client();
    Callback::new(move |_| logout(&client, set_auth))
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn login_and_logout_update_auth_state() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/admin/login");
                then.status(200).json_body(serde_json::json!({
                    "success": true,
                    "code": "SUCCESS",
                    "message": "",
                    "data": {
                        "id": 1,
                        "account": "root",
                        "type": 0,
                        "enabled": true,
                        "token": "jwt-1"
                    }
                }));
            })
            .await;

        let runtime = create_runtime();
        let (state, set_state) = create_signal(AuthState::default());
        let client = ApiClient::new_with_base_url(server.url("/api"));

        login_request(
            LoginRequest {
                account: "root".into(),
                password: "secret".into(),
            },
            &client,
            set_state,
        )
        .await
        .unwrap();

        let snapshot = state.get();
        assert!(snapshot.is_authenticated);
        assert!(snapshot.has_capability(CAN_ADMIN));

        logout(&client, set_state);
        let snapshot = state.get();
        assert!(!snapshot.is_authenticated);
        assert!(snapshot.admin.is_none());
        assert!(client.access_token().is_none());
        runtime.dispose();
    }

    #[tokio::test]
    async fn rejected_login_clears_loading() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/admin/login");
                then.status(200).json_body(serde_json::json!({
                    "success": false,
                    "code": "ERROR",
                    "message": "账号或密码错误",
                    "data": null
                }));
            })
            .await;

        let runtime = create_runtime();
        let (state, set_state) = create_signal(AuthState::default());
        let client = ApiClient::new_with_base_url(server.url("/api"));

        let err = login_request(
            LoginRequest {
                account: "root".into(),
                password: "wrong".into(),
            },
            &client,
            set_state,
        )
        .await
        .unwrap_err();

        assert_eq!(err, ApiError::business("ERROR", "账号或密码错误"));
        assert!(!state.get().loading);
        assert!(!state.get().is_authenticated);
        runtime.dispose();
    }
}
