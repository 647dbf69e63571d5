#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod gateway;
#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::AdminInfo;
    use crate::state::auth::AuthState;
    use leptos::*;

    pub fn with_runtime<T>(f: impl FnOnce() -> T) -> T {
        let runtime = create_runtime();
        let result = f();
        runtime.dispose();
        result
    }

    /// `admin_type` 0 is a super admin, 1 a regular admin.
    pub fn admin_info(admin_type: i32) -> AdminInfo {
        AdminInfo {
            id: 1,
            account: "root".into(),
            nickname: Some("Root".into()),
            avatar_url: None,
            email: None,
            mobile: None,
            admin_type,
            enabled: true,
        }
    }

    pub fn provide_auth(
        admin: Option<AdminInfo>,
    ) -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
        let state = match admin {
            Some(admin) => AuthState::signed_in(admin),
            None => AuthState::default(),
        };
        let (auth, set_auth) = create_signal(state);
        provide_context((auth, set_auth));
        (auth, set_auth)
    }
}
