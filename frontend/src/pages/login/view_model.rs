use crate::api::{ApiError, LoginRequest};
use crate::state::auth;
use leptos::*;

pub const HOME_PATH: &str = "/dashboard";

#[derive(Clone, Copy)]
pub struct LoginViewModel {
    pub account: RwSignal<String>,
    pub password: RwSignal<String>,
    pub error: RwSignal<Option<ApiError>>,
    pub login_action: Action<LoginRequest, Result<(), ApiError>>,
}

impl LoginViewModel {
    pub fn submit(&self) {
        if self.login_action.pending().get_untracked() {
            return;
        }
        self.error.set(None);
        self.login_action.dispatch(LoginRequest {
            account: self.account.get_untracked(),
            password: self.password.get_untracked(),
        });
    }
}

pub fn use_login_view_model() -> LoginViewModel {
    let account = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let error = create_rw_signal(None::<ApiError>);
    let login_action = auth::use_login_action();

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(()) => {
                    error.set(None);
                    password.set(String::new());
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href(HOME_PATH);
                    }
                }
                Err(err) => error.set(Some(err)),
            }
        }
    });

    LoginViewModel {
        account,
        password,
        error,
        login_action,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn login_view_model_defaults_empty() {
        with_runtime(|| {
            let vm = use_login_view_model();
            assert!(vm.error.get_untracked().is_none());
            assert!(vm.account.get_untracked().is_empty());
            assert!(!vm.login_action.pending().get_untracked());
        });
    }
}
