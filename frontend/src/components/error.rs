use crate::{api::ApiError, state::modal_form::FieldErrors};
use leptos::*;

#[component]
pub fn InlineErrorMessage(#[prop(into)] error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ()>
            <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded space-y-1 my-2">
                <div class="font-bold">{move || error.get().map(|e| e.user_message()).unwrap_or_default()}</div>
                {move || error.get().map(|e| {
                    let code = e.code().to_string();
                    if e.is_business_like() && !code.is_empty() {
                        view! { <div class="text-xs opacity-75">{"Code: "}{code}</div> }.into_view()
                    } else {
                        ().into_view()
                    }
                }).unwrap_or_else(|| ().into_view())}
            </div>
        </Show>
    }
}

/// Inline message under one form field.
#[component]
pub fn FieldError(#[prop(into)] errors: Signal<FieldErrors>, name: &'static str) -> impl IntoView {
    move || {
        errors.get().get(name).cloned().map(|msg| {
            view! { <p class="mt-1 text-xs text-status-error-text">{msg}</p> }
        })
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn inline_error_renders_business_code() {
        let html = render_to_string(move || {
            let signal = create_rw_signal(Some(ApiError::business(
                "ERROR",
                "api_key name already exists",
            )));
            view! { <InlineErrorMessage error=signal /> }
        });
        assert!(html.contains("api_key name already exists"));
        assert!(html.contains("Code: ERROR"));
    }

    #[test]
    fn inline_error_renders_timeout_text() {
        let html = render_to_string(move || {
            let signal = create_rw_signal(Some(ApiError::timeout(2000)));
            view! { <InlineErrorMessage error=signal /> }
        });
        assert!(html.contains("提交超时，请重试"));
        assert!(html.contains("Code: TIMEOUT"));
    }

    #[test]
    fn field_error_shows_only_its_field() {
        let html = render_to_string(move || {
            let mut errors = FieldErrors::new();
            errors.insert("name".into(), "请输入名称".into());
            let errors = Signal::derive(move || errors.clone());
            view! {
                <div>
                    <FieldError errors=errors name="name" />
                    <FieldError errors=errors name="qrcode" />
                </div>
            }
        });
        assert_eq!(html.matches("请输入名称").count(), 1);
    }
}
