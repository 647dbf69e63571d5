use crate::{
    api::{ApiError, LOGIN_PATH},
    routes::{console_routes, resolve, NavItem},
    state::{
        auth::{self, use_auth},
        message::MessageState,
    },
};
use leptos::*;

const NAV_LINK_CLASS: &str =
    "text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover";

/// Menu entries reachable for the current admin.
fn visible_nav_items() -> Signal<Vec<NavItem>> {
    let (auth, _) = use_auth();
    Signal::derive(move || resolve(&console_routes(), &auth.get()).nav_items())
}

#[component]
pub fn Header() -> impl IntoView {
    let (auth, _set_auth) = use_auth();
    let nav_items = visible_nav_items();
    let display_name = move || {
        auth.get()
            .admin
            .as_ref()
            .map(|admin| admin.display_name().to_string())
            .unwrap_or_default()
    };
    let logout = auth::use_logout();
    let on_logout = move |_| {
        logout.call(());
        if let Some(win) = web_sys::window() {
            let _ = win.location().set_href(LOGIN_PATH);
        }
    };
    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <h1 class="text-xl font-semibold text-fg">"MiDo"</h1>
                    <nav class="flex items-center space-x-2">
                        <For
                            each=move || nav_items.get()
                            key=|item| item.path.clone()
                            children=move |item| view! { <NavEntry item=item /> }
                        />
                        <span class="text-sm text-fg-muted px-3">{display_name}</span>
                        <button on:click=on_logout class=NAV_LINK_CLASS>
                            "退出登录"
                        </button>
                    </nav>
                </div>
            </div>
        </header>
    }
}

#[component]
fn NavEntry(item: NavItem) -> impl IntoView {
    if item.children.is_empty() {
        return view! { <a href=item.path class=NAV_LINK_CLASS>{item.name}</a> }.into_view();
    }
    view! {
        <div class="relative group">
            <span class=NAV_LINK_CLASS>{item.name}</span>
            <div class="absolute hidden group-hover:block bg-surface-elevated border border-border rounded-md shadow-lg z-10">
                {item
                    .children
                    .into_iter()
                    .map(|child| {
                        view! {
                            <a href=child.path class="block whitespace-nowrap px-4 py-2 text-sm text-fg-muted hover:bg-action-ghost-bg-hover">
                                {child.name}
                            </a>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
    .into_view()
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-7xl mx-auto py-6 sm:px-6 lg:px-8">
                {children()}
            </main>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(message: String) -> impl IntoView {
    view! {
        <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4" role="alert">
            <p class="text-sm">{message}</p>
        </div>
    }
}

#[component]
pub fn SuccessMessage(message: String) -> impl IntoView {
    view! {
        <div class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded mb-4" role="status">
            <p class="text-sm">{message}</p>
        </div>
    }
}

/// Success or error line of a [`MessageState`].
#[component]
pub fn Notice(#[prop(into)] state: Signal<MessageState>) -> impl IntoView {
    move || {
        let state = state.get();
        match (state.error, state.success) {
            (Some(err), _) => view! { <ErrorMessage message=notice_text(&err) /> }.into_view(),
            (None, Some(msg)) => view! { <SuccessMessage message=msg /> }.into_view(),
            (None, None) => ().into_view(),
        }
    }
}

fn notice_text(err: &ApiError) -> String {
    match err.code() {
        crate::api::error::REQUEST_FAILED | crate::api::error::TIMEOUT => err.user_message(),
        code => format!("{} ({})", err.user_message(), code),
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{admin_info, provide_auth};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn header_shows_settings_menu_for_super_admin() {
        let html = render_to_string(move || {
            provide_auth(Some(admin_info(0)));
            view! { <Header /> }
        });
        assert!(html.contains("仪表盘"));
        assert!(html.contains("设置"));
        assert!(html.contains("/admin/pay-settings"));
        assert!(html.contains("订单列表"));
        assert!(!html.contains("登录</a>"));
    }

    #[test]
    fn header_hides_settings_menu_for_regular_admin() {
        let html = render_to_string(move || {
            provide_auth(Some(admin_info(1)));
            view! { <Header /> }
        });
        assert!(html.contains("仪表盘"));
        assert!(!html.contains("/admin/pay-settings"));
        assert!(!html.contains("API设置"));
    }

    #[test]
    fn layout_renders_children() {
        let html = render_to_string(move || {
            provide_auth(Some(admin_info(0)));
            view! { <Layout><div>"child"</div></Layout> }
        });
        assert!(html.contains("child"));
        assert!(html.contains("MiDo"));
    }

    #[test]
    fn notice_prefers_error_over_success() {
        let html = render_to_string(move || {
            let mut state = MessageState::default();
            state.set_error(ApiError::business("ERROR", "api_key not found"));
            view! { <Notice state=Signal::derive(move || state.clone()) /> }
        });
        assert!(html.contains("api_key not found (ERROR)"));

        let html = render_to_string(move || {
            let mut state = MessageState::default();
            state.set_success("删除成功");
            view! { <Notice state=Signal::derive(move || state.clone()) /> }
        });
        assert!(html.contains("删除成功"));
    }

    #[test]
    fn transport_notice_is_generic() {
        assert_eq!(
            notice_text(&ApiError::transport("Request failed: refused")),
            "网络异常，请稍后重试"
        );
    }

    #[test]
    fn renders_feedback_components() {
        let html = render_to_string(move || {
            view! {
                <div>
                    <LoadingSpinner />
                    <ErrorMessage message="error".into() />
                    <SuccessMessage message="ok".into() />
                </div>
            }
        });
        assert!(html.contains("animate-spin"));
        assert!(html.contains("error"));
        assert!(html.contains("ok"));
    }
}
