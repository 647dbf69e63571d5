use leptos::*;

use super::summary::{shortcut_cards, SummaryCard};
use crate::{
    routes::{console_routes, resolve},
    state::auth::use_auth,
};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let (auth, _) = use_auth();
    let greeting = move || {
        auth.with(|state| {
            state
                .admin
                .as_ref()
                .map(|admin| format!("欢迎回来，{}", admin.display_name()))
                .unwrap_or_else(|| "欢迎使用 MiDo".to_string())
        })
    };
    let shortcuts = move || auth.with(|state| shortcut_cards(&resolve(&console_routes(), state).nav_items()));

    view! {
        <div class="space-y-6">
            <h2 class="text-2xl font-bold text-fg">{greeting}</h2>
            <div class="grid grid-cols-1 gap-4 sm:grid-cols-2 lg:grid-cols-4">
                {move || {
                    shortcuts()
                        .into_iter()
                        .map(|(path, name)| view! { <SummaryCard title="快捷入口" value=name href=path /> })
                        .collect_view()
                }}
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{admin_info, provide_auth};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn greets_the_admin_and_links_reachable_pages() {
        let html = render_to_string(|| {
            provide_auth(Some(admin_info(1)));
            view! { <DashboardPage /> }
        });
        assert!(html.contains("欢迎回来，Root"));
        assert!(html.contains("href=\"/list\""));
        assert!(!html.contains("/admin/api-settings"));
    }
}
