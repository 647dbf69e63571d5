use leptos::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="min-h-screen flex flex-col items-center justify-center bg-surface space-y-4">
            <p class="text-6xl font-extrabold text-fg">"404"</p>
            <p class="text-sm text-fg-muted">"抱歉，您访问的页面不存在。"</p>
            <a href="/" class="text-sm font-medium text-action-primary-bg hover:underline">"返回首页"</a>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn renders_home_link() {
        let html = render_to_string(|| view! { <NotFoundPage /> });
        assert!(html.contains("404"));
        assert!(html.contains("href=\"/\""));
    }
}
