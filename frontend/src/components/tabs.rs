use crate::state::tabs::Tab;
use leptos::*;

fn badge_class(active: bool) -> &'static str {
    if active {
        "ml-1 inline-flex min-w-[1.25rem] justify-center rounded-full px-1.5 text-xs bg-status-info-bg text-status-info-text"
    } else {
        "ml-1 inline-flex min-w-[1.25rem] justify-center rounded-full px-1.5 text-xs bg-surface-muted text-fg-muted"
    }
}

/// Toolbar menu of segmentation tabs, each with its badge count.
#[component]
pub fn TabBar(
    #[prop(into)] tabs: Signal<Vec<Tab>>,
    #[prop(into)] active: Signal<String>,
    on_select: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="flex space-x-4 border-b border-border" role="tablist">
            <For
                each=move || tabs.get()
                key=|tab| (tab.key.clone(), tab.badge_count)
                children=move |tab| {
                    let key = tab.key.clone();
                    let is_active = {
                        let key = key.clone();
                        move || active.get() == key
                    };
                    let is_active_aria = is_active.clone();
                    let is_active_badge = is_active.clone();
                    view! {
                        <button
                            type="button"
                            role="tab"
                            aria-selected=move || is_active_aria().to_string()
                            class=move || {
                                if is_active() {
                                    "px-2 py-2 text-sm font-medium border-b-2 border-action-primary-bg text-fg"
                                } else {
                                    "px-2 py-2 text-sm font-medium text-fg-muted hover:text-fg"
                                }
                            }
                            on:click=move |_| on_select.call(key.clone())
                        >
                            {tab.label}
                            <span class=move || badge_class(is_active_badge())>{tab.badge_count}</span>
                        </button>
                    }
                }
            />
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn renders_labels_badges_and_active_state() {
        let html = render_to_string(move || {
            let tabs = vec![
                Tab::new("wechat", "微信").with_badge(1),
                Tab::new("alipay", "支付宝").with_badge(2),
            ];
            view! {
                <TabBar
                    tabs=Signal::derive(move || tabs.clone())
                    active=Signal::derive(|| "alipay".to_string())
                    on_select=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("微信"));
        assert!(html.contains("支付宝"));
        assert_eq!(html.matches("aria-selected=\"true\"").count(), 1);
    }
}
