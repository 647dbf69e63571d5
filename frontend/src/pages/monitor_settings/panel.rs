use leptos::*;

use super::{
    types::MonitorDetail,
    view_model::{use_monitor_view_model, MonitorViewModel},
};
use crate::components::{
    common::{Button, ButtonVariant},
    error::InlineErrorMessage,
    layout::LoadingSpinner,
};

const LINKS: [&str; 3] = ["链路", "报警", "查看"];

#[component]
pub fn MonitorSettingsPage() -> impl IntoView {
    let vm = use_monitor_view_model();
    view! { <MonitorSettingsPanel vm=vm /> }
}

#[component]
fn MonitorSettingsPanel(vm: MonitorViewModel) -> impl IntoView {
    view! {
        <div class="space-y-4">
            <div class="flex justify-end">
                <Button variant=ButtonVariant::Default on_click=Callback::new(move |_| vm.refresh())>
                    "刷新"
                </Button>
            </div>
            <div class="rounded-lg border border-border bg-surface-elevated p-6 shadow-sm">
                <Suspense fallback=move || view! { <LoadingSpinner /> }>
                    {move || {
                        vm.detail.get().map(|result| match result {
                            Ok(detail) => view! { <MonitorDescriptions detail=detail /> }.into_view(),
                            Err(err) => {
                                let error = Signal::derive(move || Some(err.clone()));
                                view! { <InlineErrorMessage error=error /> }.into_view()
                            }
                        })
                    }}
                </Suspense>
            </div>
        </div>
    }
}

#[component]
pub fn MonitorDescriptions(detail: MonitorDetail) -> impl IntoView {
    let id = detail.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into());
    let date = detail.display_date();
    let money = detail.display_money();
    let state = detail.state;
    view! {
        <dl class="grid grid-cols-1 gap-4 sm:grid-cols-3 text-sm">
            <div>
                <dt class="text-fg-muted">"ID"</dt>
                <dd class="text-fg">{id}</dd>
            </div>
            <div>
                <dt class="text-fg-muted">"状态"</dt>
                <dd>
                    <span class=format!("px-2 inline-flex rounded-full text-xs {}", state.badge_class())>
                        {state.label()}
                    </span>
                </dd>
            </div>
            <div>
                <dt class="text-fg-muted">"时间"</dt>
                <dd class="text-fg">{date}</dd>
            </div>
            <div>
                <dt class="text-fg-muted">"开关"</dt>
                <dd class="text-fg">
                    <span role="switch" aria-checked=detail.switch.to_string()>
                        {if detail.switch { "开" } else { "关" }}
                    </span>
                </dd>
            </div>
            <div>
                <dt class="text-fg-muted">"money"</dt>
                <dd class="text-fg font-mono">{money}</dd>
            </div>
            <div>
                <dt class="text-fg-muted">"操作"</dt>
                <dd class="flex gap-2">
                    {LINKS
                        .iter()
                        .map(|label| view! { <a href="#" class="text-action-primary-bg hover:underline">{*label}</a> })
                        .collect_view()}
                </dd>
            </div>
        </dl>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;
    use serde_json::json;

    #[test]
    fn descriptions_render_every_field() {
        let html = render_to_string(|| {
            let detail: MonitorDetail = serde_json::from_value(json!({
                "id": 1,
                "date": "20200809",
                "money": "1212100",
                "state": "all",
                "switch": true
            }))
            .unwrap();
            view! { <MonitorDescriptions detail=detail /> }
        });
        assert!(html.contains("全部"));
        assert!(html.contains("2020-08-09"));
        assert!(html.contains("$1,212,100.00"));
        assert!(html.contains("aria-checked=\"true\""));
        assert!(html.contains("链路"));
        assert!(html.contains("报警"));
        assert!(html.contains("查看"));
    }

    #[test]
    fn page_shows_refresh_action() {
        let html = render_to_string(|| view! { <MonitorSettingsPage /> });
        assert!(html.contains("刷新"));
    }
}
