use leptos::{ev::SubmitEvent, *};

use super::{
    types::{format_money, format_time, OrderRecord, OrderStatus},
    view_model::{use_orders_view_model, OrdersViewModel},
};
use crate::components::{
    common::ButtonVariant,
    empty_state::EmptyState,
    layout::{ErrorMessage, LoadingSpinner, Notice},
    pagination::Pagination,
    tabs::TabBar,
};

const TH_CLASS: &str = "px-6 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider";
const TD_CLASS: &str = "px-6 py-4 whitespace-nowrap text-sm text-fg";

fn status_class(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Paid => "px-2 inline-flex text-xs leading-5 font-semibold rounded-full bg-status-success-bg text-status-success-text",
        OrderStatus::Expired => "px-2 inline-flex text-xs leading-5 font-semibold rounded-full bg-status-error-bg text-status-error-text",
        _ => "px-2 inline-flex text-xs leading-5 font-semibold rounded-full bg-surface-muted text-fg-muted",
    }
}

#[component]
pub fn OrdersPage() -> impl IntoView {
    match use_orders_view_model() {
        Ok(vm) => view! { <OrdersPanel vm=vm /> }.into_view(),
        Err(err) => view! { <ErrorMessage message=err.user_message() /> }.into_view(),
    }
}

#[component]
fn OrdersPanel(vm: OrdersViewModel) -> impl IntoView {
    let list = vm.list;
    let snapshot = list.snapshot();
    let tabs = Signal::derive(move || {
        snapshot.with(|s| s.tabs.as_ref().map(|t| t.tabs().to_vec()).unwrap_or_default())
    });
    let active = Signal::derive(move || snapshot.with(|s| s.scope.tab.clone().unwrap_or_default()));
    let message = Signal::derive(move || snapshot.with(|s| s.message.clone()));

    let on_search = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.apply_search();
    };

    view! {
        <div class="space-y-4">
            <Notice state=message />
            <div class="flex items-end justify-between gap-4">
                <TabBar
                    tabs=tabs
                    active=active
                    on_select=Callback::new(move |key: String| list.select_tab(key))
                />
                <form class="flex items-center gap-2" on:submit=on_search>
                    <input
                        type="search"
                        placeholder="订单号"
                        class="rounded-md border border-form-control-border bg-form-control-bg px-3 py-2 text-sm"
                        prop:value=move || vm.order_number.get()
                        on:input=move |ev| vm.order_number.set(event_target_value(&ev))
                    />
                    <button type="submit" class=format!("text-sm font-semibold {}", ButtonVariant::Default.classes())>
                        "查询"
                    </button>
                </form>
            </div>
            <div class="bg-surface-elevated shadow overflow-x-auto sm:rounded-lg">
                <table class="min-w-full divide-y divide-border">
                    <thead class="bg-surface-muted">
                        <tr>
                            <th class=TH_CLASS>"订单号"</th>
                            <th class=TH_CLASS>"支付方式"</th>
                            <th class=TH_CLASS>"状态"</th>
                            <th class=TH_CLASS>"订单金额"</th>
                            <th class=TH_CLASS>"实付金额"</th>
                            <th class=TH_CLASS>"支付时间"</th>
                            <th class=TH_CLASS>"创建时间"</th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-border">
                        {move || {
                            let current = snapshot.get();
                            if current.loading && current.records.is_empty() {
                                return view! { <tr><td colspan="7"><LoadingSpinner /></td></tr> }.into_view();
                            }
                            if current.records.is_empty() {
                                return view! {
                                    <tr>
                                        <td colspan="7" class="p-4">
                                            <EmptyState />
                                        </td>
                                    </tr>
                                }
                                .into_view();
                            }
                            current
                                .records
                                .into_iter()
                                .map(|order| view! { <OrderRow order=order /> })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </div>
            <Pagination
                page=Signal::derive(move || snapshot.with(|s| s.scope.page))
                page_size=Signal::derive(move || snapshot.with(|s| s.scope.page_size))
                total=Signal::derive(move || snapshot.with(|s| s.total))
                on_change=Callback::new(move |page| list.go_to_page(page))
            />
        </div>
    }
}

#[component]
fn OrderRow(order: OrderRecord) -> impl IntoView {
    view! {
        <tr>
            <td class=format!("{} font-mono", TD_CLASS)>{order.order_number}</td>
            <td class=TD_CLASS>{order.payment_method.label()}</td>
            <td class=TD_CLASS>
                <span class=status_class(order.status)>{order.status.label()}</span>
            </td>
            <td class=TD_CLASS>{format_money(order.price)}</td>
            <td class=TD_CLASS>{format_money(order.amount)}</td>
            <td class=TD_CLASS>{format_time(order.pay_time)}</td>
            <td class=TD_CLASS>{format_time(order.create_time)}</td>
        </tr>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;
    use serde_json::json;

    #[test]
    fn page_renders_status_tabs_without_create_action() {
        let html = render_to_string(|| view! { <OrdersPage /> });
        assert!(html.contains("未支付"));
        assert!(html.contains("已支付"));
        assert!(html.contains("超时"));
        assert!(html.contains("订单号"));
        assert!(!html.contains("新建"));
        assert!(!html.contains("编辑"));
    }

    #[test]
    fn row_formats_money_and_times() {
        let html = render_to_string(|| {
            let order: OrderRecord = serde_json::from_value(json!({
                "id": 11,
                "order_number": "20230801120000123456",
                "payment_method": 2,
                "status": 2,
                "price": 9.9,
                "create_time": "2023-08-01T12:00:00"
            }))
            .unwrap();
            view! { <table><tbody><OrderRow order=order /></tbody></table> }
        });
        assert!(html.contains("20230801120000123456"));
        assert!(html.contains("支付宝"));
        assert!(html.contains("超时"));
        assert!(html.contains("¥9.90"));
        assert!(html.contains("2023-08-01 12:00:00"));
    }
}
