use leptos::{ev::SubmitEvent, *};

use super::{
    repository::{api_key_form_fields, API_KEY_ACTIONS},
    types::ApiKeyRecord,
    view_model::{use_api_settings_view_model, ApiSettingsViewModel},
};
use crate::{
    components::{
        common::{Button, ButtonVariant},
        confirm_dialog::ConfirmDialog,
        empty_state::EmptyState,
        layout::{LoadingSpinner, Notice},
        modal_form::ModalForm,
        pagination::Pagination,
        row_actions::RowActions,
    },
    state::resource_list::RowAction,
};

const TH_CLASS: &str = "px-6 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider";
const TD_CLASS: &str = "px-6 py-4 whitespace-nowrap text-sm text-fg";

#[component]
pub fn ApiSettingsPage() -> impl IntoView {
    let vm = use_api_settings_view_model();
    view! { <ApiSettingsPanel vm=vm /> }
}

#[component]
fn ApiSettingsPanel(vm: ApiSettingsViewModel) -> impl IntoView {
    let list = vm.list;
    let snapshot = list.snapshot();
    let message = Signal::derive(move || snapshot.with(|s| s.message.clone()));
    let form = Signal::derive(move || snapshot.with(|s| s.form.clone()));
    let delete_open = Signal::derive(move || list.pending_delete.with(Option::is_some));
    let delete_message = Signal::derive(move || {
        list.pending_delete.with(|pending| {
            pending
                .as_ref()
                .map(|key| format!("删除后使用 {} 的商户将无法下单，确定删除吗？", key.name))
                .unwrap_or_default()
        })
    });

    let on_search = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.apply_search();
    };

    view! {
        <div class="space-y-4">
            <Notice state=message />
            <div class="flex items-center justify-between gap-4">
                <form class="flex items-center gap-2" on:submit=on_search>
                    <input
                        type="search"
                        placeholder="按名称搜索"
                        class="rounded-md border border-form-control-border bg-form-control-bg px-3 py-2 text-sm"
                        prop:value=move || vm.keyword.get()
                        on:input=move |ev| vm.keyword.set(event_target_value(&ev))
                    />
                    <button type="submit" class=format!("text-sm font-semibold {}", ButtonVariant::Default.classes())>
                        "查询"
                    </button>
                </form>
                <Button on_click=Callback::new(move |_| list.open_create())>"新建"</Button>
            </div>
            <div class="bg-surface-elevated shadow overflow-x-auto sm:rounded-lg">
                <table class="min-w-full divide-y divide-border">
                    <thead class="bg-surface-muted">
                        <tr>
                            <th class=TH_CLASS>"名称"</th>
                            <th class=TH_CLASS>"Access Key"</th>
                            <th class=TH_CLASS>"备注"</th>
                            <th class=TH_CLASS>"操作"</th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-border">
                        {move || {
                            let current = snapshot.get();
                            if current.loading && current.records.is_empty() {
                                return view! { <tr><td colspan="4"><LoadingSpinner /></td></tr> }.into_view();
                            }
                            if current.records.is_empty() {
                                return view! {
                                    <tr>
                                        <td colspan="4" class="p-4">
                                            <EmptyState description="还没有创建任何 API Key" />
                                        </td>
                                    </tr>
                                }
                                .into_view();
                            }
                            current
                                .records
                                .into_iter()
                                .map(|key| {
                                    view! {
                                        <ApiKeyRow
                                            key_record=key
                                            on_action=Callback::new(move |(action, key): (RowAction, ApiKeyRecord)| {
                                                list.request(action, key)
                                            })
                                        />
                                    }
                                })
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
            <ModalForm
                snapshot=form
                fields=api_key_form_fields()
                on_input=Callback::new(move |(name, value): (&'static str, String)| list.set_field(name, value))
                on_submit=Callback::new(move |_| list.submit())
                on_cancel=Callback::new(move |_| list.close_form())
            />
            <ConfirmDialog
                is_open=delete_open
                title="删除 API Key"
                message=delete_message
                on_confirm=Callback::new(move |_| list.confirm_delete())
                on_cancel=Callback::new(move |_| list.cancel_delete())
                pending=Signal::derive(move || list.row_action.pending().get())
            />
        </div>
    }
}

#[component]
fn ApiKeyRow(key_record: ApiKeyRecord, on_action: Callback<(RowAction, ApiKeyRecord)>) -> impl IntoView {
    let row = key_record.clone();
    let masked = key_record.masked_ak();
    let enabled = key_record.enabled;
    view! {
        <tr>
            <td class=TD_CLASS>{key_record.name}</td>
            <td class=format!("{} font-mono", TD_CLASS) title=key_record.ak>{masked}</td>
            <td class=TD_CLASS>{key_record.remark}</td>
            <td class=TD_CLASS>
                <RowActions
                    enabled=enabled
                    actions=API_KEY_ACTIONS.to_vec()
                    on_action=Callback::new(move |action| on_action.call((action, row.clone())))
                />
            </td>
        </tr>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn page_renders_toolbar_and_empty_table() {
        let html = render_to_string(|| view! { <ApiSettingsPage /> });
        assert!(html.contains("Access Key"));
        assert!(html.contains("新建"));
        assert!(html.contains("查询"));
        assert!(html.contains("暂无数据"));
        assert!(html.contains("共 0 条"));
    }

    #[test]
    fn row_masks_access_key_and_offers_edit_and_delete() {
        let html = render_to_string(|| {
            let key = ApiKeyRecord {
                id: 1,
                name: "shop".into(),
                ak: "0123456789abcdef".into(),
                remark: "main store".into(),
                enabled: true,
            };
            view! {
                <table><tbody>
                    <ApiKeyRow key_record=key on_action=Callback::new(|_| {}) />
                </tbody></table>
            }
        });
        assert!(html.contains("0123****cdef"));
        assert!(html.contains("main store"));
        assert!(html.contains("编辑"));
        assert!(!html.contains("禁用"));
    }
}
