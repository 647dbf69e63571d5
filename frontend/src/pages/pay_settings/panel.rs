use leptos::*;

use super::{
    repository::channel_form_fields,
    types::{ContentField, PaymentChannel},
    view_model::{use_pay_settings_view_model, PaySettingsViewModel},
};
use crate::{
    components::{
        common::Button,
        confirm_dialog::ConfirmDialog,
        empty_state::EmptyState,
        layout::{ErrorMessage, LoadingSpinner, Notice},
        modal_form::ModalForm,
        qr_code::QrPreview,
        row_actions::RowActions,
        tabs::TabBar,
    },
    state::resource_list::{Record, RowAction},
};

#[component]
pub fn PaySettingsPage() -> impl IntoView {
    match use_pay_settings_view_model() {
        Ok(vm) => view! { <PaySettingsPanel vm=vm /> }.into_view(),
        Err(err) => view! { <ErrorMessage message=err.user_message() /> }.into_view(),
    }
}

#[component]
fn PaySettingsPanel(vm: PaySettingsViewModel) -> impl IntoView {
    let snapshot = vm.snapshot();
    let tabs = Signal::derive(move || {
        snapshot.with(|s| s.tabs.as_ref().map(|t| t.tabs().to_vec()).unwrap_or_default())
    });
    let active = Signal::derive(move || snapshot.with(|s| s.scope.tab.clone().unwrap_or_default()));
    let message = Signal::derive(move || snapshot.with(|s| s.message.clone()));
    let form = Signal::derive(move || snapshot.with(|s| s.form.clone()));
    let delete_open = Signal::derive(move || vm.pending_delete.with(Option::is_some));
    let delete_message = Signal::derive(move || {
        vm.pending_delete.with(|pending| {
            pending
                .as_ref()
                .map(|channel| format!("确定删除{}吗？", channel.name))
                .unwrap_or_default()
        })
    });

    view! {
        <div class="space-y-4">
            <Notice state=message />
            <div class="flex items-end justify-between">
                <TabBar
                    tabs=tabs
                    active=active
                    on_select=Callback::new(move |key: String| vm.select_tab(key))
                />
                <Button on_click=Callback::new(move |_| vm.open_create())>"新建"</Button>
            </div>
            {move || {
                let current = snapshot.get();
                if current.loading && current.records.is_empty() {
                    return view! { <LoadingSpinner /> }.into_view();
                }
                if current.records.is_empty() {
                    return view! { <EmptyState description="当前渠道还没有收款码" /> }.into_view();
                }
                current
                    .records
                    .into_iter()
                    .map(|channel| {
                        view! {
                            <ChannelCard
                                channel=channel
                                on_action=Callback::new(move |(action, channel): (RowAction, PaymentChannel)| {
                                    vm.request(action, channel)
                                })
                            />
                        }
                    })
                    .collect_view()
            }}
            <ModalForm
                snapshot=form
                fields=channel_form_fields()
                on_input=Callback::new(move |(name, value): (&'static str, String)| vm.set_field(name, value))
                on_submit=Callback::new(move |_| vm.submit())
                on_cancel=Callback::new(move |_| vm.close_form())
            />
            <ConfirmDialog
                is_open=delete_open
                title="删除确认"
                message=delete_message
                on_confirm=Callback::new(move |_| vm.confirm_delete())
                on_cancel=Callback::new(move |_| vm.cancel_delete())
                pending=Signal::derive(move || vm.row_action.pending().get())
            />
        </div>
    }
}

#[component]
pub fn ChannelCard(
    channel: PaymentChannel,
    on_action: Callback<(RowAction, PaymentChannel)>,
) -> impl IntoView {
    let enabled = channel.is_enabled();
    let qrcode = channel.qrcode.clone();
    let row = channel.clone();
    view! {
        <div class="rounded-lg border border-border bg-surface-elevated p-4 shadow-sm">
            <div class="flex items-start justify-between gap-4">
                <div class="space-y-1">
                    <h3 class="text-base font-semibold text-fg">{channel.name}</h3>
                    {channel.desc.map(|desc| view! { <p class="text-sm text-fg-muted">{desc}</p> })}
                </div>
                <RowActions
                    enabled=enabled
                    on_action=Callback::new(move |action| on_action.call((action, row.clone())))
                />
            </div>
            <div class="mt-4 flex items-center justify-around gap-4">
                <QrPreview payload=Signal::derive(move || qrcode.clone()) size=96 />
                {channel.content.into_iter().map(|field| view! { <ContentCell field=field /> }).collect_view()}
            </div>
        </div>
    }
}

#[component]
fn ContentCell(field: ContentField) -> impl IntoView {
    let success = field.is_success();
    let value = field.display_value();
    view! {
        <div class="text-sm">
            <div class="text-fg-muted">{field.label}</div>
            <div class="text-fg">
                {success.then(|| view! { <span class="mr-2 inline-block h-2 w-2 rounded-full bg-status-success-text" data-status="success"></span> })}
                {value}
            </div>
        </div>
    }
}
