use leptos::ev::KeyboardEvent;
use leptos::*;

use super::common::{Button, ButtonVariant};

/// Yes/no dialog guarding a destructive row action.
#[component]
pub fn ConfirmDialog(
    is_open: Signal<bool>,
    #[prop(into)] title: MaybeSignal<String>,
    #[prop(into)] message: MaybeSignal<String>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
    #[prop(optional, into)] pending: MaybeSignal<bool>,
) -> impl IntoView {
    let title_text = Signal::derive(move || title.get());
    let message_text = Signal::derive(move || message.get());
    let is_pending = Signal::derive(move || pending.get());
    view! {
        <Show when=move || is_open.get()>
            <div class="fixed inset-0 z-[70] flex items-center justify-center p-4">
                <div
                    class="absolute inset-0 bg-overlay-backdrop"
                    on:click=move |_| on_cancel.call(())
                ></div>
                <div
                    class="relative z-[71] w-full max-w-md rounded-lg bg-surface-elevated shadow-xl border border-border p-6 space-y-4"
                    role="alertdialog"
                    aria-modal="true"
                    tabindex="-1"
                    on:keydown=move |ev: KeyboardEvent| {
                        if ev.key() == "Escape" {
                            ev.prevent_default();
                            on_cancel.call(());
                        }
                    }
                >
                    <h2 class="text-lg font-semibold text-fg">{move || title_text.get()}</h2>
                    <p class="text-sm text-fg-muted">{move || message_text.get()}</p>
                    <div class="flex justify-end gap-2">
                        <Button
                            variant=ButtonVariant::Default
                            on_click=Callback::new(move |_| on_cancel.call(()))
                        >
                            "取消"
                        </Button>
                        <Button
                            variant=ButtonVariant::Danger
                            loading=is_pending
                            on_click=Callback::new(move |_| on_confirm.call(()))
                        >
                            "确定"
                        </Button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn confirm_dialog_renders_when_open() {
        let html = render_to_string(move || {
            view! {
                <ConfirmDialog
                    is_open=Signal::derive(|| true)
                    title="删除确认"
                    message="确定删除名称2吗？"
                    on_confirm=Callback::new(|_| {})
                    on_cancel=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("role=\"alertdialog\""));
        assert!(html.contains("确定删除名称2吗？"));
        assert!(html.contains("取消"));
    }

    #[test]
    fn confirm_dialog_tracks_reactive_text() {
        let html = render_to_string(move || {
            let name = create_rw_signal("名称1".to_string());
            name.set("名称2".to_string());
            view! {
                <ConfirmDialog
                    is_open=Signal::derive(|| true)
                    title="删除确认"
                    message=Signal::derive(move || format!("确定删除{}吗？", name.get()))
                    on_confirm=Callback::new(|_| {})
                    on_cancel=Callback::new(|_| {})
                    pending=Signal::derive(|| false)
                />
            }
        });
        assert!(html.contains("确定删除名称2吗？"));
        assert!(!html.contains("名称1"));
    }

    #[test]
    fn confirm_dialog_renders_nothing_when_closed() {
        let html = render_to_string(move || {
            view! {
                <ConfirmDialog
                    is_open=Signal::derive(|| false)
                    title="删除确认"
                    message="确定删除名称2吗？"
                    on_confirm=Callback::new(|_| {})
                    on_cancel=Callback::new(|_| {})
                />
            }
        });
        assert!(!html.contains("alertdialog"));
    }
}
