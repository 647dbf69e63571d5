use crate::{
    components::{
        common::{Button, ButtonVariant},
        error::{FieldError, InlineErrorMessage},
    },
    state::modal_form::{FieldRule, FormMode, FormPhase, FormSnapshot},
};
use leptos::{ev::SubmitEvent, *};

pub fn form_title(mode: Option<FormMode>) -> &'static str {
    match mode {
        Some(FormMode::Edit(_)) => "编辑表单",
        _ => "新建表单",
    }
}

/// Modal dialog over one form session. Inputs are written back through
/// `on_input` so the session stays the single source of field values.
#[component]
pub fn ModalForm(
    #[prop(into)] snapshot: Signal<FormSnapshot>,
    fields: Vec<FieldRule>,
    on_input: Callback<(&'static str, String)>,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let is_open = move || snapshot.with(|s| s.phase != FormPhase::Closed);
    let submitting = Signal::derive(move || snapshot.with(|s| s.phase == FormPhase::Submitting));
    let field_errors = Signal::derive(move || snapshot.with(|s| s.field_errors.clone()));
    let error = Signal::derive(move || snapshot.with(|s| s.error.clone()));
    let fields = store_value(fields);

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        on_submit.call(());
    };

    view! {
        <Show when=is_open>
            <div class="fixed inset-0 z-[60] flex items-center justify-center p-4">
                <div class="absolute inset-0 bg-overlay-backdrop" on:click=move |_| on_cancel.call(())></div>
                <form
                    class="relative z-[61] w-full max-w-lg rounded-lg bg-surface-elevated shadow-xl border border-border p-6 space-y-4"
                    role="dialog"
                    aria-modal="true"
                    on:submit=handle_submit
                >
                    <h2 class="text-lg font-semibold text-fg">
                        {move || form_title(snapshot.with(|s| s.mode))}
                    </h2>
                    <InlineErrorMessage error=error />
                    {fields
                        .get_value()
                        .into_iter()
                        .map(|rule| {
                            let name = rule.name;
                            view! {
                                <label class="block">
                                    <span class="text-sm text-fg">
                                        {rule.label}
                                        {rule.required.then_some(" *")}
                                    </span>
                                    <input
                                        name=name
                                        class="mt-1 w-full rounded-md border border-form-control-border bg-form-control-bg px-3 py-2 text-sm"
                                        maxlength=rule.max_len.map(|len| len.to_string())
                                        prop:value=move || snapshot.with(|s| s.values.get(name).to_string())
                                        on:input=move |ev| on_input.call((name, event_target_value(&ev)))
                                    />
                                    <FieldError errors=field_errors name=name />
                                </label>
                            }
                        })
                        .collect_view()}
                    <div class="flex justify-end gap-2">
                        <Button
                            variant=ButtonVariant::Default
                            disabled=submitting
                            on_click=Callback::new(move |_| on_cancel.call(()))
                        >
                            "取消"
                        </Button>
                        <button
                            type="submit"
                            class=format!("inline-flex items-center justify-center text-sm font-semibold disabled:opacity-50 {}", ButtonVariant::Primary.classes())
                            disabled=move || submitting.get()
                        >
                            {move || if submitting.get() { "提交中..." } else { "提交" }}
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::state::modal_form::{FieldErrors, FormValues};
    use crate::test_support::ssr::render_to_string;

    fn fields() -> Vec<FieldRule> {
        vec![
            FieldRule::new("name", "名称").required().max_len(32),
            FieldRule::new("qrcode", "二维码内容"),
        ]
    }

    fn render(snapshot: FormSnapshot) -> String {
        render_to_string(move || {
            view! {
                <ModalForm
                    snapshot=Signal::derive(move || snapshot.clone())
                    fields=fields()
                    on_input=Callback::new(|_| {})
                    on_submit=Callback::new(|_| {})
                    on_cancel=Callback::new(|_| {})
                />
            }
        })
    }

    fn open_snapshot(mode: FormMode) -> FormSnapshot {
        FormSnapshot {
            phase: FormPhase::Open,
            mode: Some(mode),
            values: FormValues::new().with("name", "名称2"),
            field_errors: FieldErrors::new(),
            error: None,
            session: 1,
        }
    }

    #[test]
    fn closed_form_renders_nothing() {
        let html = render(FormSnapshot {
            phase: FormPhase::Closed,
            mode: None,
            values: FormValues::new(),
            field_errors: FieldErrors::new(),
            error: None,
            session: 0,
        });
        assert!(!html.contains("role=\"dialog\""));
    }

    #[test]
    fn edit_form_renders_fields_and_title() {
        let html = render(open_snapshot(FormMode::Edit(2)));
        assert!(html.contains("编辑表单"));
        assert!(html.contains("名称"));
        assert!(html.contains("二维码内容"));
        assert!(html.contains("maxlength=\"32\""));
    }

    #[test]
    fn submitting_form_disables_submit() {
        let mut snapshot = open_snapshot(FormMode::Create);
        snapshot.phase = FormPhase::Submitting;
        let html = render(snapshot);
        assert!(html.contains("新建表单"));
        assert!(html.contains("提交中..."));
    }

    #[test]
    fn field_errors_are_rendered_inline() {
        let mut snapshot = open_snapshot(FormMode::Create);
        snapshot
            .field_errors
            .insert("name".into(), "请输入名称".into());
        let html = render(snapshot);
        assert!(html.contains("请输入名称"));
    }
}
