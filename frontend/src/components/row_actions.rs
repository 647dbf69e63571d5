use leptos::*;

use super::common::{Button, ButtonVariant};
use crate::state::resource_list::RowAction;

/// Button text for `action` on a row whose enabled flag is `enabled`.
pub fn action_label(action: RowAction, enabled: bool) -> &'static str {
    match action {
        RowAction::Disable if !enabled => "启用",
        other => other.label(),
    }
}

/// 编辑 / 禁用 / 删除 links of one row.
#[component]
pub fn RowActions(
    enabled: bool,
    on_action: Callback<RowAction>,
    #[prop(optional)] actions: Option<Vec<RowAction>>,
) -> impl IntoView {
    let actions = actions.unwrap_or_else(|| RowAction::ALL.to_vec());
    view! {
        <div class="flex items-center gap-2">
            {actions
                .into_iter()
                .map(|action| {
                    let class = if action == RowAction::Delete {
                        "text-status-error-text"
                    } else {
                        ""
                    };
                    view! {
                        <Button
                            variant=ButtonVariant::Link
                            class=class
                            on_click=Callback::new(move |_| on_action.call(action))
                        >
                            {action_label(action, enabled)}
                        </Button>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn disable_flips_to_enable_for_disabled_rows() {
        assert_eq!(action_label(RowAction::Disable, true), "禁用");
        assert_eq!(action_label(RowAction::Disable, false), "启用");
        assert_eq!(action_label(RowAction::Delete, false), "删除");
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn renders_every_action_by_default() {
        let html = render_to_string(|| {
            view! { <RowActions enabled=true on_action=Callback::new(|_| {}) /> }
        });
        assert!(html.contains("编辑"));
        assert!(html.contains("禁用"));
        assert!(html.contains("删除"));
    }

    #[test]
    fn renders_a_subset_when_asked() {
        let html = render_to_string(|| {
            view! {
                <RowActions
                    enabled=true
                    on_action=Callback::new(|_| {})
                    actions=vec![RowAction::Edit, RowAction::Delete]
                />
            }
        });
        assert!(html.contains("编辑"));
        assert!(!html.contains("禁用"));
    }
}
