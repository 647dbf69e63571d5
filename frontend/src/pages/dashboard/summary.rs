use leptos::*;

use crate::routes::NavItem;

/// One card per reachable page, flattening menu groups.
pub fn shortcut_cards(nav: &[NavItem]) -> Vec<(String, &'static str)> {
    nav.iter()
        .flat_map(|item| {
            if item.children.is_empty() {
                vec![(item.path.clone(), item.name)]
            } else {
                item.children
                    .iter()
                    .map(|child| (child.path.clone(), child.name))
                    .collect()
            }
        })
        .filter(|(path, _)| path != "/dashboard")
        .collect()
}

#[component]
pub fn SummaryCard(
    #[prop(into)] title: String,
    #[prop(into)] value: String,
    #[prop(optional, into)] href: Option<String>,
) -> impl IntoView {
    view! {
        <div class="rounded-lg border border-border bg-surface-elevated p-4 shadow-sm">
            <p class="text-sm text-fg-muted">{title}</p>
            {match href {
                Some(href) => view! {
                    <a href=href class="mt-2 block text-lg font-semibold text-action-primary-bg hover:underline">{value}</a>
                }
                .into_view(),
                None => view! { <p class="mt-2 text-2xl font-semibold text-fg">{value}</p> }.into_view(),
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::{console_routes, resolve, Capabilities, CAN_ADMIN};

    #[test]
    fn super_admin_gets_settings_shortcuts() {
        let nav = resolve(&console_routes(), &Capabilities::none().with(CAN_ADMIN)).nav_items();
        let cards = shortcut_cards(&nav);
        let paths: Vec<_> = cards.iter().map(|(path, _)| path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["/admin/pay-settings", "/admin/monitor-settings", "/admin/api-settings", "/list"]
        );
    }

    #[test]
    fn regular_admin_only_sees_orders() {
        let nav = resolve(&console_routes(), &Capabilities::none()).nav_items();
        assert_eq!(shortcut_cards(&nav), vec![("/list".to_string(), "订单列表")]);
    }
}
