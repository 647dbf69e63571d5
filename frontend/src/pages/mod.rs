use leptos::*;

use crate::routes::PageId;

pub mod api_settings;
pub mod dashboard;
pub mod login;
pub mod monitor_settings;
pub mod not_found;
pub mod orders;
pub mod pay_settings;

use api_settings::ApiSettingsPage;
use dashboard::DashboardPage;
use login::LoginPage;
use monitor_settings::MonitorSettingsPage;
use not_found::NotFoundPage;
use orders::OrdersPage;
use pay_settings::PaySettingsPage;

/// View of a routed page.
pub fn render(page: PageId) -> View {
    match page {
        PageId::Login => view! { <LoginPage /> }.into_view(),
        PageId::Dashboard => view! { <DashboardPage /> }.into_view(),
        PageId::PaySettings => view! { <PaySettingsPage /> }.into_view(),
        PageId::MonitorSettings => view! { <MonitorSettingsPage /> }.into_view(),
        PageId::ApiSettings => view! { <ApiSettingsPage /> }.into_view(),
        PageId::Orders => view! { <OrdersPage /> }.into_view(),
        PageId::NotFound => view! { <NotFoundPage /> }.into_view(),
    }
}
