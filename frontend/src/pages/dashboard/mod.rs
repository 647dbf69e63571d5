pub mod panel;
pub mod summary;

pub use panel::DashboardPage;
