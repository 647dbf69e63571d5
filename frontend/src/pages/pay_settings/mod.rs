pub mod panel;
pub mod repository;
pub mod types;
pub mod view_model;

pub use panel::PaySettingsPage;
