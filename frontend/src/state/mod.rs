pub mod auth;
pub mod list_view;
pub mod message;
pub mod modal_form;
pub mod resource_list;
pub mod tabs;
