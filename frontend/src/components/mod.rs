pub mod common;
pub mod confirm_dialog;
pub mod empty_state;
pub mod error;
pub mod guard;
pub mod layout;
pub mod modal_form;
pub mod pagination;
pub mod qr_code;
pub mod row_actions;
pub mod tabs;
