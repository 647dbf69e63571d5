use super::{repository::pay_channel_list, types::PaymentChannel};
use crate::{
    api::ApiError,
    config,
    state::list_view::{use_gateway, use_list_view_model, ListViewModel},
};

pub type PaySettingsViewModel = ListViewModel<PaymentChannel>;

pub fn use_pay_settings_view_model() -> Result<PaySettingsViewModel, ApiError> {
    let controller = pay_channel_list(use_gateway(), &config::current())?;
    Ok(use_list_view_model(controller))
}
