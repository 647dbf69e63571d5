use std::rc::Rc;

use super::types::PaymentChannel;
use crate::{
    api::{ApiError, RemoteDataGateway, ResourceEndpoints},
    config::ConsoleConfig,
    state::{
        modal_form::{FieldRule, FormSchema, ModalFormController},
        resource_list::{ResourceListController, ResourceSpec},
        tabs::{Tab, TabSegmentController},
    },
};

pub const PAY_CHANNELS: ResourceSpec =
    ResourceSpec::new(ResourceEndpoints::new("/admin/pay-channels")).tab_param("channel");

pub const WECHAT: &str = "wechat";
pub const ALIPAY: &str = "alipay";

pub fn channel_tabs() -> Vec<Tab> {
    vec![Tab::new(WECHAT, "微信"), Tab::new(ALIPAY, "支付宝")]
}

pub fn channel_form_fields() -> Vec<FieldRule> {
    vec![
        FieldRule::new("name", "名称").required().max_len(32),
        FieldRule::new("qrcode", "收款码内容").max_len(255),
    ]
}

pub fn pay_channel_list(
    gateway: Rc<dyn RemoteDataGateway>,
    config: &ConsoleConfig,
) -> Result<ResourceListController<PaymentChannel>, ApiError> {
    let form = ModalFormController::new(
        FormSchema::new(channel_form_fields()),
        config.submit_timeout,
    );
    let tabs = TabSegmentController::new(channel_tabs())?;
    Ok(ResourceListController::new(gateway, PAY_CHANNELS, form)
        .with_tabs(tabs)
        .with_page_size(config.page_size))
}
