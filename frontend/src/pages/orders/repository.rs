use std::rc::Rc;

use super::types::{OrderRecord, OrderStatus};
use crate::{
    api::{ApiError, RemoteDataGateway, ResourceEndpoints},
    config::ConsoleConfig,
    state::{
        modal_form::{FormSchema, ModalFormController},
        resource_list::{ResourceListController, ResourceSpec},
        tabs::{Tab, TabSegmentController},
    },
};

pub const ORDERS: ResourceSpec = ResourceSpec::new(ResourceEndpoints::new("/order"))
    .tab_param("status")
    .keyword_param("order_number");

pub fn status_tabs() -> Vec<Tab> {
    OrderStatus::TABS
        .iter()
        .map(|status| Tab::new(status.key(), status.label()))
        .collect()
}

pub fn order_list(
    gateway: Rc<dyn RemoteDataGateway>,
    config: &ConsoleConfig,
) -> Result<ResourceListController<OrderRecord>, ApiError> {
    let form = ModalFormController::new(FormSchema::new(Vec::new()), config.submit_timeout);
    Ok(ResourceListController::new(gateway, ORDERS, form)
        .with_tabs(TabSegmentController::new(status_tabs())?)
        .with_page_size(config.page_size))
}
