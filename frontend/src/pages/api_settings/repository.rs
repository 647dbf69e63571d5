use std::rc::Rc;

use super::types::ApiKeyRecord;
use crate::{
    api::{RemoteDataGateway, ResourceEndpoints, RouterLayout},
    config::ConsoleConfig,
    state::{
        modal_form::{FieldRule, FormSchema, ModalFormController},
        resource_list::{ResourceListController, ResourceSpec, RowAction},
    },
};

pub const API_KEYS: ResourceSpec =
    ResourceSpec::new(ResourceEndpoints::new("/api-key").with_layout(RouterLayout::PostOnly));

/// Keys cannot be switched off, only edited or revoked.
pub const API_KEY_ACTIONS: [RowAction; 2] = [RowAction::Edit, RowAction::Delete];

pub fn api_key_form_fields() -> Vec<FieldRule> {
    vec![
        FieldRule::new("name", "名称").required().max_len(32),
        FieldRule::new("remark", "备注").max_len(255),
    ]
}

pub fn api_key_list(
    gateway: Rc<dyn RemoteDataGateway>,
    config: &ConsoleConfig,
) -> ResourceListController<ApiKeyRecord> {
    let form = ModalFormController::new(
        FormSchema::new(api_key_form_fields()),
        config.submit_timeout,
    );
    ResourceListController::new(gateway, API_KEYS, form).with_page_size(config.page_size)
}
