use leptos::*;

use super::{repository::api_key_list, types::ApiKeyRecord};
use crate::{
    config,
    state::list_view::{use_gateway, use_list_view_model, ListViewModel},
};

#[derive(Clone, Copy)]
pub struct ApiSettingsViewModel {
    pub list: ListViewModel<ApiKeyRecord>,
    /// Search box text; applied on submit.
    pub keyword: RwSignal<String>,
}

impl ApiSettingsViewModel {
    pub fn apply_search(&self) {
        self.list.search(self.keyword.get_untracked());
    }
}

pub fn use_api_settings_view_model() -> ApiSettingsViewModel {
    let controller = api_key_list(use_gateway(), &config::current());
    ApiSettingsViewModel {
        list: use_list_view_model(controller),
        keyword: create_rw_signal(String::new()),
    }
}
