use leptos::*;

use super::{repository::MonitorRepository, types::MonitorDetail};
use crate::{api::ApiError, state::list_view::use_gateway};

#[derive(Clone, Copy)]
pub struct MonitorViewModel {
    pub reload: RwSignal<u32>,
    pub detail: Resource<u32, Result<MonitorDetail, ApiError>>,
}

impl MonitorViewModel {
    pub fn refresh(&self) {
        self.reload.update(|value| *value = value.wrapping_add(1));
    }
}

pub fn use_monitor_view_model() -> MonitorViewModel {
    let repo = store_value(MonitorRepository::new(use_gateway()));
    let reload = create_rw_signal(0u32);
    let detail = create_resource(
        move || reload.get(),
        move |_| {
            let repo = repo.get_value();
            async move { repo.load().await }
        },
    );
    MonitorViewModel { reload, detail }
}
