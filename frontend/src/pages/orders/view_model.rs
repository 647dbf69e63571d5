use leptos::*;

use super::{repository::order_list, types::OrderRecord};
use crate::{
    api::ApiError,
    config,
    state::list_view::{use_gateway, use_list_view_model, ListViewModel},
};

#[derive(Clone, Copy)]
pub struct OrdersViewModel {
    pub list: ListViewModel<OrderRecord>,
    pub order_number: RwSignal<String>,
}

impl OrdersViewModel {
    pub fn apply_search(&self) {
        self.list.search(self.order_number.get_untracked());
    }
}

pub fn use_orders_view_model() -> Result<OrdersViewModel, ApiError> {
    let controller = order_list(use_gateway(), &config::current())?;
    Ok(OrdersViewModel {
        list: use_list_view_model(controller),
        order_number: create_rw_signal(String::new()),
    })
}
