use std::rc::Rc;

use super::types::MonitorDetail;
use crate::api::{fetch, ApiError, RemoteDataGateway, ResourceEndpoints};

pub const MONITOR: ResourceEndpoints = ResourceEndpoints::new("/monitor");

/// The console manages a single monitor configuration.
pub const MONITOR_ID: i64 = 1;

#[derive(Clone)]
pub struct MonitorRepository {
    gateway: Rc<dyn RemoteDataGateway>,
}

impl MonitorRepository {
    pub fn new(gateway: Rc<dyn RemoteDataGateway>) -> Self {
        Self { gateway }
    }

    pub async fn load(&self) -> Result<MonitorDetail, ApiError> {
        let envelope =
            fetch::<MonitorDetail>(self.gateway.as_ref(), MONITOR.detail(MONITOR_ID)).await?;
        envelope.into_data().inspect_err(|err| {
            if err.is_business_like() {
                log::warn!("monitor detail rejected: {}", err);
            } else {
                log::error!("monitor detail failed: {}", err);
            }
        })
    }
}
