//! Reports service.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use mockall::automock;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};
use waybill::{
    fleet::{PersonName, PickUpPointId},
    reports::{NOT_SPECIFIED, ShiftReportRow, SupplyReportRow},
    users::{User, UserId},
};

use crate::{api::LogisticsApi, domain::reports::errors::ReportsServiceError};

/// Both reports, joined and ready to filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reports {
    pub shifts: Vec<ShiftReportRow>,
    pub supplies: Vec<SupplyReportRow>,
}

#[derive(Clone)]
pub struct ApiReportsService {
    api: Arc<dyn LogisticsApi>,
}

impl ApiReportsService {
    #[must_use]
    pub fn new(api: Arc<dyn LogisticsApi>) -> Self {
        Self { api }
    }

    async fn addresses(
        &self,
        points: FxHashSet<PickUpPointId>,
    ) -> FxHashMap<PickUpPointId, String> {
        join_all(points.into_iter().map(|point| async move {
            match self.api.get_pick_up_point(point).await {
                Ok(record) => Some((point, record.address)),
                Err(error) => {
                    warn!(%point, error = %error, "pick-up point lookup failed");
                    None
                }
            }
        }))
        .await
        .into_iter()
        .flatten()
        .collect()
    }
}

fn person(users: &FxHashMap<UserId, &User>, user: Option<UserId>) -> PersonName {
    user.and_then(|user| users.get(&user))
        .map_or_else(PersonName::unknown, |user| PersonName::from(*user))
}

fn address(addresses: &FxHashMap<PickUpPointId, String>, point: Option<PickUpPointId>) -> String {
    point
        .and_then(|point| addresses.get(&point).cloned())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string())
}

#[async_trait]
impl ReportsService for ApiReportsService {
    async fn load(&self) -> Result<Reports, ReportsServiceError> {
        let (workers, drivers, users, shifts, supplies) = futures::try_join!(
            self.api.list_workers(),
            self.api.list_drivers(),
            self.api.list_users(),
            self.api.list_working_shifts(),
            self.api.list_supplies(),
        )?;

        debug!(
            workers = workers.len(),
            drivers = drivers.len(),
            shifts = shifts.len(),
            supplies = supplies.len(),
            "report data loaded"
        );

        let users: FxHashMap<UserId, &User> = users.iter().map(|user| (user.id, user)).collect();
        let workers: FxHashMap<_, _> = workers.iter().map(|worker| (worker.id, worker)).collect();
        let drivers: FxHashMap<_, _> = drivers.iter().map(|driver| (driver.id, driver)).collect();

        let points: FxHashSet<PickUpPointId> = workers
            .values()
            .filter_map(|worker| worker.pick_up_point_id)
            .chain(supplies.iter().map(|supply| supply.pick_up_point_id))
            .collect();

        let addresses = self.addresses(points).await;

        let shifts = shifts
            .iter()
            .map(|shift| {
                let worker = workers.get(&shift.worker_id);

                ShiftReportRow::new(
                    shift,
                    person(&users, worker.map(|worker| worker.user_id)),
                    address(&addresses, worker.and_then(|worker| worker.pick_up_point_id)),
                )
            })
            .collect();

        let supplies = supplies
            .iter()
            .map(|supply| {
                let driver = supply.driver_id.and_then(|driver| drivers.get(&driver));

                SupplyReportRow::new(
                    supply,
                    person(&users, driver.map(|driver| driver.user_id)),
                    address(&addresses, Some(supply.pick_up_point_id)),
                )
            })
            .collect();

        Ok(Reports { shifts, supplies })
    }
}

#[automock]
#[async_trait]
pub trait ReportsService: Send + Sync {
    /// Load the shift and supply reports.
    async fn load(&self) -> Result<Reports, ReportsServiceError>;
}
