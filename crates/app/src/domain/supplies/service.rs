//! Supplies service.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::{join_all, try_join_all};
use jiff::civil::DateTime;
use mockall::automock;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{error, info, warn};
use waybill::{
    fleet::{Driver, DriverId, PersonName, PickUpPointId, Staffed},
    products::{ProductId, ProductStatus},
    supplies::{
        Arrival, ConfirmedSupplies, Destination, DriverContact, Supply, SupplyBoard, SupplyForm,
        SupplyId,
    },
    users::UserId,
};

use crate::{
    api::{ApiError, LogisticsApi},
    domain::supplies::errors::SuppliesServiceError,
    storage::{self, CONFIRMED_SUPPLIES_KEY, KeyValueStore, StorageError},
};

/// Outcome of updating every product of a confirmed supply.
///
/// Updates are independent: a failed one is neither retried nor rolled back,
/// and the confirmation itself stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FanOutReport {
    /// Confirmed supply
    pub supply: SupplyId,

    /// Products now delivered to the pick-up point
    pub updated: Vec<ProductId>,

    /// Products whose update failed
    pub failed: Vec<ProductId>,
}

impl FanOutReport {
    #[must_use]
    pub fn new(supply: SupplyId) -> Self {
        Self {
            supply,
            updated: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Whether every product update succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Single message for the user when some updates failed.
    #[must_use]
    pub fn user_message(&self) -> Option<String> {
        (!self.is_complete()).then(|| {
            "The supply was confirmed, but some products could not be updated.".to_string()
        })
    }
}

/// Pick-up point board after a confirmed arrival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrivalConfirmation {
    pub board: SupplyBoard<Arrival>,
    pub report: FanOutReport,
}

#[derive(Clone)]
pub struct ApiSuppliesService {
    api: Arc<dyn LogisticsApi>,
    store: Arc<dyn KeyValueStore>,
}

impl ApiSuppliesService {
    #[must_use]
    pub fn new(api: Arc<dyn LogisticsApi>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { api, store }
    }

    async fn confirmed(&self) -> Result<ConfirmedSupplies, StorageError> {
        Ok(
            storage::get_json::<ConfirmedSupplies>(self.store.as_ref(), CONFIRMED_SUPPLIES_KEY)
                .await?
                .unwrap_or_default(),
        )
    }

    async fn confirm_on<D>(
        &self,
        board: &mut SupplyBoard<D>,
        supply: SupplyId,
    ) -> Result<(), SuppliesServiceError> {
        let status = board
            .get(supply)
            .map(|entry| entry.status)
            .ok_or(SuppliesServiceError::NotOnBoard(supply))?;

        if !status.can_confirm() {
            return Err(SuppliesServiceError::NotConfirmable { supply, status });
        }

        let mut confirmed = self.confirmed().await?;

        confirmed.insert(supply);

        storage::set_json(self.store.as_ref(), CONFIRMED_SUPPLIES_KEY, &confirmed).await?;

        board.mark_confirmed(supply);

        info!(%supply, confirmed = confirmed.len(), "supply confirmed");

        Ok(())
    }

    async fn driver_contact(&self, driver: DriverId) -> Option<DriverContact> {
        let lookup = async {
            let record = self.api.get_driver(driver).await?;
            let user = self.api.get_user(record.user_id).await?;

            Ok::<_, ApiError>(DriverContact::from(&user))
        };

        match lookup.await {
            Ok(contact) => Some(contact),
            Err(error) => {
                warn!(%driver, error = %error, "driver contact lookup failed");
                None
            }
        }
    }

    async fn deliver_products(&self, supply: SupplyId) -> Result<FanOutReport, ApiError> {
        let products: Vec<_> = self
            .api
            .list_products()
            .await?
            .into_iter()
            .filter(|product| product.belongs_to(supply))
            .collect();

        let results = join_all(products.iter().map(|product| {
            self.api
                .update_product(product.with_status(ProductStatus::DeliveredInPvz))
        }))
        .await;

        let mut report = FanOutReport::new(supply);

        for (product, result) in products.iter().zip(results) {
            match result {
                Ok(_) => report.updated.push(product.id),
                Err(error) => {
                    warn!(product = %product.id, %supply, error = %error, "product update failed");
                    report.failed.push(product.id);
                }
            }
        }

        if report.is_complete() {
            info!(%supply, updated = report.updated.len(), "products delivered");
        } else {
            error!(
                %supply,
                updated = report.updated.len(),
                failed = report.failed.len(),
                "some product updates failed"
            );
        }

        Ok(report)
    }
}

#[async_trait]
impl SuppliesService for ApiSuppliesService {
    async fn driver_board(
        &self,
        user: UserId,
        now: DateTime,
    ) -> Result<SupplyBoard<Destination>, SuppliesServiceError> {
        let driver = self.api.driver_by_user(user).await?;
        let supplies = self.api.supplies_by_driver(driver.id).await?;

        let points: FxHashSet<PickUpPointId> = supplies
            .iter()
            .map(|supply| supply.pick_up_point_id)
            .collect();

        let destinations: FxHashMap<PickUpPointId, Destination> =
            try_join_all(points.into_iter().map(|point| self.api.get_pick_up_point(point)))
                .await
                .inspect_err(|error| {
                    error!(driver = %driver.id, error = %error, "driver board load failed");
                })?
                .into_iter()
                .map(|point| {
                    (
                        point.id,
                        Destination {
                            address: point.address,
                            region: point.region,
                        },
                    )
                })
                .collect();

        let confirmed = self.confirmed().await?;

        let rows = supplies.into_iter().map(|supply| {
            let destination = destinations
                .get(&supply.pick_up_point_id)
                .cloned()
                .unwrap_or_default();

            (supply, destination)
        });

        Ok(SupplyBoard::build(rows, &confirmed, now))
    }

    async fn pick_up_point_board(
        &self,
        user: UserId,
        now: DateTime,
    ) -> Result<SupplyBoard<Arrival>, SuppliesServiceError> {
        let worker = self.api.worker_by_user(user).await?;
        let point = worker
            .pick_up_point_id
            .ok_or(SuppliesServiceError::NoPickUpPoint)?;

        let (point, supplies) = futures::try_join!(
            self.api.get_pick_up_point(point),
            self.api.supplies_by_pick_up_point(point),
        )
        .inspect_err(|error| error!(%point, error = %error, "pick-up point board load failed"))?;

        let drivers: FxHashSet<DriverId> =
            supplies.iter().filter_map(|supply| supply.driver_id).collect();

        let contacts: FxHashMap<DriverId, DriverContact> = join_all(
            drivers
                .into_iter()
                .map(|driver| async move { (driver, self.driver_contact(driver).await) }),
        )
        .await
        .into_iter()
        .filter_map(|(driver, contact)| contact.map(|contact| (driver, contact)))
        .collect();

        let confirmed = self.confirmed().await?;

        let rows = supplies.into_iter().map(|supply| {
            let arrival = Arrival {
                address: point.address.clone(),
                driver: supply
                    .driver_id
                    .and_then(|driver| contacts.get(&driver).cloned()),
            };

            (supply, arrival)
        });

        Ok(SupplyBoard::build(rows, &confirmed, now))
    }

    async fn confirm_driver_supply(
        &self,
        user: UserId,
        supply: SupplyId,
        now: DateTime,
    ) -> Result<SupplyBoard<Destination>, SuppliesServiceError> {
        let mut board = self.driver_board(user, now).await?;

        self.confirm_on(&mut board, supply).await?;

        Ok(board)
    }

    async fn confirm_arrival(
        &self,
        user: UserId,
        supply: SupplyId,
        now: DateTime,
    ) -> Result<ArrivalConfirmation, SuppliesServiceError> {
        let mut board = self.pick_up_point_board(user, now).await?;

        self.confirm_on(&mut board, supply).await?;

        let report = self.deliver_products(supply).await?;

        Ok(ArrivalConfirmation { board, report })
    }

    async fn list_supplies(&self) -> Result<Vec<Supply>, SuppliesServiceError> {
        Ok(self.api.list_supplies().await?)
    }

    async fn schedule(
        &self,
        form: SupplyForm,
        now: DateTime,
    ) -> Result<Vec<Supply>, SuppliesServiceError> {
        let supply = form.validate(now)?;

        self.api.create_supply(supply).await?;

        info!("supply scheduled");

        Ok(self.api.list_supplies().await?)
    }

    async fn delete_supply(&self, supply: SupplyId) -> Result<(), SuppliesServiceError> {
        self.api.delete_supply(supply).await?;

        info!(%supply, "supply deleted");

        Ok(())
    }

    async fn drivers_for_point(
        &self,
        point: PickUpPointId,
    ) -> Result<Vec<Staffed<Driver>>, SuppliesServiceError> {
        let point = self.api.get_pick_up_point(point).await?;
        let drivers = self.api.drivers_by_region(point.region).await?;

        let staffed = join_all(drivers.into_iter().map(|driver| async move {
            let person = match self.api.get_user(driver.user_id).await {
                Ok(user) => PersonName::from(&user),
                Err(error) => {
                    warn!(driver = %driver.id, error = %error, "driver user lookup failed");
                    PersonName::unknown()
                }
            };

            Staffed {
                record: driver,
                person,
            }
        }))
        .await;

        Ok(staffed)
    }
}

#[automock]
#[async_trait]
pub trait SuppliesService: Send + Sync {
    /// Supplies of the signed-in driver, with their destinations.
    async fn driver_board(
        &self,
        user: UserId,
        now: DateTime,
    ) -> Result<SupplyBoard<Destination>, SuppliesServiceError>;

    /// Supplies heading to the signed-in worker's pick-up point.
    async fn pick_up_point_board(
        &self,
        user: UserId,
        now: DateTime,
    ) -> Result<SupplyBoard<Arrival>, SuppliesServiceError>;

    /// Mark a supply on the driver board as delivered.
    async fn confirm_driver_supply(
        &self,
        user: UserId,
        supply: SupplyId,
        now: DateTime,
    ) -> Result<SupplyBoard<Destination>, SuppliesServiceError>;

    /// Mark a supply as arrived at the pick-up point and deliver its products.
    async fn confirm_arrival(
        &self,
        user: UserId,
        supply: SupplyId,
        now: DateTime,
    ) -> Result<ArrivalConfirmation, SuppliesServiceError>;

    /// Every supply known to the backend.
    async fn list_supplies(&self) -> Result<Vec<Supply>, SuppliesServiceError>;

    /// Validate and schedule a supply, returning the refreshed list.
    async fn schedule(
        &self,
        form: SupplyForm,
        now: DateTime,
    ) -> Result<Vec<Supply>, SuppliesServiceError>;

    async fn delete_supply(&self, supply: SupplyId) -> Result<(), SuppliesServiceError>;

    /// Drivers that can serve a pick-up point, labelled with their names.
    async fn drivers_for_point(
        &self,
        point: PickUpPointId,
    ) -> Result<Vec<Staffed<Driver>>, SuppliesServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use reqwest::StatusCode;
    use testresult::TestResult;
    use waybill::{supplies::SupplyStatus, users::Role};

    use super::*;
    use crate::test::{
        TestContext,
        helpers::{driver, point, product, supply, user, worker},
    };

    fn now() -> DateTime {
        date(2024, 1, 10).at(12, 0, 0, 0)
    }

    fn server_error() -> ApiError {
        ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        }
    }

    fn statuses<D>(board: &SupplyBoard<D>) -> Vec<(i64, SupplyStatus)> {
        board
            .entries()
            .iter()
            .map(|entry| (entry.supply.id.get(), entry.status))
            .collect()
    }

    #[tokio::test]
    async fn driver_board_attaches_destinations() -> TestResult {
        let mut ctx = TestContext::new();

        ctx.api
            .expect_driver_by_user()
            .returning(|_| Ok(driver(3, 7)));
        ctx.api.expect_supplies_by_driver().returning(|_| {
            Ok(vec![
                supply(1, 3, 20, date(2024, 1, 12).at(9, 0, 0, 0)),
                supply(2, 3, 21, date(2024, 1, 5).at(9, 0, 0, 0)),
            ])
        });
        ctx.api
            .expect_get_pick_up_point()
            .times(2)
            .returning(|id| Ok(point(id.get(), &format!("Street {id}"), 77)));

        let board = ctx.supplies().driver_board(UserId::new(7), now()).await?;

        assert_eq!(
            statuses(&board),
            vec![(2, SupplyStatus::Overdue), (1, SupplyStatus::Pending)]
        );
        assert_eq!(
            board.get(SupplyId::new(1)).map(|entry| entry.details.address.as_str()),
            Some("Street 20")
        );

        Ok(())
    }

    #[tokio::test]
    async fn failed_address_lookup_aborts_the_driver_board() -> TestResult {
        let mut ctx = TestContext::new();

        ctx.api
            .expect_driver_by_user()
            .returning(|_| Ok(driver(3, 7)));
        ctx.api.expect_supplies_by_driver().returning(|_| {
            Ok(vec![
                supply(1, 3, 20, date(2024, 1, 12).at(9, 0, 0, 0)),
                supply(2, 3, 21, date(2024, 1, 12).at(9, 0, 0, 0)),
            ])
        });
        ctx.api.expect_get_pick_up_point().returning(|id| {
            if id.get() == 21 {
                Err(server_error())
            } else {
                Ok(point(id.get(), "Street", 77))
            }
        });

        let result = ctx.supplies().driver_board(UserId::new(7), now()).await;

        assert!(matches!(result, Err(SuppliesServiceError::Api(_))));

        Ok(())
    }

    #[tokio::test]
    async fn worker_without_point_has_no_board() -> TestResult {
        let mut ctx = TestContext::new();

        ctx.api
            .expect_worker_by_user()
            .returning(|_| Ok(worker(4, 8, None)));
        ctx.api.expect_supplies_by_pick_up_point().never();

        let result = ctx.supplies().pick_up_point_board(UserId::new(8), now()).await;

        assert!(matches!(result, Err(SuppliesServiceError::NoPickUpPoint)));

        Ok(())
    }

    #[tokio::test]
    async fn driver_contacts_are_best_effort() -> TestResult {
        let mut ctx = TestContext::new();

        ctx.api
            .expect_worker_by_user()
            .returning(|_| Ok(worker(4, 8, Some(20))));
        ctx.api
            .expect_get_pick_up_point()
            .returning(|id| Ok(point(id.get(), "Main St 1", 77)));
        ctx.api.expect_supplies_by_pick_up_point().returning(|_| {
            Ok(vec![
                supply(1, 3, 20, date(2024, 1, 10).at(15, 0, 0, 0)),
                supply(2, 5, 20, date(2024, 1, 10).at(16, 0, 0, 0)),
            ])
        });
        ctx.api.expect_get_driver().returning(|id| {
            if id.get() == 5 {
                Err(server_error())
            } else {
                Ok(driver(id.get(), 30))
            }
        });
        ctx.api
            .expect_get_user()
            .returning(|id| Ok(user(id.get(), Role::Driver)));

        let board = ctx
            .supplies()
            .pick_up_point_board(UserId::new(8), now())
            .await?;

        let first = board.get(SupplyId::new(1)).ok_or("supply 1 missing")?;
        let second = board.get(SupplyId::new(2)).ok_or("supply 2 missing")?;

        assert_eq!(first.details.address, "Main St 1");
        assert_eq!(
            first.details.driver.as_ref().map(|contact| contact.person.full_name()),
            Some("Surname30 Name30".to_string())
        );
        assert_eq!(second.details.driver, None);

        Ok(())
    }

    #[tokio::test]
    async fn confirming_persists_the_id_once() -> TestResult {
        let mut ctx = TestContext::new();

        ctx.api
            .expect_driver_by_user()
            .returning(|_| Ok(driver(3, 7)));
        ctx.api
            .expect_supplies_by_driver()
            .returning(|_| Ok(vec![supply(1, 3, 20, date(2024, 1, 10).at(9, 0, 0, 0))]));
        ctx.api
            .expect_get_pick_up_point()
            .returning(|id| Ok(point(id.get(), "Street", 77)));

        let store = ctx.store.clone();
        let service = ctx.supplies();

        let board = service
            .confirm_driver_supply(UserId::new(7), SupplyId::new(1), now())
            .await?;

        assert_eq!(statuses(&board), vec![(1, SupplyStatus::Confirmed)]);
        assert_eq!(
            store.get(CONFIRMED_SUPPLIES_KEY).await?.as_deref(),
            Some("[1]")
        );

        let again = service
            .confirm_driver_supply(UserId::new(7), SupplyId::new(1), now())
            .await;

        assert!(matches!(
            again,
            Err(SuppliesServiceError::NotConfirmable {
                status: SupplyStatus::Confirmed,
                ..
            })
        ));
        assert_eq!(
            store.get(CONFIRMED_SUPPLIES_KEY).await?.as_deref(),
            Some("[1]")
        );

        Ok(())
    }

    #[tokio::test]
    async fn pending_supplies_cannot_be_confirmed() -> TestResult {
        let mut ctx = TestContext::new();

        ctx.api
            .expect_driver_by_user()
            .returning(|_| Ok(driver(3, 7)));
        ctx.api
            .expect_supplies_by_driver()
            .returning(|_| Ok(vec![supply(1, 3, 20, date(2024, 1, 15).at(9, 0, 0, 0))]));
        ctx.api
            .expect_get_pick_up_point()
            .returning(|id| Ok(point(id.get(), "Street", 77)));

        let service = ctx.supplies();

        let pending = service
            .confirm_driver_supply(UserId::new(7), SupplyId::new(1), now())
            .await;
        let missing = service
            .confirm_driver_supply(UserId::new(7), SupplyId::new(9), now())
            .await;

        assert!(matches!(
            pending,
            Err(SuppliesServiceError::NotConfirmable {
                status: SupplyStatus::Pending,
                ..
            })
        ));
        assert!(matches!(
            missing,
            Err(SuppliesServiceError::NotOnBoard(id)) if id == SupplyId::new(9)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn failed_product_update_is_reported_not_reverted() -> TestResult {
        let mut ctx = TestContext::new();

        ctx.api
            .expect_worker_by_user()
            .returning(|_| Ok(worker(4, 8, Some(20))));
        ctx.api
            .expect_get_pick_up_point()
            .returning(|id| Ok(point(id.get(), "Main St 1", 77)));
        ctx.api
            .expect_supplies_by_pick_up_point()
            .returning(|_| Ok(vec![supply(1, 3, 20, date(2024, 1, 10).at(9, 0, 0, 0))]));
        ctx.api
            .expect_get_driver()
            .returning(|id| Ok(driver(id.get(), 30)));
        ctx.api
            .expect_get_user()
            .returning(|id| Ok(user(id.get(), Role::Driver)));
        ctx.api.expect_list_products().returning(|| {
            Ok(vec![
                product(1, Some(1), ProductStatus::SentInPvz),
                product(2, Some(1), ProductStatus::SentInPvz),
                product(3, Some(1), ProductStatus::SentInPvz),
                product(4, Some(2), ProductStatus::SentInPvz),
            ])
        });
        ctx.api
            .expect_update_product()
            .times(3)
            .withf(|product| product.status == ProductStatus::DeliveredInPvz)
            .returning(|product| {
                if product.id.get() == 2 {
                    Err(server_error())
                } else {
                    Ok(())
                }
            });

        let store = ctx.store.clone();

        let confirmation = ctx
            .supplies()
            .confirm_arrival(UserId::new(8), SupplyId::new(1), now())
            .await?;

        assert_eq!(statuses(&confirmation.board), vec![(1, SupplyStatus::Confirmed)]);
        assert_eq!(
            confirmation.report.updated,
            vec![ProductId::new(1), ProductId::new(3)]
        );
        assert_eq!(confirmation.report.failed, vec![ProductId::new(2)]);
        assert!(confirmation.report.user_message().is_some());
        assert_eq!(
            store.get(CONFIRMED_SUPPLIES_KEY).await?.as_deref(),
            Some("[1]")
        );

        Ok(())
    }

    #[tokio::test]
    async fn scheduling_validates_before_posting() -> TestResult {
        let mut ctx = TestContext::new();

        ctx.api.expect_create_supply().never();

        let result = ctx
            .supplies()
            .schedule(
                SupplyForm {
                    driver_id: Some(DriverId::new(3)),
                    pick_up_point_id: Some(PickUpPointId::new(20)),
                    time: Some(date(2024, 1, 9).at(9, 0, 0, 0)),
                },
                now(),
            )
            .await;

        assert!(matches!(result, Err(SuppliesServiceError::Validation(_))));

        Ok(())
    }

    #[tokio::test]
    async fn scheduling_refetches_the_list() -> TestResult {
        let mut ctx = TestContext::new();

        ctx.api
            .expect_create_supply()
            .times(1)
            .withf(|supply| supply.driver_id == DriverId::new(3))
            .returning(|_| Ok(()));
        ctx.api
            .expect_list_supplies()
            .times(1)
            .returning(|| Ok(vec![supply(1, 3, 20, date(2024, 1, 11).at(9, 0, 0, 0))]));

        let supplies = ctx
            .supplies()
            .schedule(
                SupplyForm {
                    driver_id: Some(DriverId::new(3)),
                    pick_up_point_id: Some(PickUpPointId::new(20)),
                    time: Some(date(2024, 1, 11).at(9, 0, 0, 0)),
                },
                now(),
            )
            .await?;

        assert_eq!(supplies.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn drivers_without_users_are_unknown() -> TestResult {
        let mut ctx = TestContext::new();

        ctx.api
            .expect_get_pick_up_point()
            .returning(|id| Ok(point(id.get(), "Main St 1", 77)));
        ctx.api
            .expect_drivers_by_region()
            .withf(|region| *region == 77)
            .returning(|_| Ok(vec![driver(1, 10), driver(2, 11)]));
        ctx.api.expect_get_user().returning(|id| {
            if id.get() == 11 {
                Err(server_error())
            } else {
                Ok(user(id.get(), Role::Driver))
            }
        });

        let drivers = ctx
            .supplies()
            .drivers_for_point(PickUpPointId::new(20))
            .await?;

        let names: Vec<String> = drivers
            .iter()
            .map(|driver| driver.person.full_name())
            .collect();

        assert_eq!(names, vec!["Surname10 Name10", "Unknown"]);

        Ok(())
    }
}
