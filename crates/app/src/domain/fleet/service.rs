//! Fleet service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use tracing::{info, warn};
use waybill::{
    fleet::{
        Car, CarId, Driver, DriverId, NewCar, NewPickUpPoint, PersonName, PickUpPoint,
        PickUpPointId, Staffed, Worker, WorkerId,
    },
    users::{NewUser, User, UserId},
};

use crate::{api::LogisticsApi, domain::fleet::errors::FleetServiceError};

#[derive(Clone)]
pub struct ApiFleetService {
    api: Arc<dyn LogisticsApi>,
}

impl ApiFleetService {
    #[must_use]
    pub fn new(api: Arc<dyn LogisticsApi>) -> Self {
        Self { api }
    }
}

/// Join staff records with the names of their users.
fn staffed<T>(records: Vec<T>, users: &[User], user_of: impl Fn(&T) -> UserId) -> Vec<Staffed<T>> {
    let names: FxHashMap<UserId, PersonName> = users
        .iter()
        .map(|user| (user.id, PersonName::from(user)))
        .collect();

    records
        .into_iter()
        .map(|record| {
            let user = user_of(&record);
            let person = names.get(&user).cloned().unwrap_or_else(|| {
                warn!(%user, "staff record without user");
                PersonName::unknown()
            });

            Staffed { record, person }
        })
        .collect()
}

#[async_trait]
impl FleetService for ApiFleetService {
    async fn available_cars(&self, region: Option<i64>) -> Result<Vec<Car>, FleetServiceError> {
        Ok(self.api.available_cars(region).await?)
    }

    async fn add_car(&self, car: NewCar) -> Result<(), FleetServiceError> {
        car.validate()?;

        self.api.create_car(car).await?;

        info!("car added");

        Ok(())
    }

    async fn delete_car(&self, car: CarId) -> Result<(), FleetServiceError> {
        self.api.delete_car(car).await?;

        info!(%car, "car deleted");

        Ok(())
    }

    async fn assign_car(&self, driver: DriverId, car: CarId) -> Result<(), FleetServiceError> {
        self.api.assign_car(driver, car).await?;

        info!(%driver, %car, "car assigned");

        Ok(())
    }

    async fn pick_up_points(
        &self,
        region: Option<i64>,
    ) -> Result<Vec<PickUpPoint>, FleetServiceError> {
        let points = match region {
            Some(region) => self.api.available_pick_up_points(region).await?,
            None => self.api.list_pick_up_points().await?,
        };

        Ok(points)
    }

    async fn add_pick_up_point(&self, point: NewPickUpPoint) -> Result<(), FleetServiceError> {
        point.validate()?;

        self.api.create_pick_up_point(point).await?;

        info!("pick-up point added");

        Ok(())
    }

    async fn delete_pick_up_point(&self, point: PickUpPointId) -> Result<(), FleetServiceError> {
        self.api.delete_pick_up_point(point).await?;

        info!(%point, "pick-up point deleted");

        Ok(())
    }

    async fn assign_pick_up_point(
        &self,
        worker: WorkerId,
        point: PickUpPointId,
    ) -> Result<(), FleetServiceError> {
        self.api.assign_pick_up_point(worker, point).await?;

        info!(%worker, %point, "pick-up point assigned");

        Ok(())
    }

    async fn drivers(
        &self,
        region: Option<i64>,
    ) -> Result<Vec<Staffed<Driver>>, FleetServiceError> {
        let drivers = async {
            match region {
                Some(region) => self.api.drivers_by_region(region).await,
                None => self.api.list_drivers().await,
            }
        };

        let (drivers, users) = futures::try_join!(drivers, self.api.list_users())?;

        Ok(staffed(drivers, &users, |driver| driver.user_id))
    }

    async fn workers(
        &self,
        region: Option<i64>,
    ) -> Result<Vec<Staffed<Worker>>, FleetServiceError> {
        let workers = async {
            match region {
                Some(region) => self.api.workers_by_region(region).await,
                None => self.api.list_workers().await,
            }
        };

        let (workers, users) = futures::try_join!(workers, self.api.list_users())?;

        Ok(staffed(workers, &users, |worker| worker.user_id))
    }

    async fn users(&self) -> Result<Vec<User>, FleetServiceError> {
        Ok(self.api.list_users().await?)
    }

    async fn register_user(&self, user: NewUser) -> Result<(), FleetServiceError> {
        user.validate()?;

        let login = user.login.clone();

        self.api.create_user(user).await?;

        info!(%login, "user registered");

        Ok(())
    }

    async fn delete_user(&self, user: UserId) -> Result<(), FleetServiceError> {
        self.api.delete_user(user).await?;

        info!(%user, "user deleted");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait FleetService: Send + Sync {
    /// Cars without a driver, optionally within a region.
    async fn available_cars(&self, region: Option<i64>) -> Result<Vec<Car>, FleetServiceError>;

    async fn add_car(&self, car: NewCar) -> Result<(), FleetServiceError>;

    async fn delete_car(&self, car: CarId) -> Result<(), FleetServiceError>;

    async fn assign_car(&self, driver: DriverId, car: CarId) -> Result<(), FleetServiceError>;

    /// Every pick-up point, or the free ones of a region.
    async fn pick_up_points(
        &self,
        region: Option<i64>,
    ) -> Result<Vec<PickUpPoint>, FleetServiceError>;

    async fn add_pick_up_point(&self, point: NewPickUpPoint) -> Result<(), FleetServiceError>;

    async fn delete_pick_up_point(&self, point: PickUpPointId) -> Result<(), FleetServiceError>;

    async fn assign_pick_up_point(
        &self,
        worker: WorkerId,
        point: PickUpPointId,
    ) -> Result<(), FleetServiceError>;

    /// Drivers with their names, optionally within a region.
    async fn drivers(&self, region: Option<i64>)
    -> Result<Vec<Staffed<Driver>>, FleetServiceError>;

    /// Workers with their names, optionally within a region.
    async fn workers(&self, region: Option<i64>)
    -> Result<Vec<Staffed<Worker>>, FleetServiceError>;

    async fn users(&self) -> Result<Vec<User>, FleetServiceError>;

    /// Validate and register a user.
    async fn register_user(&self, user: NewUser) -> Result<(), FleetServiceError>;

    async fn delete_user(&self, user: UserId) -> Result<(), FleetServiceError>;
}
