//! Logistics API service.

use async_trait::async_trait;
use mockall::automock;
use waybill::{
    fleet::{
        Car, CarId, Driver, DriverId, NewCar, NewPickUpPoint, PickUpPoint, PickUpPointId, Worker,
        WorkerId,
    },
    products::{NewProduct, Product},
    shifts::{NewWorkingShift, WorkingShift},
    supplies::{NewSupply, Supply, SupplyId},
    users::{NewUser, User, UserId},
};

use crate::api::{
    errors::ApiError,
    payloads::{LoginRequest, LoginResponse},
};

#[automock]
#[async_trait]
pub trait LogisticsApi: Send + Sync {
    /// Exchange credentials for a bearer token and the user's profile.
    async fn login(&self, credentials: LoginRequest) -> Result<LoginResponse, ApiError>;

    /// Retrieves all users.
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;

    /// Retrieve a single user.
    async fn get_user(&self, id: UserId) -> Result<User, ApiError>;

    /// Registers a user.
    async fn create_user(&self, user: NewUser) -> Result<(), ApiError>;

    /// Deletes a user.
    async fn delete_user(&self, id: UserId) -> Result<(), ApiError>;

    /// Cars not assigned to a driver, optionally within a region.
    async fn available_cars(&self, region: Option<i64>) -> Result<Vec<Car>, ApiError>;

    /// Registers a car.
    async fn create_car(&self, car: NewCar) -> Result<(), ApiError>;

    /// Deletes a car.
    async fn delete_car(&self, id: CarId) -> Result<(), ApiError>;

    /// Assigns a car to a driver.
    async fn assign_car(&self, driver: DriverId, car: CarId) -> Result<(), ApiError>;

    /// Retrieves all pick-up points.
    async fn list_pick_up_points(&self) -> Result<Vec<PickUpPoint>, ApiError>;

    /// Pick-up points without a worker in a region.
    async fn available_pick_up_points(&self, region: i64) -> Result<Vec<PickUpPoint>, ApiError>;

    /// Retrieve a single pick-up point.
    async fn get_pick_up_point(&self, id: PickUpPointId) -> Result<PickUpPoint, ApiError>;

    /// Opens a pick-up point.
    async fn create_pick_up_point(&self, point: NewPickUpPoint) -> Result<(), ApiError>;

    /// Deletes a pick-up point.
    async fn delete_pick_up_point(&self, id: PickUpPointId) -> Result<(), ApiError>;

    /// Assigns a pick-up point to a worker.
    async fn assign_pick_up_point(
        &self,
        worker: WorkerId,
        point: PickUpPointId,
    ) -> Result<(), ApiError>;

    /// Retrieves all drivers.
    async fn list_drivers(&self) -> Result<Vec<Driver>, ApiError>;

    /// Drivers working in a region.
    async fn drivers_by_region(&self, region: i64) -> Result<Vec<Driver>, ApiError>;

    /// Driver record of a user.
    async fn driver_by_user(&self, user: UserId) -> Result<Driver, ApiError>;

    /// Retrieve a single driver.
    async fn get_driver(&self, id: DriverId) -> Result<Driver, ApiError>;

    /// Retrieves all workers.
    async fn list_workers(&self) -> Result<Vec<Worker>, ApiError>;

    /// Worker record of a user.
    async fn worker_by_user(&self, user: UserId) -> Result<Worker, ApiError>;

    /// Workers in a region.
    async fn workers_by_region(&self, region: i64) -> Result<Vec<Worker>, ApiError>;

    /// Retrieves all supplies.
    async fn list_supplies(&self) -> Result<Vec<Supply>, ApiError>;

    /// Retrieve a single supply.
    async fn get_supply(&self, id: SupplyId) -> Result<Supply, ApiError>;

    /// Schedules a supply.
    async fn create_supply(&self, supply: NewSupply) -> Result<(), ApiError>;

    /// Deletes a supply.
    async fn delete_supply(&self, id: SupplyId) -> Result<(), ApiError>;

    /// Supplies assigned to a driver.
    async fn supplies_by_driver(&self, driver: DriverId) -> Result<Vec<Supply>, ApiError>;

    /// Supplies heading to a pick-up point.
    async fn supplies_by_pick_up_point(
        &self,
        point: PickUpPointId,
    ) -> Result<Vec<Supply>, ApiError>;

    /// Retrieves all products.
    async fn list_products(&self) -> Result<Vec<Product>, ApiError>;

    /// Adds a product to the catalog. The stored record, when the backend sends it back.
    async fn create_product(&self, product: NewProduct) -> Result<Option<Product>, ApiError>;

    /// Replaces a product.
    async fn update_product(&self, product: Product) -> Result<(), ApiError>;

    /// Retrieves all working shifts.
    async fn list_working_shifts(&self) -> Result<Vec<WorkingShift>, ApiError>;

    /// Records a finished working shift.
    async fn create_working_shift(&self, shift: NewWorkingShift) -> Result<(), ApiError>;
}
