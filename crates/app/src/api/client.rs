//! HTTP client for the logistics backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, header::AUTHORIZATION};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;
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

use crate::{
    api::{
        LogisticsApi,
        errors::{ApiError, ErrorBody},
        payloads::{LoginRequest, LoginResponse, NewRecord},
    },
    session::BearerToken,
};

/// [`LogisticsApi`] over HTTP. Every request carries the current bearer token.
#[derive(Debug, Clone)]
pub struct HttpLogisticsApi {
    base_url: String,
    http: Client,
    token: BearerToken,
}

impl HttpLogisticsApi {
    /// Create a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration, token: BearerToken) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            token,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);

        debug!(%method, %url, "backend request");

        let builder = self.http.request(method, url);

        match self.token.header_value() {
            Some(value) => builder.header(AUTHORIZATION, value.as_str()),
            None => builder,
        }
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = ErrorBody::parse(&text).into_message();

        debug!(%status, ?message, "backend rejected request");

        Err(ApiError::Status { status, message })
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = Self::check(builder.send().await?).await?;

        Ok(response.json().await?)
    }

    /// Like [`Self::fetch`], but an empty success body yields `None`.
    async fn fetch_optional<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Option<T>, ApiError> {
        let response = Self::check(builder.send().await?).await?;
        let body = response.bytes().await?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        Ok(Some(serde_json::from_slice(&body)?))
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        Self::check(builder.send().await?).await?;

        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.fetch(self.request(Method::GET, path)).await
    }

    async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.execute(self.request(Method::PUT, path).json(body)).await
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.execute(self.request(Method::POST, path).json(body)).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, path)).await
    }
}

#[async_trait]
impl LogisticsApi for HttpLogisticsApi {
    async fn login(&self, credentials: LoginRequest) -> Result<LoginResponse, ApiError> {
        self.fetch(self.request(Method::POST, "/login").json(&credentials))
            .await
    }

    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.get("/all_users").await
    }

    async fn get_user(&self, id: UserId) -> Result<User, ApiError> {
        self.get(&format!("/users/{id}")).await
    }

    async fn create_user(&self, user: NewUser) -> Result<(), ApiError> {
        self.post("/users", &NewRecord::new(&user)).await
    }

    async fn delete_user(&self, id: UserId) -> Result<(), ApiError> {
        self.delete(&format!("/users/{id}")).await
    }

    async fn available_cars(&self, region: Option<i64>) -> Result<Vec<Car>, ApiError> {
        let mut builder = self.request(Method::GET, "/available_cars");

        if let Some(region) = region {
            builder = builder.query(&[("region", region)]);
        }

        self.fetch(builder).await
    }

    async fn create_car(&self, car: NewCar) -> Result<(), ApiError> {
        self.post("/cars", &NewRecord::new(&car)).await
    }

    async fn delete_car(&self, id: CarId) -> Result<(), ApiError> {
        self.delete(&format!("/cars/{id}")).await
    }

    async fn assign_car(&self, driver: DriverId, car: CarId) -> Result<(), ApiError> {
        self.put(
            &format!("/drivers/{driver}/{car}/assign_car"),
            &serde_json::json!({}),
        )
        .await
    }

    async fn list_pick_up_points(&self) -> Result<Vec<PickUpPoint>, ApiError> {
        self.get("/all_pick_up_points").await
    }

    async fn available_pick_up_points(&self, region: i64) -> Result<Vec<PickUpPoint>, ApiError> {
        self.fetch(
            self.request(Method::GET, "/available_pick_up_points")
                .query(&[("region", region)]),
        )
        .await
    }

    async fn get_pick_up_point(&self, id: PickUpPointId) -> Result<PickUpPoint, ApiError> {
        self.get(&format!("/pick_up_points/{id}")).await
    }

    async fn create_pick_up_point(&self, point: NewPickUpPoint) -> Result<(), ApiError> {
        self.post("/pick_up_points", &NewRecord::new(&point)).await
    }

    async fn delete_pick_up_point(&self, id: PickUpPointId) -> Result<(), ApiError> {
        self.delete(&format!("/pick_up_points/{id}")).await
    }

    async fn assign_pick_up_point(
        &self,
        worker: WorkerId,
        point: PickUpPointId,
    ) -> Result<(), ApiError> {
        self.put(
            &format!("/workers/{worker}/{point}/assign_pick_up_point"),
            &serde_json::json!({}),
        )
        .await
    }

    async fn list_drivers(&self) -> Result<Vec<Driver>, ApiError> {
        self.get("/all_drivers").await
    }

    async fn drivers_by_region(&self, region: i64) -> Result<Vec<Driver>, ApiError> {
        self.get(&format!("/drivers/list/{region}")).await
    }

    async fn driver_by_user(&self, user: UserId) -> Result<Driver, ApiError> {
        self.get(&format!("/driver/{user}")).await
    }

    async fn get_driver(&self, id: DriverId) -> Result<Driver, ApiError> {
        self.get(&format!("/drivers/{id}")).await
    }

    async fn list_workers(&self) -> Result<Vec<Worker>, ApiError> {
        self.get("/all_workers").await
    }

    async fn worker_by_user(&self, user: UserId) -> Result<Worker, ApiError> {
        self.get(&format!("/worker/{user}")).await
    }

    async fn workers_by_region(&self, region: i64) -> Result<Vec<Worker>, ApiError> {
        self.get(&format!("/workers/list/{region}")).await
    }

    async fn list_supplies(&self) -> Result<Vec<Supply>, ApiError> {
        self.get("/all_supplies").await
    }

    async fn get_supply(&self, id: SupplyId) -> Result<Supply, ApiError> {
        self.get(&format!("/supplies/{id}")).await
    }

    async fn create_supply(&self, supply: NewSupply) -> Result<(), ApiError> {
        self.post("/supplies", &NewRecord::new(&supply)).await
    }

    async fn delete_supply(&self, id: SupplyId) -> Result<(), ApiError> {
        self.delete(&format!("/supplies/{id}")).await
    }

    async fn supplies_by_driver(&self, driver: DriverId) -> Result<Vec<Supply>, ApiError> {
        self.get(&format!("/supplies/list/{driver}")).await
    }

    async fn supplies_by_pick_up_point(
        &self,
        point: PickUpPointId,
    ) -> Result<Vec<Supply>, ApiError> {
        self.get(&format!("/supplies/spisok/{point}")).await
    }

    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get("/all_products").await
    }

    async fn create_product(&self, product: NewProduct) -> Result<Option<Product>, ApiError> {
        self.fetch_optional(
            self.request(Method::POST, "/products")
                .json(&NewRecord::new(&product)),
        )
        .await
    }

    async fn update_product(&self, product: Product) -> Result<(), ApiError> {
        self.put(&format!("/products/{}", product.id), &product).await
    }

    async fn list_working_shifts(&self) -> Result<Vec<WorkingShift>, ApiError> {
        self.get("/all_working_shifts").await
    }

    async fn create_working_shift(&self, shift: NewWorkingShift) -> Result<(), ApiError> {
        self.post("/working_shifts", &NewRecord::new(&shift)).await
    }
}
