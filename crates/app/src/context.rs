//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    api::{ApiError, HttpLogisticsApi, LogisticsApi},
    config::AppConfig,
    domain::{
        auth::{ApiAuthService, AuthService},
        fleet::{ApiFleetService, FleetService},
        products::{ApiProductsService, ProductsService},
        reports::{ApiReportsService, ReportsService},
        shifts::{ApiShiftsService, ShiftsService},
        supplies::{ApiSuppliesService, SuppliesService},
    },
    session::{BearerToken, SessionStore},
    storage::{FileStore, KeyValueStore},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to build backend client")]
    Api(#[source] ApiError),
}

#[derive(Clone)]
pub struct AppContext {
    pub sessions: SessionStore,
    pub auth: Arc<dyn AuthService>,
    pub supplies: Arc<dyn SuppliesService>,
    pub products: Arc<dyn ProductsService>,
    pub fleet: Arc<dyn FleetService>,
    pub shifts: Arc<dyn ShiftsService>,
    pub reports: Arc<dyn ReportsService>,
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let token = BearerToken::default();

        let api: Arc<dyn LogisticsApi> = Arc::new(
            HttpLogisticsApi::new(
                &config.api.api_url,
                config.api.request_timeout(),
                token.clone(),
            )
            .map_err(AppInitError::Api)?,
        );

        let store: Arc<dyn KeyValueStore> =
            Arc::new(FileStore::new(config.storage.storage_path.clone()));

        Ok(Self::new(api, store, token))
    }

    /// Wire every service over one backend client and key/value mirror.
    #[must_use]
    pub fn new(
        api: Arc<dyn LogisticsApi>,
        store: Arc<dyn KeyValueStore>,
        token: BearerToken,
    ) -> Self {
        let sessions = SessionStore::new(Arc::clone(&store), token);

        Self {
            auth: Arc::new(ApiAuthService::new(Arc::clone(&api), sessions.clone())),
            supplies: Arc::new(ApiSuppliesService::new(Arc::clone(&api), Arc::clone(&store))),
            products: Arc::new(ApiProductsService::new(Arc::clone(&api))),
            fleet: Arc::new(ApiFleetService::new(Arc::clone(&api))),
            shifts: Arc::new(ApiShiftsService::new(Arc::clone(&api), store)),
            reports: Arc::new(ApiReportsService::new(api)),
            sessions,
        }
    }
}
