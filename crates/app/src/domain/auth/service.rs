//! Authentication service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};
use waybill::validation::ValidationError;
use zeroize::Zeroizing;

use crate::{
    api::{LogisticsApi, payloads::LoginRequest},
    domain::auth::errors::AuthServiceError,
    session::{Session, SessionStore},
};

#[derive(Clone)]
pub struct ApiAuthService {
    api: Arc<dyn LogisticsApi>,
    sessions: SessionStore,
}

impl ApiAuthService {
    #[must_use]
    pub fn new(api: Arc<dyn LogisticsApi>, sessions: SessionStore) -> Self {
        Self { api, sessions }
    }
}

#[async_trait]
impl AuthService for ApiAuthService {
    async fn login(
        &self,
        login: String,
        password: Zeroizing<String>,
    ) -> Result<Session, AuthServiceError> {
        let login = login.trim().to_string();

        match (login.is_empty(), password.is_empty()) {
            (true, true) => {
                return Err(ValidationError::MissingFields(vec!["login", "password"]).into());
            }
            (true, false) => return Err(ValidationError::MissingField("login").into()),
            (false, true) => return Err(ValidationError::MissingField("password").into()),
            (false, false) => {}
        }

        debug!(%login, "signing in");

        let response = self.api.login(LoginRequest { login, password }).await?;

        let session = Session {
            token: Zeroizing::new(response.access_token),
            profile: response.user,
        };

        self.sessions.save(&session).await?;

        info!(user = %session.profile.login, "signed in");

        Ok(session)
    }

    async fn logout(&self) -> Result<(), AuthServiceError> {
        self.sessions.clear().await?;

        Ok(())
    }

    async fn current(&self) -> Result<Option<Session>, AuthServiceError> {
        Ok(self.sessions.load().await?)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Validates credentials, signs in and stores the session.
    async fn login(
        &self,
        login: String,
        password: Zeroizing<String>,
    ) -> Result<Session, AuthServiceError>;

    /// Forgets the stored session.
    async fn logout(&self) -> Result<(), AuthServiceError>;

    /// The stored session, if any.
    async fn current(&self) -> Result<Option<Session>, AuthServiceError>;
}
