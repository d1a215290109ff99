//! Fleet service errors.

use reqwest::StatusCode;
use thiserror::Error;
use waybill::validation::ValidationError;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum FleetServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("backend request failed")]
    Api(#[from] ApiError),
}

impl FleetServiceError {
    /// Message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(error) => error.to_string(),
            Self::Api(error) if error.status() == Some(StatusCode::NOT_FOUND) => {
                "The record no longer exists.".to_string()
            }
            Self::Api(_) => "The request failed. Please try again later.".to_string(),
        }
    }
}
