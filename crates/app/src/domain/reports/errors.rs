//! Reports service errors.

use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum ReportsServiceError {
    #[error("backend request failed")]
    Api(#[from] ApiError),
}

impl ReportsServiceError {
    /// Message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(_) => "Could not load reports. Please try again later.".to_string(),
        }
    }
}
