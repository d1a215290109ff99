//! Shifts service errors.

use thiserror::Error;
use waybill::{time::TimeError, validation::ValidationError};

use crate::{api::ApiError, storage::StorageError};

#[derive(Debug, Error)]
pub enum ShiftsServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("backend request failed")]
    Api(#[from] ApiError),

    #[error("local storage failed")]
    Storage(#[from] StorageError),

    #[error("stored shift start is invalid")]
    Time(#[from] TimeError),
}

impl ShiftsServiceError {
    /// Message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(error) => error.to_string(),
            Self::Api(_) => "Could not record the shift. Please try again later.".to_string(),
            Self::Storage(_) | Self::Time(_) => "Could not read the open shift.".to_string(),
        }
    }
}
