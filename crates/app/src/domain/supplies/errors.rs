//! Supplies service errors.

use thiserror::Error;
use waybill::{
    supplies::{SupplyId, SupplyStatus},
    validation::ValidationError,
};

use crate::{api::ApiError, storage::StorageError};

#[derive(Debug, Error)]
pub enum SuppliesServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("backend request failed")]
    Api(#[from] ApiError),

    #[error("local storage failed")]
    Storage(#[from] StorageError),

    #[error("no pick-up point is assigned to this worker")]
    NoPickUpPoint,

    #[error("supply {0} is not on the board")]
    NotOnBoard(SupplyId),

    #[error("supply {supply} cannot be confirmed while {status}")]
    NotConfirmable {
        supply: SupplyId,
        status: SupplyStatus,
    },
}

impl SuppliesServiceError {
    /// Message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(error) => error.to_string(),
            Self::Api(_) | Self::Storage(_) => {
                "Could not load supplies. Please try again later.".to_string()
            }
            Self::NoPickUpPoint => "You are not assigned to a pick-up point.".to_string(),
            Self::NotOnBoard(supply) => format!("Supply #{supply} is not on your board."),
            Self::NotConfirmable { supply, status } => {
                format!("Supply #{supply} cannot be confirmed while it is {status}.")
            }
        }
    }
}
