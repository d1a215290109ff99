//! Products service errors.

use thiserror::Error;
use waybill::{products::ProductId, validation::ValidationError};

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("backend request failed")]
    Api(#[from] ApiError),

    #[error("no pick-up point is assigned to this worker")]
    NoPickUpPoint,

    #[error("product {0} not found")]
    NotFound(ProductId),
}

impl ProductsServiceError {
    /// Message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(error) => error.to_string(),
            Self::Api(_) => "Could not load products. Please try again later.".to_string(),
            Self::NoPickUpPoint => "You are not assigned to a pick-up point.".to_string(),
            Self::NotFound(product) => format!("Product #{product} was not found."),
        }
    }
}
