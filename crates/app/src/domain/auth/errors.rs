//! Authentication service errors.

use thiserror::Error;
use waybill::validation::ValidationError;

use crate::{api::ApiError, session::SessionError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("login request failed")]
    Api(#[from] ApiError),

    #[error("session error")]
    Session(#[from] SessionError),
}

impl AuthServiceError {
    /// Message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(error) => error.to_string(),
            Self::Api(error) if error.is_unauthorized() => "Invalid login or password.".to_string(),
            Self::Api(_) => "Sign-in failed. Please try again.".to_string(),
            Self::Session(SessionError::SignedOut) => "You are not signed in.".to_string(),
            Self::Session(SessionError::Storage(_)) => {
                "Could not access the local session.".to_string()
            }
        }
    }
}
