//! Form validation

use thiserror::Error;

/// Errors raised by form validation, before any request leaves the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was empty or missing.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Several required fields were empty or missing.
    #[error("required fields are missing: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// A scheduled time lies in the past.
    #[error("{0} cannot be in the past")]
    InPast(&'static str),

    /// A shift was ended without having been started.
    #[error("no shift has been started")]
    ShiftNotStarted,

    /// A shift was started while another one is still open.
    #[error("a shift is already open")]
    ShiftAlreadyStarted,

    /// The requested status change is not allowed from the record's current status.
    #[error("cannot change status from {from} to {to}")]
    StatusTransition {
        /// Current status.
        from: &'static str,

        /// Requested status.
        to: &'static str,
    },
}

/// Collects missing required fields for a form.
#[derive(Debug, Default)]
pub(crate) struct Required {
    missing: Vec<&'static str>,
}

impl Required {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record `field` as missing when `value` is blank.
    pub(crate) fn text(mut self, field: &'static str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.missing.push(field);
        }

        self
    }

    /// Record `field` as missing when `value` is absent or zero.
    pub(crate) fn number(mut self, field: &'static str, value: Option<i64>) -> Self {
        if value.is_none_or(|value| value == 0) {
            self.missing.push(field);
        }

        self
    }

    /// Record `field` as missing unless `is_present`.
    pub(crate) fn present(mut self, field: &'static str, is_present: bool) -> Self {
        if !is_present {
            self.missing.push(field);
        }

        self
    }

    /// Finish the check.
    pub(crate) fn finish(mut self) -> Result<(), ValidationError> {
        match self.missing.len() {
            0 => Ok(()),
            1 => Err(ValidationError::MissingField(self.missing.remove(0))),
            _ => Err(ValidationError::MissingFields(self.missing)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_when_everything_is_present() {
        let result = Required::new()
            .text("login", "admin")
            .number("region", Some(77))
            .finish();

        assert_eq!(result, Ok(()));
    }

    #[test]
    fn blank_text_is_missing() {
        let result = Required::new().text("login", "   ").finish();

        assert_eq!(result, Err(ValidationError::MissingField("login")));
    }

    #[test]
    fn zero_number_is_missing() {
        let result = Required::new()
            .text("address", "")
            .number("region", Some(0))
            .finish();

        assert_eq!(
            result,
            Err(ValidationError::MissingFields(vec!["address", "region"]))
        );
    }
}
