//! Timestamps exchanged with the backend.
//!
//! The backend speaks naive, zone-less timestamps (`2024-01-01 10:00:00` or
//! `2024-01-01T10:00:00`). They are modelled as [`DateTime`] and compared by plain
//! subtraction, without any calendar or time zone arithmetic.

use jiff::{SignedDuration, Timestamp, Zoned, civil::DateTime, tz::TimeZone};
use thiserror::Error;

/// Length of the window after which an unconfirmed supply is overdue.
pub const OVERDUE_AFTER: SignedDuration = SignedDuration::from_hours(24);

/// Format used when sending timestamps to the backend.
pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Format used on screen and in exported reports.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Errors raised while reading backend timestamps.
#[derive(Debug, Error)]
pub enum TimeError {
    /// The value is neither a civil date-time nor an absolute timestamp.
    #[error("invalid timestamp {value:?}")]
    Invalid {
        /// Raw value as received.
        value: String,

        /// Parser failure for the civil form.
        #[source]
        source: jiff::Error,
    },
}

/// Parse a backend timestamp into a civil date-time.
///
/// Values carrying an offset (or `Z`) are converted to the system time zone first.
///
/// # Errors
///
/// Returns [`TimeError::Invalid`] when the value cannot be parsed.
pub fn parse_timestamp(raw: &str) -> Result<DateTime, TimeError> {
    let trimmed = raw.trim();

    if let Ok(timestamp) = trimmed.parse::<Timestamp>() {
        return Ok(timestamp.to_zoned(TimeZone::system()).datetime());
    }

    trimmed
        .replacen(' ', "T", 1)
        .parse::<DateTime>()
        .map_err(|source| TimeError::Invalid {
            value: raw.to_string(),
            source,
        })
}

/// Current civil date-time in the system time zone.
pub fn now() -> DateTime {
    Zoned::now().datetime()
}

/// Render a civil date-time the way the backend expects it.
pub fn format_timestamp(value: DateTime) -> String {
    value.strftime(WIRE_FORMAT).to_string()
}

/// Render a civil date-time for people.
pub fn format_display(value: DateTime) -> String {
    value.strftime(DISPLAY_FORMAT).to_string()
}

/// Whether at least [`OVERDUE_AFTER`] has elapsed between `time` and `now`.
pub fn is_overdue(time: DateTime, now: DateTime) -> bool {
    now.duration_since(time) >= OVERDUE_AFTER
}

/// Whether `time` falls on the same calendar date as `now`.
pub fn is_same_date(time: DateTime, now: DateTime) -> bool {
    time.date() == now.date()
}

/// Serde adapter for required backend timestamps.
pub mod naive {
    use jiff::civil::DateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    /// Serialize a civil date-time in the backend wire format.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(value: &DateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(*value))
    }

    /// Deserialize a civil date-time from any accepted backend form.
    ///
    /// # Errors
    ///
    /// Fails when the string is not a recognised timestamp.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;

        super::parse_timestamp(&raw).map_err(D::Error::custom)
    }
}

/// Serde adapter for nullable backend timestamps.
pub mod naive_option {
    use jiff::civil::DateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    /// Serialize an optional civil date-time, `null` when absent.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    #[expect(
        clippy::ref_option,
        reason = "serde `with` adapters receive the field by reference"
    )]
    pub fn serialize<S: Serializer>(
        value: &Option<DateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_str(&super::format_timestamp(*value)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an optional civil date-time; `null` and empty strings are absent.
    ///
    /// # Errors
    ///
    /// Fails when a present string is not a recognised timestamp.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => super::parse_timestamp(&raw)
                .map(Some)
                .map_err(D::Error::custom),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_space_separated_timestamp() -> TestResult {
        let parsed = parse_timestamp("2024-01-01 10:00:00")?;

        assert_eq!(parsed, date(2024, 1, 1).at(10, 0, 0, 0));

        Ok(())
    }

    #[test]
    fn parses_t_separated_timestamp_with_fraction() -> TestResult {
        let parsed = parse_timestamp("2024-01-01T10:00:00.250")?;

        assert_eq!(parsed, date(2024, 1, 1).at(10, 0, 0, 250_000_000));

        Ok(())
    }

    #[test]
    fn rejects_garbage() {
        let result = parse_timestamp("yesterday");

        assert!(
            matches!(result, Err(TimeError::Invalid { .. })),
            "expected Invalid, got {result:?}"
        );
    }

    #[test]
    fn formats_in_wire_format() {
        let formatted = format_timestamp(date(2024, 3, 9).at(7, 5, 3, 0));

        assert_eq!(formatted, "2024-03-09T07:05:03");
    }

    #[test]
    fn overdue_uses_exact_elapsed_time() {
        let time = date(2024, 1, 1).at(10, 0, 0, 0);

        assert!(!is_overdue(time, date(2024, 1, 2).at(9, 59, 59, 0)));
        assert!(is_overdue(time, date(2024, 1, 2).at(10, 0, 0, 0)));
    }

    #[test]
    fn same_date_ignores_time_of_day() {
        let time = date(2024, 1, 1).at(0, 0, 1, 0);

        assert!(is_same_date(time, date(2024, 1, 1).at(23, 59, 0, 0)));
        assert!(!is_same_date(time, date(2024, 1, 2).at(0, 0, 0, 0)));
    }
}
