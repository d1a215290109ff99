//! Supply status derivation

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use crate::time::{is_overdue, is_same_date};

/// Presentation status of a supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupplyStatus {
    /// Scheduled for a later date.
    Pending,

    /// Scheduled for today.
    Processing,

    /// Marked delivered from this client.
    Confirmed,

    /// Unconfirmed a day or more after its scheduled time.
    Overdue,
}

impl SupplyStatus {
    /// Derive the status of a supply scheduled at `time`.
    ///
    /// The first matching rule wins: confirmed, then a full day elapsed, then
    /// scheduled on today's date, otherwise pending.
    pub fn derive(time: DateTime, is_confirmed: bool, now: DateTime) -> Self {
        if is_confirmed {
            Self::Confirmed
        } else if is_overdue(time, now) {
            Self::Overdue
        } else if is_same_date(time, now) {
            Self::Processing
        } else {
            Self::Pending
        }
    }

    /// Whether the "confirm delivery" action is offered.
    pub fn can_confirm(self) -> bool {
        matches!(self, Self::Processing | Self::Overdue)
    }

    /// Position of the status group on a board.
    pub(crate) fn sort_rank(self) -> u8 {
        match self {
            Self::Overdue => 0,
            Self::Processing => 1,
            Self::Pending | Self::Confirmed => 2,
        }
    }

    /// Machine name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Confirmed => "confirmed",
            Self::Overdue => "overdue",
        }
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Expected",
            Self::Processing => "Today",
            Self::Confirmed => "Confirmed",
            Self::Overdue => "Overdue",
        }
    }
}

impl Display for SupplyStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn confirmed_wins_over_everything() {
        let time = date(2024, 1, 1).at(10, 0, 0, 0);
        let now = date(2024, 1, 9).at(10, 0, 0, 0);

        assert_eq!(SupplyStatus::derive(time, true, now), SupplyStatus::Confirmed);
    }

    #[test]
    fn a_full_day_later_is_overdue() {
        let time = date(2024, 1, 1).at(10, 0, 0, 0);
        let now = date(2024, 1, 2).at(11, 0, 0, 0);

        assert_eq!(SupplyStatus::derive(time, false, now), SupplyStatus::Overdue);
    }

    #[test]
    fn same_date_is_processing() {
        let time = date(2024, 1, 1).at(18, 0, 0, 0);
        let now = date(2024, 1, 1).at(9, 0, 0, 0);

        assert_eq!(
            SupplyStatus::derive(time, false, now),
            SupplyStatus::Processing
        );
    }

    #[test]
    fn future_date_is_pending() {
        let time = date(2024, 1, 3).at(9, 0, 0, 0);
        let now = date(2024, 1, 1).at(9, 0, 0, 0);

        assert_eq!(SupplyStatus::derive(time, false, now), SupplyStatus::Pending);
    }

    #[test]
    fn late_yesterday_checked_early_today_is_pending() {
        let time = date(2024, 1, 1).at(23, 0, 0, 0);
        let now = date(2024, 1, 2).at(1, 0, 0, 0);

        assert_eq!(SupplyStatus::derive(time, false, now), SupplyStatus::Pending);
    }

    #[test]
    fn only_processing_and_overdue_can_be_confirmed() {
        assert!(SupplyStatus::Processing.can_confirm());
        assert!(SupplyStatus::Overdue.can_confirm());
        assert!(!SupplyStatus::Pending.can_confirm());
        assert!(!SupplyStatus::Confirmed.can_confirm());
    }
}
