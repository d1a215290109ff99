use jiff::civil::{Date, DateTime, Time};

use crate::{fleet::PersonName, reports::ReportRow, shifts::ShiftStatus};

/// Filters shared by the shift and supply reports. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    /// First day of the period, inclusive
    pub start_date: Option<Date>,

    /// Last day of the period, inclusive through 23:59:59
    pub end_date: Option<Date>,

    /// Worker (shift report) or driver (supply report) id
    pub person_id: Option<i64>,

    /// Shift outcome, shift report only
    pub shift_status: Option<ShiftStatus>,

    /// Readiness flag, supply report only
    pub ready: Option<bool>,

    /// Case-insensitive fragment of the person's full name
    pub search: String,
}

impl ReportFilter {
    /// Whether `at` falls within the period.
    pub fn in_period(&self, at: DateTime) -> bool {
        let after_start = self
            .start_date
            .is_none_or(|start| at >= start.to_datetime(Time::midnight()));

        let before_end = self
            .end_date
            .is_none_or(|end| at <= end.at(23, 59, 59, 0));

        after_start && before_end
    }

    /// Whether the person's full name contains the search term.
    pub fn matches_name(&self, person: &PersonName) -> bool {
        let term = self.search.trim().to_lowercase();

        term.is_empty() || person.full_name().to_lowercase().contains(&term)
    }

    /// Whether the row passes every filter.
    pub fn matches<R: ReportRow>(&self, row: &R) -> bool {
        self.in_period(row.occurred_at())
            && self
                .person_id
                .is_none_or(|id| row.person_id() == Some(id))
            && row.matches_state(self)
            && self.matches_name(row.person())
    }

    /// Rows passing the filter, in their original order.
    pub fn apply<'a, R: ReportRow>(&self, rows: &'a [R]) -> Vec<&'a R> {
        rows.iter().filter(|row| self.matches(*row)).collect()
    }
}
