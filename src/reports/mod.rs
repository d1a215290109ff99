//! Reports
//!
//! Shift and supply reports for administrators. Rows are joined with the name of
//! the person behind them and the address of their pick-up point, then filtered
//! by period, person, state and name before being rendered or exported.

use std::io;

use jiff::civil::DateTime;
use smallvec::{SmallVec, smallvec};
use thiserror::Error;

use crate::{
    fleet::{DriverId, PersonName, WorkerId},
    shifts::{ShiftStatus, WorkingShift, WorkingShiftId},
    supplies::{Supply, SupplyId},
    time::format_display,
};

pub mod csv;
mod filter;

pub use filter::ReportFilter;

/// Placeholder for an address that could not be resolved.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Errors raised while exporting a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The destination could not be written.
    #[error("failed to write report")]
    Io(#[from] io::Error),
}

/// Cells of one report row.
pub type ReportFields = SmallVec<[String; 10]>;

/// A row of an exportable report.
pub trait ReportRow {
    /// Column headers, in field order.
    const HEADERS: &'static [&'static str];

    /// Prefix of the exported file name.
    const FILE_PREFIX: &'static str;

    /// Moment the period filters compare against.
    fn occurred_at(&self) -> DateTime;

    /// Worker or driver the row belongs to.
    fn person_id(&self) -> Option<i64>;

    /// Name of the person the row belongs to.
    fn person(&self) -> &PersonName;

    /// Whether the row passes the report-specific state filter.
    fn matches_state(&self, filter: &ReportFilter) -> bool;

    /// Cells in header order, decimals written with `decimal_separator`.
    fn fields(&self, decimal_separator: char) -> ReportFields;
}

/// Hours with one decimal and the given separator.
pub fn format_hours(hours: f64, decimal_separator: char) -> String {
    let formatted = format!("{hours:.1}");

    if decimal_separator == '.' {
        return formatted;
    }

    formatted.replace('.', &decimal_separator.to_string())
}

/// One working shift in the shift report.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftReportRow {
    /// Shift id
    pub shift_id: WorkingShiftId,

    /// Worker id
    pub worker_id: WorkerId,

    /// Worker name
    pub person: PersonName,

    /// Address of the worker's pick-up point
    pub pick_up_point_address: String,

    /// Shift start
    pub start_time: DateTime,

    /// Shift end
    pub end_time: Option<DateTime>,

    /// Hours worked
    pub hours: f64,

    /// Shift outcome
    pub status: ShiftStatus,
}

impl ShiftReportRow {
    /// Join a shift with its worker's name and pick-up-point address.
    pub fn new(shift: &WorkingShift, person: PersonName, pick_up_point_address: String) -> Self {
        Self {
            shift_id: shift.id,
            worker_id: shift.worker_id,
            person,
            pick_up_point_address,
            start_time: shift.start_time,
            end_time: shift.end_time,
            hours: shift.hours(),
            status: shift.status(),
        }
    }
}

impl ReportRow for ShiftReportRow {
    const HEADERS: &'static [&'static str] = &[
        "Shift ID",
        "Worker ID",
        "Surname",
        "Name",
        "Patronymic",
        "Shift start",
        "Shift end",
        "Pick-up point address",
        "Hours",
        "Status",
    ];

    const FILE_PREFIX: &'static str = "shifts";

    fn occurred_at(&self) -> DateTime {
        self.start_time
    }

    fn person_id(&self) -> Option<i64> {
        Some(self.worker_id.get())
    }

    fn person(&self) -> &PersonName {
        &self.person
    }

    fn matches_state(&self, filter: &ReportFilter) -> bool {
        filter
            .shift_status
            .is_none_or(|status| status == self.status)
    }

    fn fields(&self, decimal_separator: char) -> ReportFields {
        smallvec![
            self.shift_id.to_string(),
            self.worker_id.to_string(),
            self.person.surname.clone(),
            self.person.name.clone(),
            self.person.last_name.clone(),
            format_display(self.start_time),
            self.end_time.map(format_display).unwrap_or_default(),
            self.pick_up_point_address.clone(),
            format_hours(self.hours, decimal_separator),
            self.status.label().to_string(),
        ]
    }
}

/// One supply in the supply report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplyReportRow {
    /// Supply id
    pub supply_id: SupplyId,

    /// Driver id
    pub driver_id: Option<DriverId>,

    /// Driver name
    pub person: PersonName,

    /// Destination address
    pub pick_up_point_address: String,

    /// Scheduled time
    pub time: DateTime,

    /// Backend readiness flag
    pub ready: bool,
}

impl SupplyReportRow {
    /// Join a supply with its driver's name and destination address.
    pub fn new(supply: &Supply, person: PersonName, pick_up_point_address: String) -> Self {
        Self {
            supply_id: supply.id,
            driver_id: supply.driver_id,
            person,
            pick_up_point_address,
            time: supply.time,
            ready: supply.ready,
        }
    }

    /// Readiness label.
    pub fn readiness(&self) -> &'static str {
        if self.ready { "Ready" } else { "Not ready" }
    }
}

impl ReportRow for SupplyReportRow {
    const HEADERS: &'static [&'static str] = &[
        "Supply ID",
        "Driver ID",
        "Surname",
        "Name",
        "Patronymic",
        "Date and time",
        "Pick-up point address",
        "Readiness",
    ];

    const FILE_PREFIX: &'static str = "supplies";

    fn occurred_at(&self) -> DateTime {
        self.time
    }

    fn person_id(&self) -> Option<i64> {
        self.driver_id.map(DriverId::get)
    }

    fn person(&self) -> &PersonName {
        &self.person
    }

    fn matches_state(&self, filter: &ReportFilter) -> bool {
        filter.ready.is_none_or(|ready| ready == self.ready)
    }

    fn fields(&self, _decimal_separator: char) -> ReportFields {
        smallvec![
            self.supply_id.to_string(),
            self.driver_id.map(|id| id.to_string()).unwrap_or_default(),
            self.person.surname.clone(),
            self.person.name.clone(),
            self.person.last_name.clone(),
            format_display(self.time),
            self.pick_up_point_address.clone(),
            self.readiness().to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::fleet::PickUpPointId;

    fn person() -> PersonName {
        PersonName {
            name: "Ivan".to_string(),
            surname: "Petrov".to_string(),
            last_name: String::new(),
        }
    }

    #[test]
    fn hours_use_the_requested_separator() {
        assert_eq!(format_hours(7.5, ','), "7,5");
        assert_eq!(format_hours(8.0, '.'), "8.0");
    }

    #[test]
    fn shift_row_computes_hours_and_default_status() {
        let shift = WorkingShift {
            id: WorkingShiftId::new(3),
            worker_id: WorkerId::new(4),
            start_time: date(2024, 3, 1).at(9, 0, 0, 0),
            end_time: Some(date(2024, 3, 1).at(16, 30, 0, 0)),
            hours_worked: None,
            status: None,
        };

        let row = ShiftReportRow::new(&shift, person(), NOT_SPECIFIED.to_string());
        let fields = row.fields(',');

        assert_eq!(fields.len(), ShiftReportRow::HEADERS.len());
        assert_eq!(fields.get(8).map(String::as_str), Some("7,5"));
        assert_eq!(fields.get(9).map(String::as_str), Some("Completed"));
        assert_eq!(fields.get(6).map(String::as_str), Some("2024-03-01 16:30"));
    }

    #[test]
    fn supply_row_labels_readiness() {
        let supply = Supply {
            id: SupplyId::new(1),
            driver_id: None,
            pick_up_point_id: PickUpPointId::new(2),
            time: date(2024, 3, 1).at(9, 0, 0, 0),
            ready: true,
        };

        let row = SupplyReportRow::new(&supply, PersonName::default(), "Main st".to_string());
        let fields = row.fields('.');

        assert_eq!(fields.len(), SupplyReportRow::HEADERS.len());
        assert_eq!(fields.get(1).map(String::as_str), Some(""));
        assert_eq!(fields.get(7).map(String::as_str), Some("Ready"));
    }
}
