//! Working shifts

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use crate::{
    fleet::WorkerId,
    ids::TypedId,
    time,
    validation::ValidationError,
};

/// Working Shift Id
pub type WorkingShiftId = TypedId<WorkingShift>;

/// Outcome of a working shift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    /// Finished normally.
    #[default]
    Completed,

    /// Still running.
    InProgress,

    /// Cancelled.
    Canceled,
}

impl ShiftStatus {
    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::InProgress => "In progress",
            Self::Canceled => "Canceled",
        }
    }
}

impl Display for ShiftStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.label())
    }
}

/// A working shift recorded by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingShift {
    /// Shift id
    pub id: WorkingShiftId,

    /// Worker who worked the shift
    pub worker_id: WorkerId,

    /// Shift start
    #[serde(with = "time::naive")]
    pub start_time: DateTime,

    /// Shift end, absent while the shift is open
    #[serde(default, with = "time::naive_option")]
    pub end_time: Option<DateTime>,

    /// Hours worked, when the backend reports them
    #[serde(default)]
    pub hours_worked: Option<f64>,

    /// Shift outcome, when the backend reports it
    #[serde(default)]
    pub status: Option<ShiftStatus>,
}

impl WorkingShift {
    /// Hours worked: the backend figure when non-zero, else the elapsed time.
    pub fn hours(&self) -> f64 {
        self.hours_worked
            .filter(|hours| hours.abs() > f64::EPSILON)
            .unwrap_or_else(|| elapsed_hours(self.start_time, self.end_time))
    }

    /// Shift outcome, [`ShiftStatus::Completed`] when unreported.
    pub fn status(&self) -> ShiftStatus {
        self.status.unwrap_or_default()
    }
}

/// Hours between `start` and `end`, rounded to one decimal; zero without an end.
pub fn elapsed_hours(start: DateTime, end: Option<DateTime>) -> f64 {
    let Some(end) = end else {
        return 0.0;
    };

    let hours = end.duration_since(start).as_secs_f64() / 3600.0;

    (hours * 10.0).round() / 10.0
}

/// A finished shift ready to be recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewWorkingShift {
    /// Worker who worked the shift
    pub worker_id: WorkerId,

    /// Shift start
    #[serde(with = "time::naive")]
    pub start_time: DateTime,

    /// Shift end
    #[serde(with = "time::naive")]
    pub end_time: DateTime,
}

/// The shift currently open on this client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftClock {
    started_at: Option<DateTime>,
}

impl ShiftClock {
    /// Resume a clock from a persisted start time.
    pub fn resume(started_at: Option<DateTime>) -> Self {
        Self { started_at }
    }

    /// Start time of the open shift, if any.
    pub fn started_at(&self) -> Option<DateTime> {
        self.started_at
    }

    /// Open a shift at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ShiftAlreadyStarted`] when a shift is already open.
    pub fn start(&mut self, now: DateTime) -> Result<DateTime, ValidationError> {
        if self.started_at.is_some() {
            return Err(ValidationError::ShiftAlreadyStarted);
        }

        self.started_at = Some(now);

        Ok(now)
    }

    /// Close the open shift at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ShiftNotStarted`] when no shift is open.
    pub fn finish(
        &mut self,
        worker_id: WorkerId,
        now: DateTime,
    ) -> Result<NewWorkingShift, ValidationError> {
        let start_time = self
            .started_at
            .take()
            .ok_or(ValidationError::ShiftNotStarted)?;

        Ok(NewWorkingShift {
            worker_id,
            start_time,
            end_time: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    fn shift(hours_worked: Option<f64>, end: Option<DateTime>) -> WorkingShift {
        WorkingShift {
            id: WorkingShiftId::new(1),
            worker_id: WorkerId::new(2),
            start_time: date(2024, 1, 1).at(9, 0, 0, 0),
            end_time: end,
            hours_worked,
            status: None,
        }
    }

    #[test]
    fn elapsed_hours_round_to_one_decimal() {
        let hours = elapsed_hours(
            date(2024, 1, 1).at(9, 0, 0, 0),
            Some(date(2024, 1, 1).at(17, 20, 0, 0)),
        );

        assert!((hours - 8.3).abs() < 1e-9, "expected 8.3, got {hours}");
    }

    #[test]
    fn open_shift_has_zero_hours() {
        assert!(shift(None, None).hours().abs() < f64::EPSILON);
    }

    #[test]
    fn backend_hours_win_when_non_zero() {
        let reported = shift(Some(7.5), Some(date(2024, 1, 1).at(18, 0, 0, 0)));
        let zero = shift(Some(0.0), Some(date(2024, 1, 1).at(18, 0, 0, 0)));

        assert!((reported.hours() - 7.5).abs() < 1e-9);
        assert!((zero.hours() - 9.0).abs() < 1e-9);
    }

    #[test]
    fn status_defaults_to_completed() {
        assert_eq!(shift(None, None).status(), ShiftStatus::Completed);
    }

    #[test]
    fn clock_requires_a_started_shift() {
        let mut clock = ShiftClock::default();

        assert_eq!(
            clock.finish(WorkerId::new(1), date(2024, 1, 1).at(9, 0, 0, 0)),
            Err(ValidationError::ShiftNotStarted)
        );
    }

    #[test]
    fn clock_closes_the_open_shift() -> TestResult {
        let mut clock = ShiftClock::default();
        let start = clock.start(date(2024, 1, 1).at(9, 0, 0, 0))?;

        let finished = clock.finish(WorkerId::new(4), date(2024, 1, 1).at(17, 0, 0, 0))?;

        assert_eq!(finished.start_time, start);
        assert_eq!(finished.worker_id, WorkerId::new(4));
        assert_eq!(clock.started_at(), None);

        Ok(())
    }

    #[test]
    fn clock_keeps_the_first_start_of_an_open_shift() -> TestResult {
        let mut clock = ShiftClock::default();

        clock.start(date(2024, 5, 1).at(9, 0, 0, 0))?;

        assert_eq!(
            clock.start(date(2024, 5, 1).at(15, 0, 0, 0)),
            Err(ValidationError::ShiftAlreadyStarted)
        );
        assert_eq!(clock.started_at(), Some(date(2024, 5, 1).at(9, 0, 0, 0)));

        Ok(())
    }

    #[test]
    fn deserializes_open_shift() -> TestResult {
        let shift: WorkingShift = serde_json::from_str(
            r#"{"id": 1, "worker_id": 2, "start_time": "2024-01-01T09:00:00.123", "end_time": null}"#,
        )?;

        assert_eq!(shift.end_time, None);
        assert_eq!(shift.status(), ShiftStatus::Completed);

        Ok(())
    }
}
