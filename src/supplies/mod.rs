//! Supplies
//!
//! A supply is one scheduled delivery from a driver to a pick-up point. Its status
//! on screen is never stored: it is derived from the scheduled time and the set of
//! supplies this client has confirmed, every time a board is built.

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use crate::{
    fleet::{DriverId, PickUpPointId},
    ids::TypedId,
    time,
    validation::{Required, ValidationError},
};

pub mod board;
pub mod confirmed;
pub mod details;
pub mod status;

pub use board::{BoardEntry, SupplyBoard};
pub use confirmed::ConfirmedSupplies;
pub use details::{Arrival, Destination, DriverContact};
pub use status::SupplyStatus;

/// Supply Id
pub type SupplyId = TypedId<Supply>;

/// Supply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supply {
    /// Supply id
    pub id: SupplyId,

    /// Assigned driver
    #[serde(default)]
    pub driver_id: Option<DriverId>,

    /// Destination pick-up point
    pub pick_up_point_id: PickUpPointId,

    /// Scheduled time
    #[serde(with = "time::naive")]
    pub time: DateTime,

    /// Backend readiness flag
    #[serde(default)]
    pub ready: bool,
}

/// Scheduling form for a new supply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplyForm {
    /// Selected driver
    pub driver_id: Option<DriverId>,

    /// Selected pick-up point
    pub pick_up_point_id: Option<PickUpPointId>,

    /// Selected time
    pub time: Option<DateTime>,
}

/// Validated supply ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSupply {
    /// Assigned driver
    pub driver_id: DriverId,

    /// Destination pick-up point
    pub pick_up_point_id: PickUpPointId,

    /// Scheduled time
    #[serde(with = "time::naive")]
    pub time: DateTime,
}

impl SupplyForm {
    /// Validate the form at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingFields`] (or `MissingField`) when a
    /// selection is missing, and [`ValidationError::InPast`] when the time has
    /// already passed.
    pub fn validate(&self, now: DateTime) -> Result<NewSupply, ValidationError> {
        Required::new()
            .number("driver", self.driver_id.map(DriverId::get))
            .number("pick-up point", self.pick_up_point_id.map(PickUpPointId::get))
            .present("time", self.time.is_some())
            .finish()?;

        let (Some(driver_id), Some(pick_up_point_id), Some(time)) =
            (self.driver_id, self.pick_up_point_id, self.time)
        else {
            return Err(ValidationError::MissingField("supply"));
        };

        if time < now {
            return Err(ValidationError::InPast("supply time"));
        }

        Ok(NewSupply {
            driver_id,
            pick_up_point_id,
            time,
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn deserializes_backend_record() -> TestResult {
        let supply: Supply = serde_json::from_str(
            r#"{"id": 1, "driver_id": 2, "pick_up_point_id": 3, "time": "2024-01-01 10:00:00"}"#,
        )?;

        assert_eq!(supply.id, SupplyId::new(1));
        assert_eq!(supply.driver_id, Some(DriverId::new(2)));
        assert_eq!(supply.time, date(2024, 1, 1).at(10, 0, 0, 0));
        assert!(!supply.ready);

        Ok(())
    }

    #[test]
    fn form_requires_every_selection() {
        let form = SupplyForm {
            driver_id: Some(DriverId::new(1)),
            ..SupplyForm::default()
        };

        assert_eq!(
            form.validate(date(2024, 1, 1).at(0, 0, 0, 0)),
            Err(ValidationError::MissingFields(vec!["pick-up point", "time"]))
        );
    }

    #[test]
    fn form_rejects_past_time() {
        let form = SupplyForm {
            driver_id: Some(DriverId::new(1)),
            pick_up_point_id: Some(PickUpPointId::new(2)),
            time: Some(date(2024, 1, 1).at(9, 0, 0, 0)),
        };

        assert_eq!(
            form.validate(date(2024, 1, 1).at(10, 0, 0, 0)),
            Err(ValidationError::InPast("supply time"))
        );
    }

    #[test]
    fn valid_form_serializes_wire_time() -> TestResult {
        let form = SupplyForm {
            driver_id: Some(DriverId::new(1)),
            pick_up_point_id: Some(PickUpPointId::new(2)),
            time: Some(date(2024, 1, 2).at(9, 30, 0, 0)),
        };

        let supply = form.validate(date(2024, 1, 1).at(10, 0, 0, 0))?;

        assert_eq!(
            serde_json::to_value(&supply)?,
            serde_json::json!({
                "driver_id": 1,
                "pick_up_point_id": 2,
                "time": "2024-01-02T09:30:00",
            })
        );

        Ok(())
    }
}
