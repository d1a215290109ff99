//! Fixtures
//!
//! YAML scenarios for the supply status workflow. A scenario lists supplies and a
//! sequence of checkpoints; at each checkpoint some supplies may be confirmed and
//! the board built at that moment is compared with the expected entries.

use std::{fs, path::PathBuf};

use jiff::civil::DateTime;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    fleet::{DriverId, PickUpPointId},
    supplies::{ConfirmedSupplies, Supply, SupplyBoard, SupplyId, SupplyStatus},
    time,
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A checkpoint confirms a supply the scenario does not define
    #[error("Supply not found: {0}")]
    SupplyNotFound(SupplyId),
}

/// A supply as written in a scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct SupplyFixture {
    /// Supply id
    pub id: SupplyId,

    /// Scheduled time
    #[serde(with = "time::naive")]
    pub time: DateTime,

    /// Destination pick-up point
    #[serde(default = "default_pick_up_point")]
    pub pick_up_point_id: PickUpPointId,

    /// Assigned driver
    #[serde(default)]
    pub driver_id: Option<DriverId>,
}

fn default_pick_up_point() -> PickUpPointId {
    PickUpPointId::new(1)
}

impl From<SupplyFixture> for Supply {
    fn from(fixture: SupplyFixture) -> Self {
        Self {
            id: fixture.id,
            driver_id: fixture.driver_id,
            pick_up_point_id: fixture.pick_up_point_id,
            time: fixture.time,
            ready: false,
        }
    }
}

/// Expected board entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ExpectedEntry {
    /// Supply id
    pub id: SupplyId,

    /// Derived status
    pub status: SupplyStatus,
}

/// One moment of a scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct Checkpoint {
    /// Clock reading
    #[serde(with = "time::naive")]
    pub at: DateTime,

    /// Supplies confirmed before the board is built
    #[serde(default)]
    pub confirm: Vec<SupplyId>,

    /// Board entries in display order
    #[serde(default)]
    pub expect: Vec<ExpectedEntry>,
}

/// A status workflow scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Supplies confirmed before the first checkpoint
    #[serde(default)]
    pub confirmed: Vec<SupplyId>,

    /// Supplies returned by the backend
    pub supplies: Vec<SupplyFixture>,

    /// Checkpoints, in order
    pub checkpoints: Vec<Checkpoint>,
}

/// Board observed at a checkpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// Clock reading
    pub at: DateTime,

    /// Entries the scenario expects
    pub expected: Vec<ExpectedEntry>,

    /// Entries the board produced
    pub actual: Vec<ExpectedEntry>,

    /// Confirmed set after the checkpoint's confirmations
    pub confirmed: Vec<SupplyId>,
}

impl Scenario {
    /// Parse a scenario from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Yaml`] when the document is malformed.
    pub fn from_yaml(contents: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(contents)?)
    }

    /// Replay every checkpoint, confirming supplies as it goes.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::SupplyNotFound`] when a checkpoint confirms an
    /// unknown supply.
    pub fn run(&self) -> Result<Vec<Observation>, FixtureError> {
        let supplies: Vec<Supply> = self.supplies.iter().cloned().map(Supply::from).collect();
        let mut confirmed: ConfirmedSupplies = self.confirmed.iter().copied().collect();
        let mut observations = Vec::with_capacity(self.checkpoints.len());

        for checkpoint in &self.checkpoints {
            for &id in &checkpoint.confirm {
                if !supplies.iter().any(|supply| supply.id == id) {
                    return Err(FixtureError::SupplyNotFound(id));
                }

                confirmed.insert(id);
            }

            let board = SupplyBoard::build(
                supplies.iter().cloned().map(|supply| (supply, ())),
                &confirmed,
                checkpoint.at,
            );

            observations.push(Observation {
                at: checkpoint.at,
                expected: checkpoint.expect.clone(),
                actual: board
                    .entries()
                    .iter()
                    .map(|entry| ExpectedEntry {
                        id: entry.supply.id,
                        status: entry.status,
                    })
                    .collect(),
                confirmed: confirmed.iter().collect(),
            });
        }

        Ok(observations)
    }
}

/// Fixture
#[derive(Debug, Clone)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a fixture loader with the default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a fixture loader with a custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Load a scenario from `<base>/scenarios/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_scenario(&self, name: &str) -> Result<Scenario, FixtureError> {
        let file_path = self.base_path.join("scenarios").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        Scenario::from_yaml(&contents)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const SCENARIO: &str = "
supplies:
  - id: 1
    time: 2024-01-01T10:00:00
checkpoints:
  - at: 2024-01-02T11:00:00
    expect:
      - { id: 1, status: overdue }
  - at: 2024-01-02T11:00:00
    confirm: [1, 1]
    expect:
      - { id: 1, status: confirmed }
";

    #[test]
    fn parses_and_replays_inline_scenario() -> TestResult {
        let observations = Scenario::from_yaml(SCENARIO)?.run()?;

        assert_eq!(observations.len(), 2);

        for observation in &observations {
            assert_eq!(observation.actual, observation.expected, "at {}", observation.at);
        }

        assert_eq!(
            observations.last().map(|o| o.confirmed.clone()),
            Some(vec![SupplyId::new(1)])
        );

        Ok(())
    }

    #[test]
    fn rejects_unknown_confirmations() -> TestResult {
        let scenario = Scenario::from_yaml(
            "
supplies: []
checkpoints:
  - at: 2024-01-02T11:00:00
    confirm: [9]
",
        )?;

        assert!(matches!(
            scenario.run(),
            Err(FixtureError::SupplyNotFound(id)) if id == SupplyId::new(9)
        ));

        Ok(())
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = Fixture::with_base_path("./does-not-exist").load_scenario("nothing");

        assert!(matches!(result, Err(FixtureError::Io(_))));
    }
}
