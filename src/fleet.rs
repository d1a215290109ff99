//! Cars, pick-up points, drivers and workers.

use serde::{Deserialize, Serialize};

use crate::{
    ids::TypedId,
    users::{User, UserId, full_name},
    validation::{Required, ValidationError},
};

/// Car Id
pub type CarId = TypedId<Car>;

/// Pick-up Point Id
pub type PickUpPointId = TypedId<PickUpPoint>;

/// Driver Id
pub type DriverId = TypedId<Driver>;

/// Worker Id
pub type WorkerId = TypedId<Worker>;

/// Car
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    /// Car id
    pub id: CarId,

    /// Registration number
    pub number: String,

    /// Region code
    pub region: i64,
}

/// Form for registering a car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCar {
    /// Registration number
    pub number: String,

    /// Region code
    pub region: i64,
}

impl NewCar {
    /// Check that number and region are present.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the missing fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        Required::new()
            .text("number", &self.number)
            .number("region", Some(self.region))
            .finish()
    }
}

/// Pick-up point (PVZ)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickUpPoint {
    /// Pick-up point id
    pub id: PickUpPointId,

    /// Street address
    pub address: String,

    /// Region code
    pub region: i64,
}

/// Form for opening a pick-up point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPickUpPoint {
    /// Street address
    pub address: String,

    /// Region code
    pub region: i64,
}

impl NewPickUpPoint {
    /// Check that address and region are present.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the missing fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        Required::new()
            .text("address", &self.address)
            .number("region", Some(self.region))
            .finish()
    }
}

/// Driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    /// Driver id
    pub id: DriverId,

    /// Assigned car, if any
    #[serde(default)]
    pub car_id: Option<CarId>,

    /// Backing user
    pub user_id: UserId,
}

/// Pick-up point worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    /// Worker id
    pub id: WorkerId,

    /// Assigned pick-up point, if any
    #[serde(default)]
    pub pick_up_point_id: Option<PickUpPointId>,

    /// Backing user
    pub user_id: UserId,
}

/// Name parts of the user behind a driver or worker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonName {
    /// Given name
    pub name: String,

    /// Family name
    pub surname: String,

    /// Patronymic
    pub last_name: String,
}

impl PersonName {
    /// Placeholder for a user that could not be loaded.
    pub fn unknown() -> Self {
        Self {
            name: "Unknown".to_string(),
            ..Self::default()
        }
    }

    /// Full name in "surname name patronymic" order.
    pub fn full_name(&self) -> String {
        full_name(&self.surname, &self.name, &self.last_name)
    }
}

impl From<&User> for PersonName {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            surname: user.surname.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

/// A staff record joined with the name of its user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Staffed<T> {
    /// Driver or worker record
    pub record: T,

    /// Name of the backing user
    pub person: PersonName,
}
