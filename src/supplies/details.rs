//! Board enrichment

use crate::{fleet::PersonName, users::User};

/// Destination of a supply, shown on the driver board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Destination {
    /// Pick-up point address
    pub address: String,

    /// Pick-up point region
    pub region: i64,
}

/// Contact details of the driver bringing a supply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriverContact {
    /// Driver name
    pub person: PersonName,

    /// Driver phone number
    pub phone_number: String,
}

impl From<&User> for DriverContact {
    fn from(user: &User) -> Self {
        Self {
            person: PersonName::from(user),
            phone_number: user.phone_number.clone(),
        }
    }
}

/// Arrival details of a supply, shown on the pick-up-point board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arrival {
    /// Pick-up point address
    pub address: String,

    /// Driver contact, when it could be looked up
    pub driver: Option<DriverContact>,
}
