//! Users

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::{
    ids::TypedId,
    validation::{Required, ValidationError},
};

/// User Id
pub type UserId = TypedId<User>;

/// Role a user signs in with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Back-office administrator.
    Admin,

    /// Pick-up point worker.
    Worker,

    /// Delivery driver.
    Driver,
}

impl Role {
    /// Backend name of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Worker => "worker",
            Self::Driver => "driver",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// User profile as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User id
    pub id: UserId,

    /// Age in years
    #[serde(default)]
    pub age: u32,

    /// Login name
    pub login: String,

    /// Password, as echoed back by the backend
    #[serde(default)]
    pub password: String,

    /// Given name
    pub name: String,

    /// Family name
    pub surname: String,

    /// Patronymic
    #[serde(default)]
    pub last_name: String,

    /// Contact phone number
    #[serde(default)]
    pub phone_number: String,

    /// Region code
    #[serde(default)]
    pub region: i64,

    /// Role
    pub role: Role,
}

impl User {
    /// Full name in "surname name patronymic" order.
    pub fn full_name(&self) -> String {
        full_name(&self.surname, &self.name, &self.last_name)
    }
}

/// Registration form for a new user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Login name
    pub login: String,

    /// Password
    pub password: String,

    /// Given name
    pub name: String,

    /// Family name
    pub surname: String,

    /// Patronymic
    pub last_name: String,

    /// Age in years
    pub age: u32,

    /// Contact phone number
    pub phone_number: String,

    /// Region code
    pub region: i64,

    /// Role
    pub role: Role,
}

impl NewUser {
    /// Check required registration fields.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the missing fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        Required::new()
            .text("name", &self.name)
            .text("surname", &self.surname)
            .text("login", &self.login)
            .text("password", &self.password)
            .finish()
    }
}

/// Join name parts in "surname name patronymic" order, skipping blanks.
pub fn full_name(surname: &str, name: &str, last_name: &str) -> String {
    [surname, name, last_name]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
