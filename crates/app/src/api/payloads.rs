//! Request and response bodies that have no counterpart in the domain.

use serde::{Deserialize, Serialize};
use waybill::users::User;
use zeroize::Zeroizing;

/// Credentials sent to `POST /login`.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    /// Login name
    pub login: String,

    /// Password
    #[serde(serialize_with = "expose")]
    pub password: Zeroizing<String>,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn expose<S: serde::Serializer>(
    value: &Zeroizing<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.as_str())
}

/// Body returned by `POST /login`.
#[derive(Deserialize)]
pub struct LoginResponse {
    /// Bearer token for later requests
    pub access_token: String,

    /// Profile of the signed-in user
    pub user: User,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("access_token", &"<redacted>")
            .field("user", &self.user.login)
            .finish()
    }
}

/// A record being created. The backend expects a placeholder id of zero.
#[derive(Debug, Clone, Serialize)]
pub struct NewRecord<'a, T: Serialize> {
    id: i64,

    #[serde(flatten)]
    record: &'a T,
}

impl<'a, T: Serialize> NewRecord<'a, T> {
    /// Wrap a record for creation.
    pub fn new(record: &'a T) -> Self {
        Self { id: 0, record }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use waybill::fleet::NewCar;

    use super::*;

    #[test]
    fn new_records_carry_a_zero_id() -> TestResult {
        let car = NewCar {
            number: "A123BC".to_string(),
            region: 77,
        };

        assert_eq!(
            serde_json::to_value(NewRecord::new(&car))?,
            serde_json::json!({"id": 0, "number": "A123BC", "region": 77})
        );

        Ok(())
    }

    #[test]
    fn login_request_debug_hides_the_password() {
        let request = LoginRequest {
            login: "admin".to_string(),
            password: Zeroizing::new("hunter2".to_string()),
        };

        assert!(!format!("{request:?}").contains("hunter2"), "password leaked");
    }
}
