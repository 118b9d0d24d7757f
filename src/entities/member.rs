use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{unexpected_error, Error};

/// A row of the `users` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub phone_number: String,
    pub name: String,
    pub role: Role,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Passenger,
    Admin,
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "passenger" => Ok(Self::Passenger),
            "admin" => Ok(Self::Admin),
            _ => Err(unexpected_error()),
        }
    }
}

impl Member {
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

#[test]
fn role_from_column_test() {
    assert_eq!("passenger".parse::<Role>().unwrap(), Role::Passenger);
    assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);

    assert!("driver".parse::<Role>().is_err());
}
