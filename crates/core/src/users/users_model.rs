//! User domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::USER_NAME_MAX_LEN;
use crate::errors::{validate_length, Error, Result, ValidationError};

/// Global role of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Teacher,
    Student,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Teacher => "TEACHER",
            UserRole::Student => "STUDENT",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "TEACHER" => Ok(UserRole::Teacher),
            "STUDENT" => Ok(UserRole::Student),
            other => Err(ValidationError::UnknownVariant {
                kind: "user role",
                value: other.to_string(),
            }
            .into()),
        }
    }
}

/// Domain model representing a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: UserRole,
    pub created_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    pub fn is_teacher(&self) -> bool {
        self.role == UserRole::Teacher
    }
}

/// Input model for creating a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub role: UserRole,
}

impl NewUser {
    pub fn validate(&self) -> Result<()> {
        validate_length("name", &self.name, 1, USER_NAME_MAX_LEN)?;
        Ok(())
    }
}
