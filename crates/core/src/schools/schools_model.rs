//! School domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::{NICKNAME_MAX_LEN, SCHOOL_NAME_MAX_LEN};
use crate::errors::{validate_length, Error, Result, ValidationError};

/// Administrative region a school belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchoolRegion {
    Seoul,
    Busan,
    Daegu,
    Incheon,
    Gwangju,
    Daejeon,
    Ulsan,
    Sejong,
    Gyeonggido,
    Gangwondo,
    Chungcheongbukdo,
    Chungcheongnamdo,
    Jeollabukdo,
    Jeollanamdo,
    Gyeongsangbukdo,
    Gyeongsangnamdo,
    Jeju,
}

impl SchoolRegion {
    pub const ALL: [SchoolRegion; 17] = [
        SchoolRegion::Seoul,
        SchoolRegion::Busan,
        SchoolRegion::Daegu,
        SchoolRegion::Incheon,
        SchoolRegion::Gwangju,
        SchoolRegion::Daejeon,
        SchoolRegion::Ulsan,
        SchoolRegion::Sejong,
        SchoolRegion::Gyeonggido,
        SchoolRegion::Gangwondo,
        SchoolRegion::Chungcheongbukdo,
        SchoolRegion::Chungcheongnamdo,
        SchoolRegion::Jeollabukdo,
        SchoolRegion::Jeollanamdo,
        SchoolRegion::Gyeongsangbukdo,
        SchoolRegion::Gyeongsangnamdo,
        SchoolRegion::Jeju,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SchoolRegion::Seoul => "SEOUL",
            SchoolRegion::Busan => "BUSAN",
            SchoolRegion::Daegu => "DAEGU",
            SchoolRegion::Incheon => "INCHEON",
            SchoolRegion::Gwangju => "GWANGJU",
            SchoolRegion::Daejeon => "DAEJEON",
            SchoolRegion::Ulsan => "ULSAN",
            SchoolRegion::Sejong => "SEJONG",
            SchoolRegion::Gyeonggido => "GYEONGGIDO",
            SchoolRegion::Gangwondo => "GANGWONDO",
            SchoolRegion::Chungcheongbukdo => "CHUNGCHEONGBUKDO",
            SchoolRegion::Chungcheongnamdo => "CHUNGCHEONGNAMDO",
            SchoolRegion::Jeollabukdo => "JEOLLABUKDO",
            SchoolRegion::Jeollanamdo => "JEOLLANAMDO",
            SchoolRegion::Gyeongsangbukdo => "GYEONGSANGBUKDO",
            SchoolRegion::Gyeongsangnamdo => "GYEONGSANGNAMDO",
            SchoolRegion::Jeju => "JEJU",
        }
    }
}

impl fmt::Display for SchoolRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchoolRegion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SchoolRegion::ALL
            .into_iter()
            .find(|region| region.as_str() == s)
            .ok_or_else(|| {
                ValidationError::UnknownVariant {
                    kind: "school region",
                    value: s.to_string(),
                }
                .into()
            })
    }
}

/// Domain model representing a school page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct School {
    pub id: String,
    pub name: String,
    pub region: SchoolRegion,
    pub created_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

impl School {
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Input model for creating a school.
///
/// `user_id` and `nickname` describe the creating teacher, who is enrolled as
/// the school's first member once the school exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSchool {
    pub user_id: String,
    pub name: String,
    pub region: SchoolRegion,
    pub nickname: String,
}

impl NewSchool {
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::MissingField("userId".to_string()).into());
        }
        validate_length("name", &self.name, 1, SCHOOL_NAME_MAX_LEN)?;
        validate_length("nickname", &self.nickname, 1, NICKNAME_MAX_LEN)?;
        Ok(())
    }
}
