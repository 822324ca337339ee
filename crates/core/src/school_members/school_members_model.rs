//! School member domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::NICKNAME_MAX_LEN;
use crate::errors::{validate_length, Error, Result, ValidationError};
use crate::schools::SchoolRegion;

/// Role of a member inside one school. Independent of the user's global role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchoolMemberRole {
    Teacher,
    Student,
}

impl SchoolMemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchoolMemberRole::Teacher => "TEACHER",
            SchoolMemberRole::Student => "STUDENT",
        }
    }
}

impl fmt::Display for SchoolMemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchoolMemberRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "TEACHER" => Ok(SchoolMemberRole::Teacher),
            "STUDENT" => Ok(SchoolMemberRole::Student),
            other => Err(ValidationError::UnknownVariant {
                kind: "school member role",
                value: other.to_string(),
            }
            .into()),
        }
    }
}

/// One subscription row. Leaving sets `deleted_at`; re-joining creates a new row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchoolMember {
    pub id: String,
    pub user_id: String,
    pub school_id: String,
    pub nickname: String,
    pub role: SchoolMemberRole,
    pub created_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

impl SchoolMember {
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    pub fn is_teacher(&self) -> bool {
        self.role == SchoolMemberRole::Teacher
    }
}

/// Input model for joining a school.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSchoolMember {
    pub user_id: String,
    pub school_id: String,
    pub nickname: String,
    pub role: SchoolMemberRole,
}

impl NewSchoolMember {
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::MissingField("userId".to_string()).into());
        }
        if self.school_id.trim().is_empty() {
            return Err(ValidationError::MissingField("schoolId".to_string()).into());
        }
        validate_length("nickname", &self.nickname, 1, NICKNAME_MAX_LEN)?;
        Ok(())
    }
}

/// A user's active subscription joined with the school it points to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchoolSubscription {
    pub school_member_id: String,
    pub school_id: String,
    pub school_name: String,
    pub region: SchoolRegion,
    pub role: SchoolMemberRole,
    pub nickname: String,
    /// When the user joined
    pub created_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_member_validation() {
        let member = NewSchoolMember {
            user_id: "u1".to_string(),
            school_id: "s1".to_string(),
            nickname: "김철수".to_string(),
            role: SchoolMemberRole::Student,
        };
        assert!(member.validate().is_ok());

        let missing_school = NewSchoolMember {
            school_id: " ".to_string(),
            ..member.clone()
        };
        assert!(missing_school.validate().is_err());

        let long_nickname = NewSchoolMember {
            nickname: "n".repeat(NICKNAME_MAX_LEN + 1),
            ..member
        };
        assert!(long_nickname.validate().is_err());
    }

    #[test]
    fn test_member_role_serialization() {
        assert_eq!(
            serde_json::to_string(&SchoolMemberRole::Teacher).unwrap(),
            "\"TEACHER\""
        );
        assert_eq!(
            serde_json::from_str::<SchoolMemberRole>("\"STUDENT\"").unwrap(),
            SchoolMemberRole::Student
        );
    }
}
