//! School news domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::{NEWS_CONTENT_MAX_LEN, NEWS_TITLE_MAX_LEN};
use crate::errors::{validate_length, Result, ValidationError};
use crate::school_members::SchoolMemberRole;

/// A news item authored by a school member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchoolNews {
    pub id: String,
    pub school_id: String,
    /// Author membership
    pub school_member_id: String,
    pub title: String,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

impl SchoolNews {
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Input model for posting news.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSchoolNews {
    pub user_id: String,
    pub school_id: String,
    pub title: String,
    pub content: String,
}

impl NewSchoolNews {
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::MissingField("userId".to_string()).into());
        }
        validate_length("title", &self.title, 1, NEWS_TITLE_MAX_LEN)?;
        validate_length("content", &self.content, 1, NEWS_CONTENT_MAX_LEN)?;
        Ok(())
    }
}

/// Partial update of a news item. Absent fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolNewsUpdate {
    pub school_news_id: String,
    pub user_id: String,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl SchoolNewsUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::MissingField("userId".to_string()).into());
        }
        if self.title.is_none() && self.content.is_none() {
            return Err(ValidationError::InvalidInput(
                "at least one of title or content is required".to_string(),
            )
            .into());
        }
        if let Some(title) = &self.title {
            validate_length("title", title, 1, NEWS_TITLE_MAX_LEN)?;
        }
        if let Some(content) = &self.content {
            validate_length("content", content, 1, NEWS_CONTENT_MAX_LEN)?;
        }
        Ok(())
    }
}

/// Author details shown next to a news item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WriterInfo {
    pub school_member_id: String,
    pub user_id: String,
    pub nickname: String,
    pub role: SchoolMemberRole,
}

/// Row of a school's news listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchoolNewsListItem {
    pub school_news_id: String,
    pub school_id: String,
    pub title: String,
    pub content: String,
    pub writer: WriterInfo,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
