//! News feed domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Kind of content a feed row mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NewsFeedContentType {
    SchoolNews,
}

impl NewsFeedContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsFeedContentType::SchoolNews => "SCHOOL_NEWS",
        }
    }
}

impl fmt::Display for NewsFeedContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NewsFeedContentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "SCHOOL_NEWS" => Ok(NewsFeedContentType::SchoolNews),
            other => Err(ValidationError::UnknownVariant {
                kind: "news feed content type",
                value: other.to_string(),
            }
            .into()),
        }
    }
}

/// A denormalized copy of one piece of content in one user's feed.
///
/// `user_id` is a plain value: feed rows outlive the membership that
/// produced them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewsFeed {
    pub id: String,
    pub user_id: String,
    pub content_type: NewsFeedContentType,
    pub content_id: String,
    pub title: String,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

impl NewsFeed {
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNewsFeed {
    pub user_id: String,
    pub content_type: NewsFeedContentType,
    pub content_id: String,
    pub title: String,
    pub content: String,
}

impl NewNewsFeed {
    /// A feed row mirroring a school news item for one subscriber.
    pub fn school_news(user_id: String, content_id: &str, title: &str, content: &str) -> Self {
        Self {
            user_id,
            content_type: NewsFeedContentType::SchoolNews,
            content_id: content_id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
        }
    }
}
