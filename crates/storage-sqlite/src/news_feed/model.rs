//! Database model for news feed rows.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

use crate::errors::StorageError;
use schoolfeed_core::news_feed::{NewNewsFeed, NewsFeed};

/// Database model for news feed rows
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::news_feeds)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NewsFeedDB {
    pub id: String,
    pub user_id: String,
    pub content_type: String,
    pub content_id: String,
    pub title: String,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

impl NewsFeedDB {
    /// Number of bound parameters a row contributes to a multi-row INSERT.
    pub const COLUMNS: usize = 8;

    pub fn from_new(row: NewNewsFeed, created_at: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: row.user_id,
            content_type: row.content_type.as_str().to_string(),
            content_id: row.content_id,
            title: row.title,
            content: row.content,
            created_at,
            deleted_at: None,
        }
    }
}

impl TryFrom<NewsFeedDB> for NewsFeed {
    type Error = StorageError;

    fn try_from(db: NewsFeedDB) -> Result<Self, Self::Error> {
        Ok(Self {
            content_type: db
                .content_type
                .parse()
                .map_err(|e: schoolfeed_core::Error| StorageError::InvalidData(e.to_string()))?,
            id: db.id,
            user_id: db.user_id,
            content_id: db.content_id,
            title: db.title,
            content: db.content,
            created_at: db.created_at,
            deleted_at: db.deleted_at,
        })
    }
}
