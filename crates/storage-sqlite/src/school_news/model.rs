//! Database models for school news.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::errors::StorageError;
use crate::school_members::SchoolMemberDB;
use schoolfeed_core::school_members::SchoolMember;
use schoolfeed_core::school_news::{SchoolNews, SchoolNewsListItem, WriterInfo};

/// Database model for school news
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::school_news)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SchoolNewsDB {
    pub id: String,
    pub school_id: String,
    pub school_member_id: String,
    pub title: String,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

/// Partial update; `None` fields are left out of the UPDATE.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::school_news)]
pub struct SchoolNewsChangesetDB {
    pub title: Option<String>,
    pub content: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl From<SchoolNewsDB> for SchoolNews {
    fn from(db: SchoolNewsDB) -> Self {
        Self {
            id: db.id,
            school_id: db.school_id,
            school_member_id: db.school_member_id,
            title: db.title,
            content: db.content,
            created_at: db.created_at,
            updated_at: db.updated_at,
            deleted_at: db.deleted_at,
        }
    }
}

/// Builds a listing row from a news item joined with its author membership.
pub fn to_list_item(
    news_db: SchoolNewsDB,
    writer_db: SchoolMemberDB,
) -> Result<SchoolNewsListItem, StorageError> {
    let writer = SchoolMember::try_from(writer_db)?;
    Ok(SchoolNewsListItem {
        school_news_id: news_db.id,
        school_id: news_db.school_id,
        title: news_db.title,
        content: news_db.content,
        writer: WriterInfo {
            school_member_id: writer.id,
            user_id: writer.user_id,
            nickname: writer.nickname,
            role: writer.role,
        },
        created_at: news_db.created_at,
        updated_at: news_db.updated_at,
    })
}
