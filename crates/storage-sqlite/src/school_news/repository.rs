use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use uuid::Uuid;

use schoolfeed_core::errors::Error;
use schoolfeed_core::school_news::{
    NewSchoolNews, SchoolNews, SchoolNewsListItem, SchoolNewsRepositoryTrait, SchoolNewsUpdate,
};
use schoolfeed_core::utils::Page;
use schoolfeed_core::Result;

use super::model::{to_list_item, SchoolNewsChangesetDB, SchoolNewsDB};
use crate::active;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::school_members::SchoolMemberDB;
use crate::schema::{school_members, school_news, schools};

pub struct SchoolNewsRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl SchoolNewsRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl SchoolNewsRepositoryTrait for SchoolNewsRepository {
    async fn create(&self, school_member_id: &str, new_news: NewSchoolNews) -> Result<SchoolNews> {
        let school_member_id = school_member_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SchoolNews> {
                let now = Utc::now().naive_utc();
                let row = SchoolNewsDB {
                    id: Uuid::new_v4().to_string(),
                    school_id: new_news.school_id,
                    school_member_id,
                    title: new_news.title,
                    content: new_news.content,
                    created_at: now,
                    updated_at: now,
                    deleted_at: None,
                };
                let inserted = diesel::insert_into(school_news::table)
                    .values(&row)
                    .returning(SchoolNewsDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(SchoolNews::from(inserted))
            })
            .await
    }

    fn find_active(&self, school_news_id: &str) -> Result<Option<SchoolNews>> {
        let mut conn = get_connection(&self.pool)?;
        let row = school_news::table
            .inner_join(schools::table.on(schools::id.eq(school_news::school_id)))
            .filter(school_news::id.eq(school_news_id))
            .filter(active::school_news())
            .filter(active::school())
            .select(SchoolNewsDB::as_select())
            .first(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(SchoolNews::from))
    }

    async fn update(&self, update: SchoolNewsUpdate) -> Result<SchoolNews> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SchoolNews> {
                let changes = SchoolNewsChangesetDB {
                    title: update.title,
                    content: update.content,
                    updated_at: Utc::now().naive_utc(),
                };
                let updated = diesel::update(
                    school_news::table
                        .filter(school_news::id.eq(&update.school_news_id))
                        .filter(active::school_news()),
                )
                .set(&changes)
                .returning(SchoolNewsDB::as_returning())
                .get_result(conn)
                .optional()
                .map_err(StorageError::from)?;

                updated
                    .map(SchoolNews::from)
                    .ok_or(Error::SchoolNewsNotFound(update.school_news_id))
            })
            .await
    }

    async fn soft_delete(&self, school_news_id: &str) -> Result<usize> {
        let school_news_id = school_news_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::update(
                    school_news::table
                        .filter(school_news::id.eq(school_news_id))
                        .filter(active::school_news()),
                )
                .set(school_news::deleted_at.eq(Utc::now().naive_utc()))
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }

    fn list_by_school(&self, school_id: &str, page: Page) -> Result<Vec<SchoolNewsListItem>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = school_news::table
            .inner_join(
                school_members::table.on(school_members::id.eq(school_news::school_member_id)),
            )
            .filter(school_news::school_id.eq(school_id))
            .filter(active::school_news())
            .order((school_news::created_at.desc(), school_news::id.desc()))
            .limit(page.limit())
            .offset(page.offset())
            .select((SchoolNewsDB::as_select(), SchoolMemberDB::as_select()))
            .load::<(SchoolNewsDB, SchoolMemberDB)>(&mut conn)
            .map_err(StorageError::from)?;

        rows.into_iter()
            .map(|(news, writer)| to_list_item(news, writer).map_err(Error::from))
            .collect()
    }

    fn count_by_school(&self, school_id: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        let total = school_news::table
            .filter(school_news::school_id.eq(school_id))
            .filter(active::school_news())
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(total)
    }
}
