use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use log::debug;

use schoolfeed_core::errors::Error;
use schoolfeed_core::news_feed::{
    NewNewsFeed, NewsFeed, NewsFeedContentType, NewsFeedRepositoryTrait,
};
use schoolfeed_core::utils::Page;
use schoolfeed_core::Result;

use super::model::NewsFeedDB;
use crate::active;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::news_feeds;
use crate::utils::chunk_rows_for_insert;

pub struct NewsFeedRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl NewsFeedRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

fn into_domain(rows: Vec<NewsFeedDB>) -> Result<Vec<NewsFeed>> {
    rows.into_iter()
        .map(|row| NewsFeed::try_from(row).map_err(Error::from))
        .collect()
}

#[async_trait]
impl NewsFeedRepositoryTrait for NewsFeedRepository {
    async fn insert_many(&self, rows: Vec<NewNewsFeed>) -> Result<usize> {
        if rows.is_empty() {
            return Ok(0);
        }

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let now = Utc::now().naive_utc();
                let rows: Vec<NewsFeedDB> = rows
                    .into_iter()
                    .map(|row| NewsFeedDB::from_new(row, now))
                    .collect();

                let mut inserted = 0;
                for chunk in chunk_rows_for_insert(&rows, NewsFeedDB::COLUMNS) {
                    inserted += diesel::insert_into(news_feeds::table)
                        .values(chunk)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                debug!("Inserted {} news feed rows", inserted);
                Ok(inserted)
            })
            .await
    }

    async fn update_content_by_content(
        &self,
        content_type: NewsFeedContentType,
        content_id: &str,
        title: &str,
        content: &str,
    ) -> Result<usize> {
        let content_id = content_id.to_string();
        let title = title.to_string();
        let content = content.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::update(
                    news_feeds::table
                        .filter(news_feeds::content_type.eq(content_type.as_str()))
                        .filter(news_feeds::content_id.eq(content_id)),
                )
                .set((news_feeds::title.eq(title), news_feeds::content.eq(content)))
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }

    async fn soft_delete_by_content(
        &self,
        content_type: NewsFeedContentType,
        content_id: &str,
    ) -> Result<usize> {
        let content_id = content_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::update(
                    news_feeds::table
                        .filter(news_feeds::content_type.eq(content_type.as_str()))
                        .filter(news_feeds::content_id.eq(content_id))
                        .filter(active::news_feed()),
                )
                .set(news_feeds::deleted_at.eq(Utc::now().naive_utc()))
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }

    fn list_by_user(&self, user_id: &str, page: Page) -> Result<Vec<NewsFeed>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = news_feeds::table
            .filter(news_feeds::user_id.eq(user_id))
            .filter(active::news_feed())
            .order((news_feeds::created_at.desc(), news_feeds::id.desc()))
            .limit(page.limit())
            .offset(page.offset())
            .select(NewsFeedDB::as_select())
            .load::<NewsFeedDB>(&mut conn)
            .map_err(StorageError::from)?;
        into_domain(rows)
    }

    fn count_by_user(&self, user_id: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        let total = news_feeds::table
            .filter(news_feeds::user_id.eq(user_id))
            .filter(active::news_feed())
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(total)
    }

    fn list_by_content(
        &self,
        content_type: NewsFeedContentType,
        content_id: &str,
    ) -> Result<Vec<NewsFeed>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = news_feeds::table
            .filter(news_feeds::content_type.eq(content_type.as_str()))
            .filter(news_feeds::content_id.eq(content_id))
            .order(news_feeds::user_id.asc())
            .select(NewsFeedDB::as_select())
            .load::<NewsFeedDB>(&mut conn)
            .map_err(StorageError::from)?;
        into_domain(rows)
    }
}
