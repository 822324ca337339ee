use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use uuid::Uuid;

use schoolfeed_core::schools::{School, SchoolRegion, SchoolRepositoryTrait};
use schoolfeed_core::Result;

use super::model::SchoolDB;
use crate::active;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::schools;

pub struct SchoolRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl SchoolRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl SchoolRepositoryTrait for SchoolRepository {
    async fn create(&self, name: String, region: SchoolRegion) -> Result<School> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<School> {
                let row = SchoolDB {
                    id: Uuid::new_v4().to_string(),
                    name,
                    region: region.as_str().to_string(),
                    created_at: Utc::now().naive_utc(),
                    deleted_at: None,
                };
                let inserted = diesel::insert_into(schools::table)
                    .values(&row)
                    .returning(SchoolDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(School::try_from(inserted)?)
            })
            .await
    }

    fn find_active(&self, school_id: &str) -> Result<Option<School>> {
        let mut conn = get_connection(&self.pool)?;
        let row = schools::table
            .filter(schools::id.eq(school_id))
            .filter(active::school())
            .select(SchoolDB::as_select())
            .first(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(School::try_from).transpose()?)
    }

    async fn soft_delete(&self, school_id: &str) -> Result<usize> {
        let school_id = school_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::update(
                    schools::table
                        .filter(schools::id.eq(school_id))
                        .filter(active::school()),
                )
                .set(schools::deleted_at.eq(Utc::now().naive_utc()))
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
