//! Database models for schools.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::errors::StorageError;
use schoolfeed_core::schools::School;

/// Database model for schools
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::schools)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SchoolDB {
    pub id: String,
    pub name: String,
    pub region: String,
    pub created_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

impl TryFrom<SchoolDB> for School {
    type Error = StorageError;

    fn try_from(db: SchoolDB) -> Result<Self, Self::Error> {
        Ok(Self {
            region: db
                .region
                .parse()
                .map_err(|e: schoolfeed_core::Error| StorageError::InvalidData(e.to_string()))?,
            id: db.id,
            name: db.name,
            created_at: db.created_at,
            deleted_at: db.deleted_at,
        })
    }
}
