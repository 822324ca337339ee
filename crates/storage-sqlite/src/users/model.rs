//! Database models for users.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::errors::StorageError;
use schoolfeed_core::users::User;

/// Database model for users
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub name: String,
    pub role: String,
    pub created_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

impl TryFrom<UserDB> for User {
    type Error = StorageError;

    fn try_from(db: UserDB) -> Result<Self, Self::Error> {
        Ok(Self {
            role: db
                .role
                .parse()
                .map_err(|e: schoolfeed_core::Error| StorageError::InvalidData(e.to_string()))?,
            id: db.id,
            name: db.name,
            created_at: db.created_at,
            deleted_at: db.deleted_at,
        })
    }
}
