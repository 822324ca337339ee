use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use uuid::Uuid;

use schoolfeed_core::users::{NewUser, User, UserRepositoryTrait};
use schoolfeed_core::Result;

use super::model::UserDB;
use crate::active;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::users;

pub struct UserRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let row = UserDB {
                    id: Uuid::new_v4().to_string(),
                    name: new_user.name,
                    role: new_user.role.as_str().to_string(),
                    created_at: Utc::now().naive_utc(),
                    deleted_at: None,
                };
                let inserted = diesel::insert_into(users::table)
                    .values(&row)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(User::try_from(inserted)?)
            })
            .await
    }

    fn find_active(&self, user_id: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let row = users::table
            .filter(users::id.eq(user_id))
            .filter(active::user())
            .select(UserDB::as_select())
            .first(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(User::try_from).transpose()?)
    }

    async fn soft_delete(&self, user_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::update(
                    users::table
                        .filter(users::id.eq(user_id))
                        .filter(active::user()),
                )
                .set(users::deleted_at.eq(Utc::now().naive_utc()))
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup;
    use schoolfeed_core::users::UserRole;

    #[tokio::test]
    async fn test_create_find_and_soft_delete() {
        let (_dir, pool, writer) = setup();
        let repo = UserRepository::new(pool, writer);

        let user = repo
            .create(NewUser {
                name: "Kim".to_string(),
                role: UserRole::Teacher,
            })
            .await
            .unwrap();
        assert_eq!(user.role, UserRole::Teacher);
        assert!(user.is_active());

        assert_eq!(repo.find_active(&user.id).unwrap(), Some(user.clone()));
        assert_eq!(repo.soft_delete(&user.id).await.unwrap(), 1);
        assert_eq!(repo.find_active(&user.id).unwrap(), None);
        // Already deleted
        assert_eq!(repo.soft_delete(&user.id).await.unwrap(), 0);
    }
}
