use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::SqliteConnection;
use log::warn;
use uuid::Uuid;

use schoolfeed_core::errors::Error;
use schoolfeed_core::school_members::{
    NewSchoolMember, SchoolMember, SchoolMemberRepositoryTrait, SchoolSubscription,
};
use schoolfeed_core::utils::Page;
use schoolfeed_core::Result;

use super::model::{to_subscription, SchoolMemberDB};
use crate::active;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{school_members, schools, users};
use crate::schools::SchoolDB;

pub struct SchoolMemberRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl SchoolMemberRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl SchoolMemberRepositoryTrait for SchoolMemberRepository {
    async fn create(&self, new_member: NewSchoolMember) -> Result<SchoolMember> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SchoolMember> {
                let row = SchoolMemberDB {
                    id: Uuid::new_v4().to_string(),
                    user_id: new_member.user_id,
                    school_id: new_member.school_id,
                    nickname: new_member.nickname,
                    role: new_member.role.as_str().to_string(),
                    created_at: Utc::now().naive_utc(),
                    deleted_at: None,
                };
                let inserted = diesel::insert_into(school_members::table)
                    .values(&row)
                    .returning(SchoolMemberDB::as_returning())
                    .get_result(conn);

                match inserted {
                    Ok(db) => Ok(SchoolMember::try_from(db)?),
                    // The partial unique index caught a concurrent join
                    Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                        warn!(
                            "Concurrent join of user {} to school {}",
                            row.user_id, row.school_id
                        );
                        Err(Error::AlreadyJoined {
                            user_id: row.user_id,
                            school_id: row.school_id,
                        })
                    }
                    Err(e) => Err(StorageError::from(e).into()),
                }
            })
            .await
    }

    fn find_active(&self, school_member_id: &str) -> Result<Option<SchoolMember>> {
        let mut conn = get_connection(&self.pool)?;
        let row = school_members::table
            .filter(school_members::id.eq(school_member_id))
            .filter(active::school_member())
            .select(SchoolMemberDB::as_select())
            .first(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(SchoolMember::try_from).transpose()?)
    }

    fn find_active_by_user_and_school(
        &self,
        user_id: &str,
        school_id: &str,
    ) -> Result<Option<SchoolMember>> {
        let mut conn = get_connection(&self.pool)?;
        let row = school_members::table
            .filter(school_members::user_id.eq(user_id))
            .filter(school_members::school_id.eq(school_id))
            .filter(active::school_member())
            .select(SchoolMemberDB::as_select())
            .first(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(SchoolMember::try_from).transpose()?)
    }

    fn list_active_user_ids_by_school(&self, school_id: &str) -> Result<Vec<String>> {
        let mut conn = get_connection(&self.pool)?;
        let user_ids = school_members::table
            .inner_join(users::table.on(users::id.eq(school_members::user_id)))
            .filter(school_members::school_id.eq(school_id))
            .filter(active::school_member())
            .filter(active::user())
            .select(school_members::user_id)
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(user_ids)
    }

    async fn soft_delete(&self, school_member_id: &str) -> Result<Option<SchoolMember>> {
        let school_member_id = school_member_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<SchoolMember>> {
                let row = diesel::update(
                    school_members::table
                        .filter(school_members::id.eq(school_member_id))
                        .filter(active::school_member()),
                )
                .set(school_members::deleted_at.eq(Utc::now().naive_utc()))
                .returning(SchoolMemberDB::as_returning())
                .get_result(conn)
                .optional()
                .map_err(StorageError::from)?;
                Ok(row.map(SchoolMember::try_from).transpose()?)
            })
            .await
    }

    fn list_subscriptions(&self, user_id: &str, page: Page) -> Result<Vec<SchoolSubscription>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = school_members::table
            .inner_join(schools::table.on(schools::id.eq(school_members::school_id)))
            .filter(school_members::user_id.eq(user_id))
            .filter(active::school_member())
            .filter(active::school())
            .order((school_members::created_at.desc(), school_members::id.desc()))
            .limit(page.limit())
            .offset(page.offset())
            .select((SchoolMemberDB::as_select(), SchoolDB::as_select()))
            .load::<(SchoolMemberDB, SchoolDB)>(&mut conn)
            .map_err(StorageError::from)?;

        rows.into_iter()
            .map(|(member, school)| to_subscription(member, school).map_err(Error::from))
            .collect()
    }

    fn count_subscriptions(&self, user_id: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        let total = school_members::table
            .inner_join(schools::table.on(schools::id.eq(school_members::school_id)))
            .filter(school_members::user_id.eq(user_id))
            .filter(active::school_member())
            .filter(active::school())
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schools::SchoolRepository;
    use crate::test_support::setup;
    use crate::users::UserRepository;
    use schoolfeed_core::school_members::SchoolMemberRole;
    use schoolfeed_core::schools::{SchoolRegion, SchoolRepositoryTrait};
    use schoolfeed_core::users::{NewUser, UserRepositoryTrait, UserRole};

    struct Seed {
        users: UserRepository,
        schools: SchoolRepository,
        members: SchoolMemberRepository,
    }

    fn seed() -> (tempfile::TempDir, Seed) {
        let (dir, pool, writer) = setup();
        let seed = Seed {
            users: UserRepository::new(pool.clone(), writer.clone()),
            schools: SchoolRepository::new(pool.clone(), writer.clone()),
            members: SchoolMemberRepository::new(pool, writer),
        };
        (dir, seed)
    }

    async fn user(seed: &Seed, role: UserRole) -> String {
        seed.users
            .create(NewUser {
                name: "someone".to_string(),
                role,
            })
            .await
            .unwrap()
            .id
    }

    fn member(user_id: &str, school_id: &str) -> NewSchoolMember {
        NewSchoolMember {
            user_id: user_id.to_string(),
            school_id: school_id.to_string(),
            nickname: "nick".to_string(),
            role: SchoolMemberRole::Student,
        }
    }

    #[tokio::test]
    async fn test_unique_active_membership() {
        let (_dir, seed) = seed();
        let student = user(&seed, UserRole::Student).await;
        let school = seed
            .schools
            .create("Hanbit".to_string(), SchoolRegion::Seoul)
            .await
            .unwrap();

        let first = seed
            .members
            .create(member(&student, &school.id))
            .await
            .unwrap();
        let err = seed
            .members
            .create(member(&student, &school.id))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "ALREADY_JOINED");

        // Leaving frees the slot for a brand new row
        let left = seed.members.soft_delete(&first.id).await.unwrap().unwrap();
        assert!(left.deleted_at.is_some());
        assert!(seed.members.soft_delete(&first.id).await.unwrap().is_none());

        let second = seed
            .members
            .create(member(&student, &school.id))
            .await
            .unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(
            seed.members
                .find_active_by_user_and_school(&student, &school.id)
                .unwrap()
                .map(|m| m.id),
            Some(second.id)
        );
    }

    #[tokio::test]
    async fn test_unknown_user_violates_foreign_key() {
        let (_dir, seed) = seed();
        let school = seed
            .schools
            .create("Hanbit".to_string(), SchoolRegion::Seoul)
            .await
            .unwrap();

        let err = seed
            .members
            .create(member("ghost", &school.id))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INTERNAL_SERVER_ERROR");
    }

    #[tokio::test]
    async fn test_subscriber_ids_skip_left_members_and_deleted_users() {
        let (_dir, seed) = seed();
        let school = seed
            .schools
            .create("Hanbit".to_string(), SchoolRegion::Ulsan)
            .await
            .unwrap();
        let stays = user(&seed, UserRole::Student).await;
        let leaves = user(&seed, UserRole::Student).await;
        let deleted = user(&seed, UserRole::Student).await;
        for user_id in [&stays, &leaves, &deleted] {
            seed.members
                .create(member(user_id, &school.id))
                .await
                .unwrap();
        }
        let leaving = seed
            .members
            .find_active_by_user_and_school(&leaves, &school.id)
            .unwrap()
            .unwrap();
        seed.members.soft_delete(&leaving.id).await.unwrap();
        seed.users.soft_delete(&deleted).await.unwrap();

        let ids = seed
            .members
            .list_active_user_ids_by_school(&school.id)
            .unwrap();
        assert_eq!(ids, vec![stays]);
    }

    #[tokio::test]
    async fn test_subscriptions_join_active_schools() {
        let (_dir, seed) = seed();
        let student = user(&seed, UserRole::Student).await;
        let kept = seed
            .schools
            .create("Kept".to_string(), SchoolRegion::Jeju)
            .await
            .unwrap();
        let closed = seed
            .schools
            .create("Closed".to_string(), SchoolRegion::Busan)
            .await
            .unwrap();
        seed.members
            .create(member(&student, &kept.id))
            .await
            .unwrap();
        seed.members
            .create(member(&student, &closed.id))
            .await
            .unwrap();
        seed.schools.soft_delete(&closed.id).await.unwrap();

        let list = seed
            .members
            .list_subscriptions(&student, Page::default())
            .unwrap();
        assert_eq!(seed.members.count_subscriptions(&student).unwrap(), 1);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].school_name, "Kept");
        assert_eq!(list[0].region, SchoolRegion::Jeju);
        assert_eq!(list[0].role, SchoolMemberRole::Student);
    }
}
