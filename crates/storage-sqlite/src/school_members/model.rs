//! Database models for school memberships.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::errors::StorageError;
use crate::schools::SchoolDB;
use schoolfeed_core::school_members::{SchoolMember, SchoolSubscription};
use schoolfeed_core::schools::School;

/// Database model for school memberships
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::school_members)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SchoolMemberDB {
    pub id: String,
    pub user_id: String,
    pub school_id: String,
    pub nickname: String,
    pub role: String,
    pub created_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

impl TryFrom<SchoolMemberDB> for SchoolMember {
    type Error = StorageError;

    fn try_from(db: SchoolMemberDB) -> Result<Self, Self::Error> {
        Ok(Self {
            role: db
                .role
                .parse()
                .map_err(|e: schoolfeed_core::Error| StorageError::InvalidData(e.to_string()))?,
            id: db.id,
            user_id: db.user_id,
            school_id: db.school_id,
            nickname: db.nickname,
            created_at: db.created_at,
            deleted_at: db.deleted_at,
        })
    }
}

/// Builds a subscription row from a membership joined with its school.
pub fn to_subscription(
    member_db: SchoolMemberDB,
    school_db: SchoolDB,
) -> Result<SchoolSubscription, StorageError> {
    let member = SchoolMember::try_from(member_db)?;
    let school = School::try_from(school_db)?;
    Ok(SchoolSubscription {
        school_member_id: member.id,
        school_id: school.id,
        school_name: school.name,
        region: school.region,
        role: member.role,
        nickname: member.nickname,
        created_at: member.created_at,
    })
}
