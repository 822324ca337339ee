//! School member repository and service traits.

use async_trait::async_trait;

use super::school_members_model::{NewSchoolMember, SchoolMember, SchoolSubscription};
use crate::errors::Result;
use crate::utils::{Page, PagedList};

/// Persistence contract for school memberships.
///
/// Every read filters out soft-deleted rows.
#[async_trait]
pub trait SchoolMemberRepositoryTrait: Send + Sync {
    async fn create(&self, new_member: NewSchoolMember) -> Result<SchoolMember>;

    fn find_active(&self, school_member_id: &str) -> Result<Option<SchoolMember>>;

    /// The active membership of a user in a school, if any.
    fn find_active_by_user_and_school(
        &self,
        user_id: &str,
        school_id: &str,
    ) -> Result<Option<SchoolMember>>;

    /// User ids of every active member of a school whose user is also active.
    fn list_active_user_ids_by_school(&self, school_id: &str) -> Result<Vec<String>>;

    /// Marks an active membership as left and returns it.
    ///
    /// Returns `None` when no active row matched, so concurrent leaves of the
    /// same row cannot both succeed.
    async fn soft_delete(&self, school_member_id: &str) -> Result<Option<SchoolMember>>;

    /// A user's active memberships of active schools, newest first.
    fn list_subscriptions(&self, user_id: &str, page: Page) -> Result<Vec<SchoolSubscription>>;

    fn count_subscriptions(&self, user_id: &str) -> Result<i64>;
}

#[async_trait]
pub trait SchoolMemberServiceTrait: Send + Sync {
    /// Subscribes a user to a school.
    async fn join(&self, new_member: NewSchoolMember) -> Result<SchoolMember>;

    /// Leaves by membership id.
    async fn leave(&self, school_member_id: &str) -> Result<SchoolMember>;

    /// Leaves by the (school, user) pair.
    async fn leave_school(&self, school_id: &str, user_id: &str) -> Result<SchoolMember>;

    /// Returns the active membership or `Error::SchoolMemberNotFound`.
    fn get_membership(&self, user_id: &str, school_id: &str) -> Result<SchoolMember>;

    fn get_subscriptions(&self, user_id: &str, page: Page)
        -> Result<PagedList<SchoolSubscription>>;
}
