use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use super::school_members_model::{NewSchoolMember, SchoolMember, SchoolSubscription};
use super::school_members_traits::{SchoolMemberRepositoryTrait, SchoolMemberServiceTrait};
use crate::errors::{Error, Result};
use crate::schools::SchoolServiceTrait;
use crate::users::UserServiceTrait;
use crate::utils::{Page, PagedList};

/// Service for subscribing users to schools.
pub struct SchoolMemberService {
    repository: Arc<dyn SchoolMemberRepositoryTrait>,
    user_service: Arc<dyn UserServiceTrait>,
    school_service: Arc<dyn SchoolServiceTrait>,
}

impl SchoolMemberService {
    pub fn new(
        repository: Arc<dyn SchoolMemberRepositoryTrait>,
        user_service: Arc<dyn UserServiceTrait>,
        school_service: Arc<dyn SchoolServiceTrait>,
    ) -> Self {
        Self {
            repository,
            user_service,
            school_service,
        }
    }

    async fn soft_delete(&self, member: SchoolMember) -> Result<SchoolMember> {
        let left = self
            .repository
            .soft_delete(&member.id)
            .await?
            .ok_or_else(|| Error::MemberNotFound(member.id.clone()))?;
        info!("User {} left school {}", left.user_id, left.school_id);
        Ok(left)
    }
}

#[async_trait]
impl SchoolMemberServiceTrait for SchoolMemberService {
    async fn join(&self, new_member: NewSchoolMember) -> Result<SchoolMember> {
        new_member.validate()?;

        self.user_service.get_user(&new_member.user_id)?;
        self.school_service.get_school(&new_member.school_id)?;

        if self
            .repository
            .find_active_by_user_and_school(&new_member.user_id, &new_member.school_id)?
            .is_some()
        {
            return Err(Error::AlreadyJoined {
                user_id: new_member.user_id,
                school_id: new_member.school_id,
            });
        }

        let member = self.repository.create(new_member).await?;
        info!(
            "User {} joined school {} as {}",
            member.user_id, member.school_id, member.role
        );
        Ok(member)
    }

    async fn leave(&self, school_member_id: &str) -> Result<SchoolMember> {
        let member = self
            .repository
            .find_active(school_member_id)?
            .ok_or_else(|| Error::MemberNotFound(school_member_id.to_string()))?;
        self.soft_delete(member).await
    }

    async fn leave_school(&self, school_id: &str, user_id: &str) -> Result<SchoolMember> {
        let member = self
            .repository
            .find_active_by_user_and_school(user_id, school_id)?
            .ok_or_else(|| Error::MemberNotFound(format!("{}@{}", user_id, school_id)))?;
        self.soft_delete(member).await
    }

    fn get_membership(&self, user_id: &str, school_id: &str) -> Result<SchoolMember> {
        self.repository
            .find_active_by_user_and_school(user_id, school_id)?
            .ok_or_else(|| Error::SchoolMemberNotFound {
                user_id: user_id.to_string(),
                school_id: school_id.to_string(),
            })
    }

    fn get_subscriptions(
        &self,
        user_id: &str,
        page: Page,
    ) -> Result<PagedList<SchoolSubscription>> {
        page.validate()?;
        let list = self.repository.list_subscriptions(user_id, page)?;
        let total = self.repository.count_subscriptions(user_id)?;
        debug!(
            "Loaded {} of {} subscriptions for user {}",
            list.len(),
            total,
            user_id
        );
        Ok(PagedList::new(list, total))
    }
}
