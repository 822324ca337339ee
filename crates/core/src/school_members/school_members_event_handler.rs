//! Enrolls a school's creator as its first member.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error, info};

use super::school_members_model::{NewSchoolMember, SchoolMemberRole};
use super::school_members_traits::SchoolMemberRepositoryTrait;
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventHandler, SCHOOL_CREATE};

/// Reacts to `school.create` by inserting a TEACHER membership for the creator.
///
/// The creating service already validated the user and nickname, so nothing
/// is re-checked here. Failures are logged and swallowed.
pub struct SchoolMemberEventHandler {
    repository: Arc<dyn SchoolMemberRepositoryTrait>,
}

impl SchoolMemberEventHandler {
    pub fn new(repository: Arc<dyn SchoolMemberRepositoryTrait>) -> Self {
        Self { repository }
    }

    pub async fn handle_school_create(
        &self,
        user_id: String,
        school_id: String,
        nickname: String,
    ) -> Result<()> {
        let member = self
            .repository
            .create(NewSchoolMember {
                user_id,
                school_id,
                nickname,
                role: SchoolMemberRole::Teacher,
            })
            .await?;
        info!(
            "Enrolled creator {} in school {} as member {}",
            member.user_id, member.school_id, member.id
        );
        Ok(())
    }
}

#[async_trait]
impl DomainEventHandler for SchoolMemberEventHandler {
    fn name(&self) -> &'static str {
        "SchoolMemberEventHandler"
    }

    fn subscribed_events(&self) -> &'static [&'static str] {
        &[SCHOOL_CREATE]
    }

    async fn handle(&self, event: DomainEvent) -> Result<()> {
        match event {
            DomainEvent::SchoolCreated {
                user_id,
                school_id,
                nickname,
            } => {
                if let Err(e) = self
                    .handle_school_create(user_id.clone(), school_id.clone(), nickname)
                    .await
                {
                    error!(
                        "Failed to enroll creator {} in school {}: {}",
                        user_id, school_id, e
                    );
                }
            }
            other => debug!("{} ignores '{}'", self.name(), other.name()),
        }
        Ok(())
    }
}
