use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use super::schools_model::{NewSchool, School};
use super::schools_traits::{SchoolRepositoryTrait, SchoolServiceTrait};
use crate::errors::{Error, Result};
use crate::events::{DomainEvent, DomainEventSink};
use crate::users::UserServiceTrait;

/// Service for managing school pages.
pub struct SchoolService {
    repository: Arc<dyn SchoolRepositoryTrait>,
    user_service: Arc<dyn UserServiceTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl SchoolService {
    pub fn new(
        repository: Arc<dyn SchoolRepositoryTrait>,
        user_service: Arc<dyn UserServiceTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            user_service,
            event_sink,
        }
    }
}

#[async_trait]
impl SchoolServiceTrait for SchoolService {
    async fn create_school(&self, new_school: NewSchool) -> Result<School> {
        new_school.validate()?;

        let user = self.user_service.get_user(&new_school.user_id)?;
        if !user.is_teacher() {
            return Err(Error::SchoolCreateTeacherOnly);
        }

        let NewSchool {
            user_id,
            name,
            region,
            nickname,
        } = new_school;
        let school = self.repository.create(name, region).await?;
        info!("School {} created by user {}", school.id, user_id);

        // The creator's TEACHER membership is written by the school.create handler
        self.event_sink
            .emit(DomainEvent::school_created(user_id, school.id.clone(), nickname))
            .await?;
        debug!("Published school.create for {}", school.id);

        Ok(school)
    }

    fn get_school(&self, school_id: &str) -> Result<School> {
        self.repository
            .find_active(school_id)?
            .ok_or_else(|| Error::SchoolNotFound(school_id.to_string()))
    }
}
