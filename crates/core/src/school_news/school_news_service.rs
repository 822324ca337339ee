use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use super::school_news_model::{NewSchoolNews, SchoolNews, SchoolNewsListItem, SchoolNewsUpdate};
use super::school_news_traits::{SchoolNewsRepositoryTrait, SchoolNewsServiceTrait};
use crate::errors::{Error, Result};
use crate::events::{DomainEvent, DomainEventSink};
use crate::school_members::{SchoolMember, SchoolMemberServiceTrait};
use crate::schools::SchoolServiceTrait;
use crate::users::UserServiceTrait;
use crate::utils::{Page, PagedList};

/// Service for news posted on school pages.
///
/// Every mutation publishes its event only after the write has committed.
pub struct SchoolNewsService {
    repository: Arc<dyn SchoolNewsRepositoryTrait>,
    user_service: Arc<dyn UserServiceTrait>,
    school_service: Arc<dyn SchoolServiceTrait>,
    member_service: Arc<dyn SchoolMemberServiceTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl SchoolNewsService {
    pub fn new(
        repository: Arc<dyn SchoolNewsRepositoryTrait>,
        user_service: Arc<dyn UserServiceTrait>,
        school_service: Arc<dyn SchoolServiceTrait>,
        member_service: Arc<dyn SchoolMemberServiceTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            user_service,
            school_service,
            member_service,
            event_sink,
        }
    }

    /// The caller's membership, provided it is allowed to write news.
    fn writer_membership(&self, user_id: &str, school_id: &str) -> Result<SchoolMember> {
        let member = self.member_service.get_membership(user_id, school_id)?;
        if !member.is_teacher() {
            return Err(Error::SchoolPermissionCheck(member.id));
        }
        Ok(member)
    }

    /// Loads a mutable news item and checks the caller may change it.
    fn authorize_mutation(&self, school_news_id: &str, user_id: &str) -> Result<SchoolNews> {
        self.user_service.get_user(user_id)?;
        let news = self
            .repository
            .find_active(school_news_id)?
            .ok_or_else(|| Error::SchoolNewsNotFound(school_news_id.to_string()))?;
        self.writer_membership(user_id, &news.school_id)?;
        Ok(news)
    }
}

#[async_trait]
impl SchoolNewsServiceTrait for SchoolNewsService {
    async fn create_news(&self, new_news: NewSchoolNews) -> Result<SchoolNews> {
        new_news.validate()?;

        self.user_service.get_user(&new_news.user_id)?;
        self.school_service.get_school(&new_news.school_id)?;
        let member = self.writer_membership(&new_news.user_id, &new_news.school_id)?;

        let news = self.repository.create(&member.id, new_news).await?;
        info!("School news {} posted on school {}", news.id, news.school_id);

        self.event_sink
            .emit(DomainEvent::school_news_created(news.id.clone()))
            .await?;
        Ok(news)
    }

    async fn update_news(&self, update: SchoolNewsUpdate) -> Result<SchoolNews> {
        update.validate()?;
        self.authorize_mutation(&update.school_news_id, &update.user_id)?;

        let news = self.repository.update(update).await?;
        info!("School news {} updated", news.id);

        self.event_sink
            .emit(DomainEvent::school_news_updated(news.id.clone()))
            .await?;
        Ok(news)
    }

    async fn delete_news(&self, school_news_id: &str, user_id: &str) -> Result<()> {
        let news = self.authorize_mutation(school_news_id, user_id)?;

        let affected = self.repository.soft_delete(&news.id).await?;
        if affected == 0 {
            // Deleted concurrently after the guard ran
            return Err(Error::SchoolNewsNotFound(news.id));
        }
        info!("School news {} deleted", news.id);

        self.event_sink
            .emit(DomainEvent::school_news_deleted(news.id))
            .await?;
        Ok(())
    }

    fn get_news_list(
        &self,
        school_id: &str,
        page: Page,
    ) -> Result<PagedList<SchoolNewsListItem>> {
        page.validate()?;
        self.school_service.get_school(school_id)?;

        let list = self.repository.list_by_school(school_id, page)?;
        let total = self.repository.count_by_school(school_id)?;
        debug!("Loaded {} of {} news for school {}", list.len(), total, school_id);
        Ok(PagedList::new(list, total))
    }
}
