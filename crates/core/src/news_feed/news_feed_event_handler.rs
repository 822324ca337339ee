//! Fan-out of school news into subscriber feeds.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error, info};

use super::news_feed_model::{NewNewsFeed, NewsFeedContentType};
use super::news_feed_traits::NewsFeedRepositoryTrait;
use crate::errors::Result;
use crate::events::{
    DomainEvent, DomainEventHandler, SCHOOL_NEWS_CREATE, SCHOOL_NEWS_DELETE, SCHOOL_NEWS_UPDATE,
};
use crate::school_members::SchoolMemberRepositoryTrait;
use crate::school_news::SchoolNewsRepositoryTrait;

/// Keeps feed rows in step with school news.
///
/// Each event re-reads current state instead of trusting the payload, since
/// the news, its school or the membership list may have changed between
/// publication and handling. Failures are logged and swallowed.
pub struct NewsFeedEventHandler {
    news_repository: Arc<dyn SchoolNewsRepositoryTrait>,
    member_repository: Arc<dyn SchoolMemberRepositoryTrait>,
    feed_repository: Arc<dyn NewsFeedRepositoryTrait>,
}

impl NewsFeedEventHandler {
    pub fn new(
        news_repository: Arc<dyn SchoolNewsRepositoryTrait>,
        member_repository: Arc<dyn SchoolMemberRepositoryTrait>,
        feed_repository: Arc<dyn NewsFeedRepositoryTrait>,
    ) -> Self {
        Self {
            news_repository,
            member_repository,
            feed_repository,
        }
    }

    /// Copies the news into the feed of every current subscriber.
    pub async fn handle_school_news_create(&self, school_news_id: &str) -> Result<usize> {
        let Some(news) = self.news_repository.find_active(school_news_id)? else {
            debug!(
                "School news {} or its school is gone, skipping feed fan-out",
                school_news_id
            );
            return Ok(0);
        };

        let subscribers = self
            .member_repository
            .list_active_user_ids_by_school(&news.school_id)?;
        if subscribers.is_empty() {
            debug!("School {} has no subscribers", news.school_id);
            return Ok(0);
        }

        let rows = subscribers
            .into_iter()
            .map(|user_id| NewNewsFeed::school_news(user_id, &news.id, &news.title, &news.content))
            .collect();
        let inserted = self.feed_repository.insert_many(rows).await?;
        info!("Fanned out school news {} to {} feeds", news.id, inserted);
        Ok(inserted)
    }

    /// Rewrites every feed copy of the news, whoever it belongs to now.
    pub async fn handle_school_news_update(&self, school_news_id: &str) -> Result<usize> {
        let Some(news) = self.news_repository.find_active(school_news_id)? else {
            debug!(
                "School news {} or its school is gone, skipping feed update",
                school_news_id
            );
            return Ok(0);
        };

        let updated = self
            .feed_repository
            .update_content_by_content(
                NewsFeedContentType::SchoolNews,
                &news.id,
                &news.title,
                &news.content,
            )
            .await?;
        info!("Updated {} feed rows for school news {}", updated, news.id);
        Ok(updated)
    }

    /// Removes the news from every feed. No existence check.
    pub async fn handle_school_news_delete(&self, school_news_id: &str) -> Result<usize> {
        let deleted = self
            .feed_repository
            .soft_delete_by_content(NewsFeedContentType::SchoolNews, school_news_id)
            .await?;
        info!(
            "Removed school news {} from {} feeds",
            school_news_id, deleted
        );
        Ok(deleted)
    }
}

#[async_trait]
impl DomainEventHandler for NewsFeedEventHandler {
    fn name(&self) -> &'static str {
        "NewsFeedEventHandler"
    }

    fn subscribed_events(&self) -> &'static [&'static str] {
        &[SCHOOL_NEWS_CREATE, SCHOOL_NEWS_UPDATE, SCHOOL_NEWS_DELETE]
    }

    async fn handle(&self, event: DomainEvent) -> Result<()> {
        let event_name = event.name();
        let (school_news_id, result) = match event {
            DomainEvent::SchoolNewsCreated { school_news_id } => {
                let result = self.handle_school_news_create(&school_news_id).await;
                (school_news_id, result)
            }
            DomainEvent::SchoolNewsUpdated { school_news_id } => {
                let result = self.handle_school_news_update(&school_news_id).await;
                (school_news_id, result)
            }
            DomainEvent::SchoolNewsDeleted { school_news_id } => {
                let result = self.handle_school_news_delete(&school_news_id).await;
                (school_news_id, result)
            }
            other => {
                debug!("{} ignores '{}'", self.name(), other.name());
                return Ok(());
            }
        };

        if let Err(e) = result {
            error!(
                "Feed fan-out for '{}' failed, schoolNewsId: {}: {}",
                event_name, school_news_id, e
            );
        }
        Ok(())
    }
}
