use std::sync::Arc;

use super::news_feed_model::NewsFeed;
use super::news_feed_traits::{NewsFeedRepositoryTrait, NewsFeedServiceTrait};
use crate::errors::Result;
use crate::utils::{Page, PagedList};

/// Read side of the news feed.
pub struct NewsFeedService {
    repository: Arc<dyn NewsFeedRepositoryTrait>,
}

impl NewsFeedService {
    pub fn new(repository: Arc<dyn NewsFeedRepositoryTrait>) -> Self {
        Self { repository }
    }
}

impl NewsFeedServiceTrait for NewsFeedService {
    fn get_feed(&self, user_id: &str, page: Page) -> Result<PagedList<NewsFeed>> {
        page.validate()?;
        let list = self.repository.list_by_user(user_id, page)?;
        let total = self.repository.count_by_user(user_id)?;
        Ok(PagedList::new(list, total))
    }
}
