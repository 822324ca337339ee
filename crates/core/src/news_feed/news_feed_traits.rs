//! News feed repository and service traits.

use async_trait::async_trait;

use super::news_feed_model::{NewNewsFeed, NewsFeed, NewsFeedContentType};
use crate::errors::Result;
use crate::utils::{Page, PagedList};

/// Persistence contract for feed rows.
///
/// Only the fan-out handler writes through this trait.
#[async_trait]
pub trait NewsFeedRepositoryTrait: Send + Sync {
    /// Inserts all rows in a single transaction. Returns the number inserted.
    async fn insert_many(&self, rows: Vec<NewNewsFeed>) -> Result<usize>;

    /// Overwrites title and content of every row mirroring the content,
    /// soft-deleted rows included.
    async fn update_content_by_content(
        &self,
        content_type: NewsFeedContentType,
        content_id: &str,
        title: &str,
        content: &str,
    ) -> Result<usize>;

    /// Sets `deleted_at` on every active row mirroring the content. Rows
    /// already deleted keep their original timestamp.
    async fn soft_delete_by_content(
        &self,
        content_type: NewsFeedContentType,
        content_id: &str,
    ) -> Result<usize>;

    /// A user's active feed rows, newest first.
    fn list_by_user(&self, user_id: &str, page: Page) -> Result<Vec<NewsFeed>>;

    fn count_by_user(&self, user_id: &str) -> Result<i64>;

    /// Every row mirroring the content, soft-deleted rows included.
    fn list_by_content(
        &self,
        content_type: NewsFeedContentType,
        content_id: &str,
    ) -> Result<Vec<NewsFeed>>;
}

pub trait NewsFeedServiceTrait: Send + Sync {
    fn get_feed(&self, user_id: &str, page: Page) -> Result<PagedList<NewsFeed>>;
}
