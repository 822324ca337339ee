//! School news repository and service traits.

use async_trait::async_trait;

use super::school_news_model::{NewSchoolNews, SchoolNews, SchoolNewsListItem, SchoolNewsUpdate};
use crate::errors::Result;
use crate::utils::{Page, PagedList};

/// Persistence contract for school news.
#[async_trait]
pub trait SchoolNewsRepositoryTrait: Send + Sync {
    /// Inserts a news item authored by `school_member_id`.
    async fn create(&self, school_member_id: &str, new_news: NewSchoolNews) -> Result<SchoolNews>;

    /// Finds a news item only when both it and its school are active.
    fn find_active(&self, school_news_id: &str) -> Result<Option<SchoolNews>>;

    /// Applies the present fields and bumps `updated_at`.
    async fn update(&self, update: SchoolNewsUpdate) -> Result<SchoolNews>;

    /// Soft-deletes a news item. Returns the number of rows affected.
    async fn soft_delete(&self, school_news_id: &str) -> Result<usize>;

    /// Active news of a school with author details, newest first.
    fn list_by_school(&self, school_id: &str, page: Page) -> Result<Vec<SchoolNewsListItem>>;

    fn count_by_school(&self, school_id: &str) -> Result<i64>;
}

#[async_trait]
pub trait SchoolNewsServiceTrait: Send + Sync {
    /// Posts news and publishes `school.news.create`.
    async fn create_news(&self, new_news: NewSchoolNews) -> Result<SchoolNews>;

    /// Edits news and publishes `school.news.update`.
    async fn update_news(&self, update: SchoolNewsUpdate) -> Result<SchoolNews>;

    /// Deletes news and publishes `school.news.delete`.
    async fn delete_news(&self, school_news_id: &str, user_id: &str) -> Result<()>;

    fn get_news_list(&self, school_id: &str, page: Page) -> Result<PagedList<SchoolNewsListItem>>;
}
