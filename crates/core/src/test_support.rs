//! In-memory repositories shared by the service and handler tests.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::errors::{DatabaseError, Error, Result};
use crate::events::{DispatchMode, DomainEvent, DomainEventSink, EventDispatcher};
use crate::news_feed::{
    NewNewsFeed, NewsFeed, NewsFeedContentType, NewsFeedEventHandler, NewsFeedRepositoryTrait,
    NewsFeedService,
};
use crate::school_members::{
    NewSchoolMember, SchoolMember, SchoolMemberEventHandler, SchoolMemberRepositoryTrait,
    SchoolMemberService, SchoolSubscription,
};
use crate::school_news::{
    NewSchoolNews, SchoolNews, SchoolNewsListItem, SchoolNewsRepositoryTrait, SchoolNewsService,
    SchoolNewsUpdate, WriterInfo,
};
use crate::schools::{School, SchoolRegion, SchoolRepositoryTrait, SchoolService};
use crate::users::{NewUser, User, UserRepositoryTrait, UserService};
use crate::utils::Page;

/// One store backing every repository trait, so cross-table reads work.
#[derive(Default)]
pub struct InMemoryStore {
    users: Mutex<Vec<User>>,
    schools: Mutex<Vec<School>>,
    members: Mutex<Vec<SchoolMember>>,
    news: Mutex<Vec<SchoolNews>>,
    feeds: Mutex<Vec<NewsFeed>>,
    clock: AtomicI64,
    seq: AtomicI64,
    fail_feed_writes: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Strictly increasing timestamps so "newest first" is deterministic.
    fn now(&self) -> NaiveDateTime {
        let tick = self.clock.fetch_add(1, Ordering::SeqCst);
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .map(|t| t + Duration::seconds(tick))
            .unwrap()
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.seq.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Makes every feed write fail, to exercise handler error paths.
    pub fn fail_feed_writes(&self, fail: bool) {
        self.fail_feed_writes.store(fail, Ordering::SeqCst);
    }

    fn check_feed_writes(&self) -> Result<()> {
        if self.fail_feed_writes.load(Ordering::SeqCst) {
            return Err(DatabaseError::QueryFailed("feed table is locked".to_string()).into());
        }
        Ok(())
    }

    pub fn all_feeds(&self) -> Vec<NewsFeed> {
        self.feeds.lock().unwrap().clone()
    }

    pub fn all_schools(&self) -> Vec<School> {
        self.schools.lock().unwrap().clone()
    }

    pub fn all_news(&self) -> Vec<SchoolNews> {
        self.news.lock().unwrap().clone()
    }

    pub fn all_members(&self) -> Vec<SchoolMember> {
        self.members.lock().unwrap().clone()
    }

    /// Soft-deletes a news row directly, bypassing the service.
    pub fn delete_news_row(&self, school_news_id: &str) {
        let now = self.now();
        for news in self.news.lock().unwrap().iter_mut() {
            if news.id == school_news_id {
                news.deleted_at = Some(now);
            }
        }
    }

    fn is_school_active(&self, school_id: &str) -> bool {
        self.schools
            .lock()
            .unwrap()
            .iter()
            .any(|s| s.id == school_id && s.is_active())
    }

    fn is_user_active(&self, user_id: &str) -> bool {
        self.users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.id == user_id && u.is_active())
    }
}

fn paginate<T>(mut rows: Vec<T>, page: Page) -> Vec<T> {
    let offset = page.offset() as usize;
    if offset >= rows.len() {
        return Vec::new();
    }
    rows.drain(offset..)
        .take(page.limit() as usize)
        .collect()
}

#[async_trait]
impl UserRepositoryTrait for InMemoryStore {
    async fn create(&self, new_user: NewUser) -> Result<User> {
        let user = User {
            id: self.next_id("user"),
            name: new_user.name,
            role: new_user.role,
            created_at: self.now(),
            deleted_at: None,
        };
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    fn find_active(&self, user_id: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id && u.is_active())
            .cloned())
    }

    async fn soft_delete(&self, user_id: &str) -> Result<usize> {
        let now = self.now();
        let mut users = self.users.lock().unwrap();
        let mut affected = 0;
        for user in users.iter_mut().filter(|u| u.id == user_id && u.is_active()) {
            user.deleted_at = Some(now);
            affected += 1;
        }
        Ok(affected)
    }
}

#[async_trait]
impl SchoolRepositoryTrait for InMemoryStore {
    async fn create(&self, name: String, region: SchoolRegion) -> Result<School> {
        let school = School {
            id: self.next_id("school"),
            name,
            region,
            created_at: self.now(),
            deleted_at: None,
        };
        self.schools.lock().unwrap().push(school.clone());
        Ok(school)
    }

    fn find_active(&self, school_id: &str) -> Result<Option<School>> {
        Ok(self
            .schools
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == school_id && s.is_active())
            .cloned())
    }

    async fn soft_delete(&self, school_id: &str) -> Result<usize> {
        let now = self.now();
        let mut schools = self.schools.lock().unwrap();
        let mut affected = 0;
        for school in schools
            .iter_mut()
            .filter(|s| s.id == school_id && s.is_active())
        {
            school.deleted_at = Some(now);
            affected += 1;
        }
        Ok(affected)
    }
}

#[async_trait]
impl SchoolMemberRepositoryTrait for InMemoryStore {
    async fn create(&self, new_member: NewSchoolMember) -> Result<SchoolMember> {
        let mut members = self.members.lock().unwrap();
        if members.iter().any(|m| {
            m.user_id == new_member.user_id && m.school_id == new_member.school_id && m.is_active()
        }) {
            return Err(DatabaseError::UniqueViolation("school_members".to_string()).into());
        }
        let member = SchoolMember {
            id: self.next_id("member"),
            user_id: new_member.user_id,
            school_id: new_member.school_id,
            nickname: new_member.nickname,
            role: new_member.role,
            created_at: self.now(),
            deleted_at: None,
        };
        members.push(member.clone());
        Ok(member)
    }

    fn find_active(&self, school_member_id: &str) -> Result<Option<SchoolMember>> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == school_member_id && m.is_active())
            .cloned())
    }

    fn find_active_by_user_and_school(
        &self,
        user_id: &str,
        school_id: &str,
    ) -> Result<Option<SchoolMember>> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.user_id == user_id && m.school_id == school_id && m.is_active())
            .cloned())
    }

    fn list_active_user_ids_by_school(&self, school_id: &str) -> Result<Vec<String>> {
        let members = self.members.lock().unwrap().clone();
        Ok(members
            .into_iter()
            .filter(|m| m.school_id == school_id && m.is_active())
            .filter(|m| self.is_user_active(&m.user_id))
            .map(|m| m.user_id)
            .collect())
    }

    async fn soft_delete(&self, school_member_id: &str) -> Result<Option<SchoolMember>> {
        let now = self.now();
        let mut members = self.members.lock().unwrap();
        Ok(members
            .iter_mut()
            .find(|m| m.id == school_member_id && m.is_active())
            .map(|m| {
                m.deleted_at = Some(now);
                m.clone()
            }))
    }

    fn list_subscriptions(&self, user_id: &str, page: Page) -> Result<Vec<SchoolSubscription>> {
        let schools = self.schools.lock().unwrap().clone();
        let mut members: Vec<SchoolMember> = self
            .members
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.user_id == user_id && m.is_active())
            .cloned()
            .collect();
        members.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let rows = members
            .into_iter()
            .filter_map(|m| {
                schools
                    .iter()
                    .find(|s| s.id == m.school_id && s.is_active())
                    .map(|s| SchoolSubscription {
                        school_member_id: m.id,
                        school_id: s.id.clone(),
                        school_name: s.name.clone(),
                        region: s.region,
                        role: m.role,
                        nickname: m.nickname,
                        created_at: m.created_at,
                    })
            })
            .collect();
        Ok(paginate(rows, page))
    }

    fn count_subscriptions(&self, user_id: &str) -> Result<i64> {
        let members = self.members.lock().unwrap().clone();
        Ok(members
            .iter()
            .filter(|m| m.user_id == user_id && m.is_active())
            .filter(|m| self.is_school_active(&m.school_id))
            .count() as i64)
    }
}

#[async_trait]
impl SchoolNewsRepositoryTrait for InMemoryStore {
    async fn create(&self, school_member_id: &str, new_news: NewSchoolNews) -> Result<SchoolNews> {
        let now = self.now();
        let news = SchoolNews {
            id: self.next_id("news"),
            school_id: new_news.school_id,
            school_member_id: school_member_id.to_string(),
            title: new_news.title,
            content: new_news.content,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.news.lock().unwrap().push(news.clone());
        Ok(news)
    }

    fn find_active(&self, school_news_id: &str) -> Result<Option<SchoolNews>> {
        let news = self
            .news
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.id == school_news_id && n.is_active())
            .cloned();
        Ok(news.filter(|n| self.is_school_active(&n.school_id)))
    }

    async fn update(&self, update: SchoolNewsUpdate) -> Result<SchoolNews> {
        let now = self.now();
        let mut all_news = self.news.lock().unwrap();
        let news = all_news
            .iter_mut()
            .find(|n| n.id == update.school_news_id)
            .ok_or_else(|| Error::from(DatabaseError::NotFound(update.school_news_id.clone())))?;
        if let Some(title) = update.title {
            news.title = title;
        }
        if let Some(content) = update.content {
            news.content = content;
        }
        news.updated_at = now;
        Ok(news.clone())
    }

    async fn soft_delete(&self, school_news_id: &str) -> Result<usize> {
        let now = self.now();
        let mut all_news = self.news.lock().unwrap();
        let mut affected = 0;
        for news in all_news
            .iter_mut()
            .filter(|n| n.id == school_news_id && n.is_active())
        {
            news.deleted_at = Some(now);
            affected += 1;
        }
        Ok(affected)
    }

    fn list_by_school(&self, school_id: &str, page: Page) -> Result<Vec<SchoolNewsListItem>> {
        let members = self.members.lock().unwrap().clone();
        let mut news: Vec<SchoolNews> = self
            .news
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.school_id == school_id && n.is_active())
            .cloned()
            .collect();
        news.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let rows = news
            .into_iter()
            .filter_map(|n| {
                members
                    .iter()
                    .find(|m| m.id == n.school_member_id)
                    .map(|m| SchoolNewsListItem {
                        school_news_id: n.id,
                        school_id: n.school_id,
                        title: n.title,
                        content: n.content,
                        writer: WriterInfo {
                            school_member_id: m.id.clone(),
                            user_id: m.user_id.clone(),
                            nickname: m.nickname.clone(),
                            role: m.role,
                        },
                        created_at: n.created_at,
                        updated_at: n.updated_at,
                    })
            })
            .collect();
        Ok(paginate(rows, page))
    }

    fn count_by_school(&self, school_id: &str) -> Result<i64> {
        Ok(self
            .news
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.school_id == school_id && n.is_active())
            .count() as i64)
    }
}

#[async_trait]
impl NewsFeedRepositoryTrait for InMemoryStore {
    async fn insert_many(&self, rows: Vec<NewNewsFeed>) -> Result<usize> {
        self.check_feed_writes()?;
        let now = self.now();
        let mut feeds = self.feeds.lock().unwrap();
        let inserted = rows.len();
        for row in rows {
            feeds.push(NewsFeed {
                id: self.next_id("feed"),
                user_id: row.user_id,
                content_type: row.content_type,
                content_id: row.content_id,
                title: row.title,
                content: row.content,
                created_at: now,
                deleted_at: None,
            });
        }
        Ok(inserted)
    }

    async fn update_content_by_content(
        &self,
        content_type: NewsFeedContentType,
        content_id: &str,
        title: &str,
        content: &str,
    ) -> Result<usize> {
        self.check_feed_writes()?;
        let mut feeds = self.feeds.lock().unwrap();
        let mut affected = 0;
        for feed in feeds
            .iter_mut()
            .filter(|f| f.content_type == content_type && f.content_id == content_id)
        {
            feed.title = title.to_string();
            feed.content = content.to_string();
            affected += 1;
        }
        Ok(affected)
    }

    async fn soft_delete_by_content(
        &self,
        content_type: NewsFeedContentType,
        content_id: &str,
    ) -> Result<usize> {
        self.check_feed_writes()?;
        let now = self.now();
        let mut feeds = self.feeds.lock().unwrap();
        let mut affected = 0;
        for feed in feeds.iter_mut().filter(|f| {
            f.content_type == content_type && f.content_id == content_id && f.is_active()
        }) {
            feed.deleted_at = Some(now);
            affected += 1;
        }
        Ok(affected)
    }

    fn list_by_user(&self, user_id: &str, page: Page) -> Result<Vec<NewsFeed>> {
        let mut rows: Vec<NewsFeed> = self
            .feeds
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.user_id == user_id && f.is_active())
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(rows, page))
    }

    fn count_by_user(&self, user_id: &str) -> Result<i64> {
        Ok(self
            .feeds
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.user_id == user_id && f.is_active())
            .count() as i64)
    }

    fn list_by_content(
        &self,
        content_type: NewsFeedContentType,
        content_id: &str,
    ) -> Result<Vec<NewsFeed>> {
        Ok(self
            .feeds
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.content_type == content_type && f.content_id == content_id)
            .cloned()
            .collect())
    }
}

/// Sink that refuses every event, as when no runtime can take the work.
pub struct FailingDomainEventSink;

#[async_trait]
impl DomainEventSink for FailingDomainEventSink {
    async fn emit(&self, event: DomainEvent) -> Result<()> {
        Err(Error::EventPublish {
            event: event.name(),
            reason: "dispatcher unavailable".to_string(),
        })
    }
}

/// Every service wired over one store and a dispatcher in `Await` mode.
pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    pub users: Arc<UserService>,
    pub schools: Arc<SchoolService>,
    pub members: Arc<SchoolMemberService>,
    pub news: Arc<SchoolNewsService>,
    pub feed: Arc<NewsFeedService>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = InMemoryStore::new();

        let dispatcher = EventDispatcher::new(DispatchMode::Await)
            .with_handler(Arc::new(SchoolMemberEventHandler::new(store.clone())))
            .with_handler(Arc::new(NewsFeedEventHandler::new(
                store.clone(),
                store.clone(),
                store.clone(),
            )));
        let sink: Arc<dyn DomainEventSink> = Arc::new(dispatcher);

        let users = Arc::new(UserService::new(store.clone()));
        let schools = Arc::new(SchoolService::new(
            store.clone(),
            users.clone(),
            sink.clone(),
        ));
        let members = Arc::new(SchoolMemberService::new(
            store.clone(),
            users.clone(),
            schools.clone(),
        ));
        let news = Arc::new(SchoolNewsService::new(
            store.clone(),
            users.clone(),
            schools.clone(),
            members.clone(),
            sink,
        ));
        let feed = Arc::new(NewsFeedService::new(store.clone()));

        Self {
            store,
            users,
            schools,
            members,
            news,
            feed,
        }
    }
}
