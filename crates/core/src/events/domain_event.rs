//! Domain event types.

use serde::{Deserialize, Serialize};

/// Event name published after a school is created.
pub const SCHOOL_CREATE: &str = "school.create";
/// Event name published after school news is created.
pub const SCHOOL_NEWS_CREATE: &str = "school.news.create";
/// Event name published after school news is updated.
pub const SCHOOL_NEWS_UPDATE: &str = "school.news.update";
/// Event name published after school news is deleted.
pub const SCHOOL_NEWS_DELETE: &str = "school.news.delete";

/// Domain events emitted by core services after successful mutations.
///
/// Payloads carry identifiers only. Handlers re-read the entities they need
/// because the state may have changed by the time they run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "eventType")]
pub enum DomainEvent {
    /// A school page was created by a teacher.
    #[serde(rename = "school.create", rename_all = "camelCase")]
    SchoolCreated {
        user_id: String,
        school_id: String,
        /// Nickname the creator uses inside the school
        nickname: String,
    },

    /// A news item was posted on a school.
    #[serde(rename = "school.news.create", rename_all = "camelCase")]
    SchoolNewsCreated { school_news_id: String },

    /// A news item's title or content changed.
    #[serde(rename = "school.news.update", rename_all = "camelCase")]
    SchoolNewsUpdated { school_news_id: String },

    /// A news item was soft-deleted.
    #[serde(rename = "school.news.delete", rename_all = "camelCase")]
    SchoolNewsDeleted { school_news_id: String },
}

impl DomainEvent {
    /// Creates a SchoolCreated event.
    pub fn school_created(user_id: String, school_id: String, nickname: String) -> Self {
        Self::SchoolCreated {
            user_id,
            school_id,
            nickname,
        }
    }

    /// Creates a SchoolNewsCreated event.
    pub fn school_news_created(school_news_id: String) -> Self {
        Self::SchoolNewsCreated { school_news_id }
    }

    /// Creates a SchoolNewsUpdated event.
    pub fn school_news_updated(school_news_id: String) -> Self {
        Self::SchoolNewsUpdated { school_news_id }
    }

    /// Creates a SchoolNewsDeleted event.
    pub fn school_news_deleted(school_news_id: String) -> Self {
        Self::SchoolNewsDeleted { school_news_id }
    }

    /// The event name handlers subscribe to.
    pub fn name(&self) -> &'static str {
        match self {
            DomainEvent::SchoolCreated { .. } => SCHOOL_CREATE,
            DomainEvent::SchoolNewsCreated { .. } => SCHOOL_NEWS_CREATE,
            DomainEvent::SchoolNewsUpdated { .. } => SCHOOL_NEWS_UPDATE,
            DomainEvent::SchoolNewsDeleted { .. } => SCHOOL_NEWS_DELETE,
        }
    }
}
