//! SchoolFeed Core - Domain entities, services, events and traits.
//!
//! This crate contains the school subscription and news feed business logic.
//! It is database-agnostic and defines repository traits that are implemented
//! by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod events;
pub mod news_feed;
pub mod school_members;
pub mod school_news;
pub mod schools;
pub mod users;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
