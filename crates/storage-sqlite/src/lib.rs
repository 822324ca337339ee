//! SQLite storage implementation for SchoolFeed.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `schoolfeed-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for users, schools, memberships, news and feeds
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The core crate is database-agnostic and works with traits.
//!
//! ```text
//! core (domain, events)
//!         │
//!         ▼
//! storage-sqlite (this crate)
//!         │
//!         ▼
//!     SQLite DB
//! ```
//!
//! Reads go through the r2d2 pool. Every write is funneled through the single
//! writer actor in [`db::write_actor`].

pub mod active;
pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod news_feed;
pub mod school_members;
pub mod school_news;
pub mod schools;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export repositories
pub use news_feed::NewsFeedRepository;
pub use school_members::SchoolMemberRepository;
pub use school_news::SchoolNewsRepository;
pub use schools::SchoolRepository;
pub use users::UserRepository;

// Re-export from schoolfeed-core for convenience
pub use schoolfeed_core::errors::{DatabaseError, Error, Result};
