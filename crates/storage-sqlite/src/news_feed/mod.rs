//! SQLite storage implementation for news feed rows.

mod model;
mod repository;

pub use model::NewsFeedDB;
pub use repository::NewsFeedRepository;
