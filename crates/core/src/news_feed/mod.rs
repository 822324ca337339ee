//! News feed module - per-subscriber copies of school news.

mod news_feed_event_handler;
mod news_feed_model;
mod news_feed_service;
mod news_feed_traits;


pub use news_feed_event_handler::NewsFeedEventHandler;
pub use news_feed_model::{NewNewsFeed, NewsFeed, NewsFeedContentType};
pub use news_feed_service::NewsFeedService;
pub use news_feed_traits::{NewsFeedRepositoryTrait, NewsFeedServiceTrait};
