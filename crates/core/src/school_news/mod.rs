//! School news module - news posted by teachers on a school page.

mod school_news_model;
mod school_news_service;
mod school_news_traits;


pub use school_news_model::{
    NewSchoolNews, SchoolNews, SchoolNewsListItem, SchoolNewsUpdate, WriterInfo,
};
pub use school_news_service::SchoolNewsService;
pub use school_news_traits::{SchoolNewsRepositoryTrait, SchoolNewsServiceTrait};
