use std::sync::Arc;

use schoolfeed_core::{
    events::{DomainEventSink, EventDispatcher},
    news_feed::{NewsFeedEventHandler, NewsFeedService, NewsFeedServiceTrait},
    school_members::{SchoolMemberEventHandler, SchoolMemberService, SchoolMemberServiceTrait},
    school_news::{SchoolNewsService, SchoolNewsServiceTrait},
    schools::{SchoolService, SchoolServiceTrait},
    users::{UserService, UserServiceTrait},
};
use schoolfeed_storage_sqlite::{
    db::{self, write_actor},
    NewsFeedRepository, SchoolMemberRepository, SchoolNewsRepository, SchoolRepository,
    UserRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub school_service: Arc<dyn SchoolServiceTrait>,
    pub member_service: Arc<dyn SchoolMemberServiceTrait>,
    pub news_service: Arc<dyn SchoolNewsServiceTrait>,
    pub feed_service: Arc<dyn NewsFeedServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("SF_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone())?;

    let user_repo = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let school_repo = Arc::new(SchoolRepository::new(pool.clone(), writer.clone()));
    let member_repo = Arc::new(SchoolMemberRepository::new(pool.clone(), writer.clone()));
    let news_repo = Arc::new(SchoolNewsRepository::new(pool.clone(), writer.clone()));
    let feed_repo = Arc::new(NewsFeedRepository::new(pool.clone(), writer.clone()));

    // Handlers only see repositories, so the dispatcher can be complete
    // before any service that publishes through it exists.
    let dispatcher = EventDispatcher::new(config.event_dispatch)
        .with_handler(Arc::new(SchoolMemberEventHandler::new(member_repo.clone())))
        .with_handler(Arc::new(NewsFeedEventHandler::new(
            news_repo.clone(),
            member_repo.clone(),
            feed_repo.clone(),
        )));
    tracing::info!("Event dispatch mode: {}", dispatcher.mode());
    let event_sink: Arc<dyn DomainEventSink> = Arc::new(dispatcher);

    let user_service: Arc<dyn UserServiceTrait> = Arc::new(UserService::new(user_repo));
    let school_service: Arc<dyn SchoolServiceTrait> = Arc::new(SchoolService::new(
        school_repo,
        user_service.clone(),
        event_sink.clone(),
    ));
    let member_service: Arc<dyn SchoolMemberServiceTrait> = Arc::new(SchoolMemberService::new(
        member_repo,
        user_service.clone(),
        school_service.clone(),
    ));
    let news_service: Arc<dyn SchoolNewsServiceTrait> = Arc::new(SchoolNewsService::new(
        news_repo,
        user_service.clone(),
        school_service.clone(),
        member_service.clone(),
        event_sink,
    ));
    let feed_service: Arc<dyn NewsFeedServiceTrait> = Arc::new(NewsFeedService::new(feed_repo));

    Ok(Arc::new(AppState {
        user_service,
        school_service,
        member_service,
        news_service,
        feed_service,
    }))
}
