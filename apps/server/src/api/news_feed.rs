use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::{api::{ApiQuery, PageQuery}, error::ApiResult, main_lib::AppState};
use schoolfeed_core::{news_feed::NewsFeed, utils::PagedList};

async fn get_feed(
    Path(user_id): Path<String>,
    ApiQuery(page): ApiQuery<PageQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PagedList<NewsFeed>>> {
    let feed = state.feed_service.get_feed(&user_id, page.into())?;
    Ok(Json(feed))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/users/{user_id}/news-feed", get(get_feed))
}
