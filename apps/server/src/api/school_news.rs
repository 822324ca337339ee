use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{
    api::{ApiJson, ApiQuery, PageQuery},
    error::ApiResult,
    main_lib::AppState,
};
use schoolfeed_core::{
    school_news::{NewSchoolNews, SchoolNewsListItem, SchoolNewsUpdate},
    utils::PagedList,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateNewsRequest {
    user_id: String,
    title: String,
    content: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateNewsRequest {
    user_id: String,
    title: Option<String>,
    content: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteNewsRequest {
    user_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewsIdResponse {
    school_news_id: String,
}

async fn create_news(
    Path(school_id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<CreateNewsRequest>,
) -> ApiResult<Json<NewsIdResponse>> {
    let news = state
        .news_service
        .create_news(NewSchoolNews {
            user_id: body.user_id,
            school_id,
            title: body.title,
            content: body.content,
        })
        .await?;
    Ok(Json(NewsIdResponse {
        school_news_id: news.id,
    }))
}

async fn get_news_list(
    Path(school_id): Path<String>,
    ApiQuery(page): ApiQuery<PageQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PagedList<SchoolNewsListItem>>> {
    let list = state.news_service.get_news_list(&school_id, page.into())?;
    Ok(Json(list))
}

async fn update_news(
    Path(school_news_id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<UpdateNewsRequest>,
) -> ApiResult<Json<NewsIdResponse>> {
    let news = state
        .news_service
        .update_news(SchoolNewsUpdate {
            school_news_id,
            user_id: body.user_id,
            title: body.title,
            content: body.content,
        })
        .await?;
    Ok(Json(NewsIdResponse {
        school_news_id: news.id,
    }))
}

async fn delete_news(
    Path(school_news_id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<DeleteNewsRequest>,
) -> ApiResult<Json<NewsIdResponse>> {
    state
        .news_service
        .delete_news(&school_news_id, &body.user_id)
        .await?;
    Ok(Json(NewsIdResponse { school_news_id }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/schools/{school_id}/news",
            post(create_news).get(get_news_list),
        )
        .route(
            "/schools/news/{school_news_id}",
            patch(update_news).delete(delete_news),
        )
}
