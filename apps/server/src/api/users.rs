use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;

use crate::{api::ApiJson, error::ApiResult, main_lib::AppState};
use schoolfeed_core::users::NewUser;

#[derive(Serialize)]
struct CreatedUser {
    id: String,
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    ApiJson(new_user): ApiJson<NewUser>,
) -> ApiResult<Json<CreatedUser>> {
    let user = state.user_service.create_user(new_user).await?;
    Ok(Json(CreatedUser { id: user.id }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/users", post(create_user))
}
