use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;

use crate::{api::ApiJson, error::ApiResult, main_lib::AppState};
use schoolfeed_core::schools::NewSchool;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatedSchool {
    school_id: String,
}

/// Creates a school. The creating teacher is enrolled by the
/// `school.create` handler, not here.
async fn create_school(
    State(state): State<Arc<AppState>>,
    ApiJson(new_school): ApiJson<NewSchool>,
) -> ApiResult<Json<CreatedSchool>> {
    let school = state.school_service.create_school(new_school).await?;
    Ok(Json(CreatedSchool {
        school_id: school.id,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/schools", post(create_school))
}
