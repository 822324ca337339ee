use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{
    api::{ApiJson, ApiQuery, PageQuery},
    error::ApiResult,
    main_lib::AppState,
};
use schoolfeed_core::{
    school_members::{NewSchoolMember, SchoolMemberRole, SchoolSubscription},
    utils::{Page, PagedList},
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JoinRequest {
    user_id: String,
    nickname: String,
    role: SchoolMemberRole,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LeaveRequest {
    user_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubscriptionsQuery {
    user_id: String,
    page: Option<i64>,
    size: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MemberIdResponse {
    school_member_id: String,
}

async fn join_school(
    Path(school_id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<JoinRequest>,
) -> ApiResult<Json<MemberIdResponse>> {
    let member = state
        .member_service
        .join(NewSchoolMember {
            user_id: body.user_id,
            school_id,
            nickname: body.nickname,
            role: body.role,
        })
        .await?;
    Ok(Json(MemberIdResponse {
        school_member_id: member.id,
    }))
}

async fn leave_school(
    Path(school_id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<LeaveRequest>,
) -> ApiResult<Json<MemberIdResponse>> {
    let member = state
        .member_service
        .leave_school(&school_id, &body.user_id)
        .await?;
    Ok(Json(MemberIdResponse {
        school_member_id: member.id,
    }))
}

async fn get_subscriptions(
    ApiQuery(query): ApiQuery<SubscriptionsQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PagedList<SchoolSubscription>>> {
    let page: Page = PageQuery {
        page: query.page,
        size: query.size,
    }
    .into();
    let list = state
        .member_service
        .get_subscriptions(&query.user_id, page)?;
    Ok(Json(list))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/schools/members", get(get_subscriptions))
        .route(
            "/schools/{school_id}/members",
            post(join_school).delete(leave_school),
        )
}
