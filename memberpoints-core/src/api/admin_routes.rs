use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use memberpoints_common::models::{Member, SyncLog, SyncStatus};
use crate::Error;
use crate::services::{MemberUpdate, NewMember};
use super::{ApiResult, ApiState};

#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub status: SyncStatus,
    pub inserted: usize,
    pub skipped: usize,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct LogQuery {
    pub limit: Option<i64>,
}

pub async fn list_members(State(state): State<ApiState>) -> ApiResult<Json<Vec<Member>>> {
    Ok(Json(state.member_service.list_members().await?))
}

pub async fn get_member(
    State(state): State<ApiState>,
    Path(member_id): Path<Uuid>,
) -> ApiResult<Json<Member>> {
    Ok(Json(state.member_service.get_member(member_id).await?))
}

pub async fn create_member(
    State(state): State<ApiState>,
    Json(body): Json<NewMember>,
) -> ApiResult<(StatusCode, Json<Member>)> {
    let member = state.member_service.create_member(body).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

pub async fn update_member(
    State(state): State<ApiState>,
    Path(member_id): Path<Uuid>,
    Json(body): Json<MemberUpdate>,
) -> ApiResult<Json<Member>> {
    Ok(Json(state.member_service.update_member(member_id, body).await?))
}

pub async fn delete_member(
    State(state): State<ApiState>,
    Path(member_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.member_service.delete_member(member_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn sync_sheets(State(state): State<ApiState>) -> ApiResult<Json<SyncResponse>> {
    let source = state
        .sheet_source
        .clone()
        .ok_or_else(|| Error::SyncDisabled("no spreadsheet credentials configured".into()))?;
    let report = state.sync_service.sync(source.as_ref()).await;
    Ok(Json(SyncResponse {
        status: report.status,
        inserted: report.inserted,
        skipped: report.skipped,
        message: report.message(),
    }))
}

pub async fn sync_logs(
    State(state): State<ApiState>,
    Query(query): Query<LogQuery>,
) -> ApiResult<Json<Vec<SyncLog>>> {
    let limit = query.limit.unwrap_or(20).clamp(1, 200);
    Ok(Json(state.sync_service.recent_logs(limit).await?))
}
