use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use memberpoints_common::models::{ConsumptionRecord, LedgerTotals};
use crate::services::{MemberProfile, RedeemOutcome};
use super::{ApiResult, ApiState};

#[derive(Debug, Serialize)]
pub struct PointsResponse {
    pub member_id: Uuid,
    pub available_points: i64,
    pub totals: LedgerTotals,
}

#[derive(Debug, Deserialize)]
pub struct ConsumptionBody {
    pub amount: Decimal,
    pub sold_item: String,
}

#[derive(Debug, Deserialize)]
pub struct RedeemBody {
    pub points: i64,
    #[serde(default)]
    pub redeemed_item: Option<String>,
}

pub async fn points(
    State(state): State<ApiState>,
    Path(member_id): Path<Uuid>,
) -> ApiResult<Json<PointsResponse>> {
    state.member_service.get_member(member_id).await?;
    let totals = state.ledger_service.ledger_totals(member_id).await?;
    Ok(Json(PointsResponse {
        member_id,
        available_points: totals.available(),
        totals,
    }))
}

pub async fn profile(
    State(state): State<ApiState>,
    Path(member_id): Path<Uuid>,
) -> ApiResult<Json<MemberProfile>> {
    Ok(Json(state.ledger_service.profile(member_id).await?))
}

pub async fn add_consumption(
    State(state): State<ApiState>,
    Path(member_id): Path<Uuid>,
    Json(body): Json<ConsumptionBody>,
) -> ApiResult<(StatusCode, Json<ConsumptionRecord>)> {
    let rec = state
        .ledger_service
        .add_consumption(member_id, body.amount, &body.sold_item)
        .await?;
    Ok((StatusCode::CREATED, Json(rec)))
}

pub async fn redeem(
    State(state): State<ApiState>,
    Path(member_id): Path<Uuid>,
    Json(body): Json<RedeemBody>,
) -> ApiResult<(StatusCode, Json<RedeemOutcome>)> {
    let outcome = state
        .ledger_service
        .redeem(member_id, body.points, body.redeemed_item.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}
