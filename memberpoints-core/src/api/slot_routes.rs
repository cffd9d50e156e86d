use axum::Form;
use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::slot::reels::{REEL_COUNT, REEL_LENGTH};
use crate::slot::{LineWin, ReelSymbol};
use super::{ApiError, ApiResult, ApiState};

const DEFAULT_BET: i64 = 10;

/// Form body shared by both slot games.
#[derive(Debug, Default, Deserialize)]
pub struct SpinForm {
    pub user_id: Option<String>,
    pub bet: Option<String>,
}

impl SpinForm {
    pub fn parse(&self) -> ApiResult<(Uuid, i64)> {
        let user_id = self
            .user_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::bad_request("Missing user_id."))?;
        let member_id = Uuid::parse_str(user_id)
            .map_err(|_| ApiError::bad_request("Invalid user_id."))?;

        let bet = match self.bet.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            None => DEFAULT_BET,
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| ApiError::bad_request("Invalid bet value."))?,
        };
        if bet <= 0 {
            return Err(ApiError::bad_request("Bet must be a positive integer."));
        }
        Ok((member_id, bet))
    }
}

#[derive(Debug, Serialize)]
pub struct ReelSpinResponse {
    #[serde(rename = "reelSequences")]
    pub reel_sequences: [[ReelSymbol; REEL_LENGTH]; REEL_COUNT],
    pub win_amount: i64,
    pub current_points: i64,
}

#[derive(Debug, Serialize)]
pub struct GridSpinResponse {
    pub grid: Vec<Vec<&'static str>>,
    pub grid_result: String,
    pub winning_lines: Vec<LineWin>,
    pub win_points: i64,
    pub message: String,
    pub current_points: i64,
}

pub async fn reel_spin(
    State(state): State<ApiState>,
    Form(form): Form<SpinForm>,
) -> ApiResult<Json<ReelSpinResponse>> {
    let (member_id, bet) = form.parse()?;
    let result = state.slot_service.spin(member_id, bet).await.map_err(|e| match e {
        crate::Error::NotFound(_) => ApiError::not_found("User not found."),
        other => ApiError::from(other),
    })?;
    Ok(Json(ReelSpinResponse {
        reel_sequences: result.reel_sequences,
        win_amount: result.win_amount,
        current_points: result.current_points,
    }))
}

pub async fn grid_spin(
    State(state): State<ApiState>,
    Form(form): Form<SpinForm>,
) -> ApiResult<Json<GridSpinResponse>> {
    let (member_id, bet) = form.parse()?;
    let result = state.slot_service.spin_grid(member_id, bet).await.map_err(|e| match e {
        crate::Error::NotFound(_) => ApiError::not_found("User not found."),
        other => ApiError::from(other),
    })?;
    Ok(Json(GridSpinResponse {
        grid: result
            .grid
            .cells
            .iter()
            .map(|row| row.iter().map(|s| s.glyph()).collect())
            .collect(),
        grid_result: result.grid.encode_result(),
        winning_lines: result.wins,
        win_points: result.win_points,
        message: result.message,
        current_points: result.current_points,
    }))
}
