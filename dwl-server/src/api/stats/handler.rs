//! Stats API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{HouseholdSummary, RequestStats};

/// GET /api/stats - 预约数量 (总数 / OPEN / ASSIGNED)
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<RequestStats>> {
    Ok(Json(state.scheduler.stats().await?))
}

/// GET /api/households/:household/summary
pub async fn household_summary(
    State(state): State<ServerState>,
    Path(household): Path<String>,
) -> AppResult<Json<HouseholdSummary>> {
    Ok(Json(state.rewards.summary(&household).await?))
}
