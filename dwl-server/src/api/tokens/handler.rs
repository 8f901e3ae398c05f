//! Token API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{TokenAward, TokenAwardResult, TokenBalance};

/// GET /api/tokens - 全部余额 (高的在前)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<TokenBalance>>> {
    Ok(Json(state.rewards.balances().await?))
}

/// GET /api/tokens/:household - 余额；未获得过积分的住户为 0
pub async fn get_balance(
    State(state): State<ServerState>,
    Path(household): Path<String>,
) -> AppResult<Json<TokenBalance>> {
    let balance = state.rewards.balance(&household).await?;
    Ok(Json(TokenBalance { household, balance }))
}

/// POST /api/tokens/award
pub async fn award(
    State(state): State<ServerState>,
    Json(payload): Json<TokenAward>,
) -> AppResult<Json<TokenAwardResult>> {
    Ok(Json(state.rewards.award(&payload).await?))
}
