//! Ledger API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::models::{LedgerEntry, SettlementInput, SettlementRequest};

/// GET /api/ledger - 账本 (新的在前)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<LedgerEntry>>> {
    Ok(Json(state.settlement.list().await?))
}

/// GET /api/ledger/:tx_id
pub async fn get_by_tx_id(
    State(state): State<ServerState>,
    Path(tx_id): Path<String>,
) -> AppResult<Json<LedgerEntry>> {
    Ok(Json(state.settlement.find(&tx_id).await?))
}

/// POST /api/ledger - 结算；未给出单价时使用回收商挂牌价
pub async fn settle(
    State(state): State<ServerState>,
    Json(payload): Json<SettlementRequest>,
) -> AppResult<Json<LedgerEntry>> {
    let price_per_kg = match payload.price_per_kg {
        Some(price) => price,
        None => {
            state
                .collectors
                .find(&payload.collector)
                .ok_or_else(|| AppError::collector_not_found(payload.collector.clone()))?
                .price_per_kg
        }
    };

    let input = SettlementInput {
        household: payload.household,
        collector: payload.collector,
        material: payload.material,
        weight: payload.weight,
        price_per_kg,
    };
    Ok(Json(state.settlement.settle(&input).await?))
}

/// POST /api/ledger/:tx_id/verify - 人工核对
pub async fn verify(
    State(state): State<ServerState>,
    Path(tx_id): Path<String>,
) -> AppResult<Json<LedgerEntry>> {
    Ok(Json(state.settlement.mark_verified(&tx_id).await?))
}
