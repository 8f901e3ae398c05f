//! Collector API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::utils::AppResult;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use shared::models::Collector;

#[derive(Debug, Deserialize)]
pub struct MatchQuery {
    #[serde(default)]
    pub material: String,
}

/// GET /api/collectors - 全部回收商
pub async fn list(State(state): State<ServerState>) -> Json<Vec<Collector>> {
    Json(state.collectors.all().to_vec())
}

/// GET /api/collectors/match?material= - 按价格升序的可接收回收商
pub async fn match_material(
    State(state): State<ServerState>,
    Query(query): Query<MatchQuery>,
) -> AppResult<Json<Vec<Collector>>> {
    validate_required_text(&query.material, "material", MAX_NAME_LEN)?;
    let matched = state
        .collectors
        .match_material(&query.material)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(matched))
}
