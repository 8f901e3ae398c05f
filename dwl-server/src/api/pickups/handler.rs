//! Pickup API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::classify::ImageInput;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::models::{
    ClassifyRequest, PickupAssign, PickupCreate, PickupHandle, PickupReceipt, PickupRequest, PickupStatus,
};

/// Query params for listing pickups
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// `OPEN` | `ASSIGNED`; all requests when absent
    pub status: Option<String>,
}

/// GET /api/pickups - 预约列表 (新的在前)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<PickupRequest>>> {
    let status = query
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<PickupStatus>().map_err(AppError::validation))
        .transpose()?;
    let requests = state.scheduler.list_requests(status).await?;
    Ok(Json(requests))
}

/// GET /api/pickups/:id - 获取单个预约
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PickupRequest>> {
    Ok(Json(state.scheduler.find_request(id).await?))
}

/// 有照片但没有模型标签时，先跑分类器链补上 `model_material`
async fn label_from_photo(state: &ServerState, payload: &mut PickupCreate) -> AppResult<()> {
    if payload.model_material.as_deref().is_some_and(|m| !m.trim().is_empty()) {
        return Ok(());
    }
    let req = ClassifyRequest {
        photo_ref: payload.photo_ref.clone(),
        image_base64: None,
    };
    if let Some(image) = ImageInput::from_request(&req, &state.upload_dir()).await? {
        let result = state.classifier.classify(Some(&image)).await;
        tracing::debug!(label = %result.label, source = %result.source, "Pickup photo classified");
        payload.model_material = Some(result.label);
    }
    Ok(())
}

/// POST /api/pickups - 创建预约 (状态 OPEN)
pub async fn create(
    State(state): State<ServerState>,
    Json(mut payload): Json<PickupCreate>,
) -> AppResult<Json<PickupHandle>> {
    label_from_photo(&state, &mut payload).await?;
    let handle = state.scheduler.create_pickup(&payload).await?;
    Ok(Json(handle))
}

/// POST /api/pickups/:id/assign - 回收商接单 (OPEN -> ASSIGNED)
pub async fn assign(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PickupAssign>,
) -> AppResult<Json<PickupRequest>> {
    let request = state.scheduler.assign_collector(id, &payload.collector).await?;
    Ok(Json(request))
}

/// POST /api/pickups/complete - 预约 + 结算 + 奖励 (单事务)
pub async fn complete(
    State(state): State<ServerState>,
    Json(mut payload): Json<PickupCreate>,
) -> AppResult<Json<PickupReceipt>> {
    label_from_photo(&state, &mut payload).await?;
    let receipt = state.flow.complete(&payload).await?;
    Ok(Json(receipt))
}
