//! Classify API Handler

use axum::{Json, extract::State};

use crate::classify::ImageInput;
use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{Classification, ClassifyRequest};

/// POST /api/classify - 总能返回一个标签 (远程 -> 启发式 -> 随机)
pub async fn classify(
    State(state): State<ServerState>,
    Json(payload): Json<ClassifyRequest>,
) -> AppResult<Json<Classification>> {
    let image = ImageInput::from_request(&payload, &state.upload_dir()).await?;
    let result = state.classifier.classify(image.as_ref()).await;
    tracing::debug!(label = %result.label, source = %result.source, "Image classified");
    Ok(Json(result))
}
