//! Classify API 模块 (垃圾照片识别)

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/classify", post(handler::classify))
}
