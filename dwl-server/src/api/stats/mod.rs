//! Stats API 模块 (管理统计、住户汇总)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/stats", get(handler::stats))
        .route("/api/households/{household}/summary", get(handler::household_summary))
}
