//! Ledger API 模块 (结算账本)

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/ledger", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::settle))
        .route("/{tx_id}", get(handler::get_by_tx_id))
        .route("/{tx_id}/verify", post(handler::verify))
}
