//! Pickup API 模块 (回收预约)

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/pickups", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/complete", post(handler::complete))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/assign", post(handler::assign))
}
