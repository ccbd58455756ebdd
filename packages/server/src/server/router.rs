//! Route table.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::ui::{
    handler::{get_room_detail, get_room_messages, get_rooms, health_check, websocket_handler},
    state::AppState,
};

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/rooms", get(get_rooms))
        .route("/api/rooms/{room}", get(get_room_detail))
        .route("/api/rooms/{room}/messages", get(get_room_messages))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
