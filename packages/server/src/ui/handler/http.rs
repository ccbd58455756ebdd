//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    hub::MemberInfo,
    infrastructure::dto::http::{MemberDetailDto, MessageDto, RoomDetailDto, RoomSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of rooms
pub async fn get_rooms(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RoomSummaryDto>>, StatusCode> {
    let members = current_members(&state).await?;

    let room_summary = RoomSummaryDto {
        name: state.room.name().to_string(),
        members: members
            .iter()
            .map(|m| m.client_id.as_str().to_string())
            .collect(),
    };

    Ok(Json(vec![room_summary]))
}

/// Get room detail by name
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    ensure_room(&state, &room)?;
    let members = current_members(&state).await?;

    Ok(Json(RoomDetailDto {
        name: room,
        members: members.iter().map(MemberDetailDto::from).collect(),
    }))
}

/// Get persisted message history of a room, oldest first
pub async fn get_room_messages(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> Result<Json<Vec<MessageDto>>, StatusCode> {
    ensure_room(&state, &room)?;

    let messages = match &state.history {
        Some(store) => store.history().await.iter().map(MessageDto::from).collect(),
        None => Vec::new(),
    };
    Ok(Json(messages))
}

fn ensure_room(state: &AppState, room: &str) -> Result<(), StatusCode> {
    if state.room.name().as_str() != room {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(())
}

async fn current_members(state: &AppState) -> Result<Vec<MemberInfo>, StatusCode> {
    state.room.members().await.map_err(|e| {
        tracing::error!("Failed to read members: {}", e);
        StatusCode::SERVICE_UNAVAILABLE
    })
}
