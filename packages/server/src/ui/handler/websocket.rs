//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    connection::join_room,
    domain::ClientId,
    infrastructure::transport::split_websocket,
    ui::state::{AppState, ConnectQuery},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let client_id = match ClientId::try_from(query.client_id) {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Invalid client_id: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, client_id)))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, client_id: ClientId) {
    let (reader, writer) = split_websocket(socket);
    tracing::info!(
        "Client '{}' connected to room '{}'",
        client_id,
        state.room.name()
    );

    if let Err(e) = join_room(&state.room, client_id.clone(), reader, writer).await {
        tracing::error!("Client '{}' could not join: {}", client_id, e);
    }
}
