//! Server state shared by handlers.

use serde::Deserialize;
use std::sync::Arc;

use crate::{hub::RoomHandle, infrastructure::repository::InMemoryMessageStore};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub client_id: String,
}

/// Shared application state
pub struct AppState {
    /// Front door of the room hub
    pub room: RoomHandle,
    /// Readable history, when messages are kept in memory
    pub history: Option<Arc<InMemoryMessageStore>>,
}
