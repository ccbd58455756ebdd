//! Server entry point.

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::{
    domain::MessageSink,
    hub::spawn_room,
    infrastructure::repository::{InMemoryMessageStore, JsonLinesMessageStore},
    ui::state::AppState,
};

use super::{ServerConfig, ServerError, build_router, shutdown_signal};

/// Start the room hub and serve HTTP until a shutdown signal arrives.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let room_config = config.room_config()?;

    let (sink, history) = match &config.history_file {
        Some(path) => {
            let store = JsonLinesMessageStore::open(path).await?;
            tracing::info!("Persisting messages to {}", store.path().display());
            let sink: Arc<dyn MessageSink> = Arc::new(store);
            (sink, None)
        }
        None => {
            let store = Arc::new(InMemoryMessageStore::new(config.history_capacity));
            let sink: Arc<dyn MessageSink> = store.clone();
            (sink, Some(store))
        }
    };

    let room = spawn_room(room_config, sink);
    let state = Arc::new(AppState { room, history });
    let app = build_router(state);

    let listener = TcpListener::bind(config.addr).await?;
    tracing::info!("Starting web server on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
