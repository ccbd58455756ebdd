//! Chat room server with broadcast functionality.
//!
//! Receives messages from clients and broadcasts them to everyone in the room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin parlor-server -- --addr 127.0.0.1:8080
//! ```

use clap::Parser;
use parlor_server::ServerConfig;
use parlor_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    // Run the server
    if let Err(e) = parlor_server::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
