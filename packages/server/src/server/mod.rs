//! Server wiring: configuration, router, listener and shutdown.

mod config;
mod error;
mod router;
mod runner;
mod signal;

pub use config::ServerConfig;
pub use error::ServerError;
pub use router::build_router;
pub use runner::run_server;
pub use signal::shutdown_signal;
