//! Web layer: axum handlers that drive the room core.

pub mod handler;
pub mod state;
