//! Parlor chat room server library.
//!
//! A room is served by a single hub task that owns its membership and
//! fans out every published message. Each connected client is bridged to
//! the hub by a pair of pumps over a frame-oriented transport.

pub mod connection;
pub mod domain;
pub mod hub;
pub mod infrastructure;
pub mod server;
pub mod ui;

// Re-export entry points
pub use connection::join_room;
pub use hub::{RoomConfig, RoomHandle, spawn_room};
pub use server::{ServerConfig, run_server};
