//! Domain layer for the chat room.
//!
//! This module contains the message model and the persistence boundary,
//! independent of transport and wire formats.

pub mod entity;
pub mod error;
pub mod repository;
pub mod value_object;

pub use entity::Message;
pub use error::{SinkError, ValueObjectError};
pub use repository::MessageSink;
pub use value_object::{ClientId, ConnectionId, MessageContent, RoomName, Timestamp};

#[cfg(test)]
pub use repository::MockMessageSink;
