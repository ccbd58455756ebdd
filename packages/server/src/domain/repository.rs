//! Persistence boundary of the room.
//!
//! The hub depends on this trait only; concrete stores live in the
//! infrastructure layer.

use async_trait::async_trait;

use super::{entity::Message, error::SinkError};

/// Append-only message store written by the hub.
///
/// A failing append is logged by the hub and never blocks fan-out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Append one message to the store.
    async fn append(&self, message: &Message) -> Result<(), SinkError>;
}
