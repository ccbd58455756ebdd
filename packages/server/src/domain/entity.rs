//! Core domain models for the chat room.

use serde::{Deserialize, Serialize};

use super::value_object::{ClientId, MessageContent, Timestamp};

/// One chat event published to a room.
///
/// Immutable once built. The inbound pump creates it, the hub persists it
/// and hands a copy to each member's outbound queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    author: ClientId,
    body: MessageContent,
    timestamp: Timestamp,
}

impl Message {
    /// Create a new message
    pub fn new(author: ClientId, body: MessageContent, timestamp: Timestamp) -> Self {
        Self {
            author,
            body,
            timestamp,
        }
    }

    /// Create a message stamped with the current time
    pub fn now(author: ClientId, body: MessageContent) -> Self {
        Self::new(author, body, Timestamp::now())
    }

    pub fn author(&self) -> &ClientId {
        &self.author
    }

    pub fn body(&self) -> &MessageContent {
        &self.body
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}
