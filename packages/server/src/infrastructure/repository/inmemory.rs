//! In-memory message history.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Message, MessageSink, SinkError};

/// Default maximum number of messages kept in memory
pub const DEFAULT_HISTORY_CAPACITY: usize = 1000;

/// Bounded, append-only message history kept in memory.
///
/// Once `capacity` messages are stored further appends fail with
/// `SinkError::CapacityExceeded`; the hub logs that and keeps delivering.
pub struct InMemoryMessageStore {
    messages: Mutex<Vec<Message>>,
    capacity: usize,
}

impl InMemoryMessageStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            capacity,
        }
    }

    /// All stored messages, oldest first.
    pub async fn history(&self) -> Vec<Message> {
        self.messages.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.messages.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.messages.lock().await.is_empty()
    }
}

impl Default for InMemoryMessageStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[async_trait]
impl MessageSink for InMemoryMessageStore {
    async fn append(&self, message: &Message) -> Result<(), SinkError> {
        let mut messages = self.messages.lock().await;
        if messages.len() >= self.capacity {
            return Err(SinkError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        messages.push(message.clone());
        Ok(())
    }
}
