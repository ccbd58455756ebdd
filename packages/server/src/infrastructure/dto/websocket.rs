//! WebSocket message DTOs for the chat room.

use serde::{Deserialize, Serialize};

use parlor_shared::time::timestamp_to_jst_rfc3339;

use crate::domain::Message;

/// Message type enum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageType {
    Chat,
}

/// Frame a client sends to publish a message
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingChatMessage {
    pub message: String,
}

/// Frame the server writes for every delivered message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingChatMessage {
    pub r#type: MessageType,
    pub name: String,
    pub message: String,
    /// Unix timestamp (milliseconds since epoch)
    pub when: i64,
    pub when_rfc3339: String,
}

impl From<&Message> for OutgoingChatMessage {
    fn from(message: &Message) -> Self {
        let when = message.timestamp().value();
        Self {
            r#type: MessageType::Chat,
            name: message.author().as_str().to_string(),
            message: message.body().as_str().to_string(),
            when,
            when_rfc3339: timestamp_to_jst_rfc3339(when),
        }
    }
}

/// Extract the message body from an incoming text frame.
///
/// JSON frames of the form `{"message": "..."}` yield the inner text; any
/// other frame is taken verbatim as the body.
pub fn decode_incoming_frame(frame: &str) -> String {
    match serde_json::from_str::<IncomingChatMessage>(frame) {
        Ok(incoming) => incoming.message,
        Err(_) => frame.to_string(),
    }
}
