//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use parlor_shared::time::timestamp_to_jst_rfc3339;

use crate::{domain::Message, hub::MemberInfo};

/// Room summary for list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub name: String,
    pub members: Vec<String>,
}

/// Room detail for detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub name: String,
    pub members: Vec<MemberDetailDto>,
}

/// Member detail for room detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDetailDto {
    pub client_id: String,
    pub connection_id: String,
    pub joined_at: String, // ISO 8601
}

impl From<&MemberInfo> for MemberDetailDto {
    fn from(member: &MemberInfo) -> Self {
        Self {
            client_id: member.client_id.as_str().to_string(),
            connection_id: member.connection_id.to_string(),
            joined_at: timestamp_to_jst_rfc3339(member.joined_at.value()),
        }
    }
}

/// One entry of the message history endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub name: String,
    pub message: String,
    pub when: String, // ISO 8601
}

impl From<&Message> for MessageDto {
    fn from(message: &Message) -> Self {
        Self {
            name: message.author().as_str().to_string(),
            message: message.body().as_str().to_string(),
            when: timestamp_to_jst_rfc3339(message.timestamp().value()),
        }
    }
}
