//! The two per-connection pumps.

use crate::{
    domain::{ClientId, Message, MessageContent},
    hub::{OutboundQueue, RoomHandle},
    infrastructure::dto::websocket::{OutgoingChatMessage, decode_incoming_frame},
};

use super::transport::{FrameReader, FrameWriter, TransportError};

/// Why the inbound pump stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundExit {
    /// Peer closed the connection
    Closed,
    /// Reading failed
    TransportError(TransportError),
    /// The hub no longer accepts publishes
    HubUnavailable,
}

/// Why the outbound pump stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundExit {
    /// The hub closed the queue; the write half has been closed
    QueueClosed,
    /// Writing failed; the connection is considered dead
    TransportError(TransportError),
}

/// Read frames from `reader` and publish them to `room` as `identity`.
///
/// Invalid bodies (empty, too long) are logged and skipped; the connection
/// stays up. Returns on the first transport error, on close, or when the hub
/// is gone. The caller is responsible for leaving the room afterwards.
pub async fn run_inbound_pump<R>(
    identity: &ClientId,
    reader: &mut R,
    room: &RoomHandle,
) -> InboundExit
where
    R: FrameReader + ?Sized,
{
    loop {
        let frame = match reader.recv_frame().await {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                tracing::info!("Client '{}' closed the connection", identity);
                return InboundExit::Closed;
            }
            Err(e) => {
                tracing::error!("Failed to read from '{}': {}", identity, e);
                return InboundExit::TransportError(e);
            }
        };
        tracing::debug!("Received frame from '{}': {}", identity, frame);

        let body = match MessageContent::new(decode_incoming_frame(&frame)) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Rejected message from '{}': {}", identity, e);
                continue;
            }
        };

        if let Err(e) = room.publish(Message::now(identity.clone(), body)).await {
            tracing::error!("Failed to publish message from '{}': {}", identity, e);
            return InboundExit::HubUnavailable;
        }
    }
}

/// Drain `queue` into `writer` until the hub closes the queue or a write fails.
pub async fn run_outbound_pump<W>(mut queue: OutboundQueue, mut writer: W) -> OutboundExit
where
    W: FrameWriter,
{
    while let Some(message) = queue.recv().await {
        let frame = match serde_json::to_string(&OutgoingChatMessage::from(&message)) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!("Failed to encode message from '{}': {}", message.author(), e);
                continue;
            }
        };

        if let Err(e) = writer.send_frame(frame).await {
            tracing::warn!("Failed to write message to client: {}", e);
            return OutboundExit::TransportError(e);
        }
    }

    if let Err(e) = writer.close().await {
        tracing::debug!("Closing write half failed: {}", e);
    }
    OutboundExit::QueueClosed
}
