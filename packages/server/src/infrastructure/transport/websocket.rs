//! axum WebSocket adapter.

use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};

use crate::connection::{FrameReader, FrameWriter, TransportError};

pub struct WebSocketReader(SplitStream<WebSocket>);

pub struct WebSocketWriter(SplitSink<WebSocket, Message>);

/// Split an upgraded socket into independently owned halves.
pub fn split_websocket(socket: WebSocket) -> (WebSocketReader, WebSocketWriter) {
    let (sender, receiver) = socket.split();
    (WebSocketReader(receiver), WebSocketWriter(sender))
}

#[async_trait]
impl FrameReader for WebSocketReader {
    async fn recv_frame(&mut self) -> Result<Option<String>, TransportError> {
        while let Some(msg) = self.0.next().await {
            let msg = msg.map_err(|e| TransportError::Failure(e.to_string()))?;
            match msg {
                Message::Text(text) => return Ok(Some(text.to_string())),
                Message::Binary(bytes) => match String::from_utf8(bytes.to_vec()) {
                    Ok(text) => return Ok(Some(text)),
                    Err(_) => {
                        tracing::warn!("Ignoring non UTF-8 binary frame ({} bytes)", bytes.len());
                    }
                },
                Message::Ping(_) | Message::Pong(_) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => return Ok(None),
            }
        }
        Ok(None)
    }
}

#[async_trait]
impl FrameWriter for WebSocketWriter {
    async fn send_frame(&mut self, frame: String) -> Result<(), TransportError> {
        self.0
            .send(Message::Text(frame.into()))
            .await
            .map_err(|e| TransportError::Failure(e.to_string()))
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.0
            .close()
            .await
            .map_err(|e| TransportError::Failure(e.to_string()))
    }
}
