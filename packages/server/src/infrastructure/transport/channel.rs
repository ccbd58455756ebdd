//! In-process transport backed by tokio channels.
//!
//! Lets a room be driven without sockets: the [`ChannelPeer`] plays the
//! remote client.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::connection::{FrameReader, FrameWriter, TransportError};

pub struct ChannelReader {
    incoming: mpsc::Receiver<Result<String, TransportError>>,
}

pub struct ChannelWriter {
    outgoing: Option<mpsc::Sender<String>>,
}

/// Remote end of a channel transport.
pub struct ChannelPeer {
    to_server: Option<mpsc::Sender<Result<String, TransportError>>>,
    from_server: mpsc::Receiver<String>,
}

/// Create a connected reader/writer pair and the peer driving it.
pub fn channel_transport(capacity: usize) -> (ChannelReader, ChannelWriter, ChannelPeer) {
    let (to_server, incoming) = mpsc::channel(capacity.max(1));
    let (outgoing, from_server) = mpsc::channel(capacity.max(1));
    (
        ChannelReader { incoming },
        ChannelWriter {
            outgoing: Some(outgoing),
        },
        ChannelPeer {
            to_server: Some(to_server),
            from_server,
        },
    )
}

impl ChannelPeer {
    /// Send a text frame to the server.
    pub async fn send(&self, frame: impl Into<String>) -> Result<(), TransportError> {
        self.push(Ok(frame.into())).await
    }

    /// Make the server's next read fail.
    pub async fn fail(&self, reason: impl Into<String>) -> Result<(), TransportError> {
        self.push(Err(TransportError::Failure(reason.into()))).await
    }

    /// Close the client-to-server direction.
    pub fn hang_up(&mut self) {
        self.to_server = None;
    }

    /// Next frame written by the server; `None` once its write half is closed.
    pub async fn recv(&mut self) -> Option<String> {
        self.from_server.recv().await
    }

    /// Stop reading; further server writes fail.
    pub fn stop_reading(&mut self) {
        self.from_server.close();
    }

    async fn push(&self, frame: Result<String, TransportError>) -> Result<(), TransportError> {
        let sender = self.to_server.as_ref().ok_or(TransportError::Closed)?;
        sender.send(frame).await.map_err(|_| TransportError::Closed)
    }
}

#[async_trait]
impl FrameReader for ChannelReader {
    async fn recv_frame(&mut self) -> Result<Option<String>, TransportError> {
        self.incoming.recv().await.transpose()
    }
}

#[async_trait]
impl FrameWriter for ChannelWriter {
    async fn send_frame(&mut self, frame: String) -> Result<(), TransportError> {
        let sender = self.outgoing.as_ref().ok_or(TransportError::Closed)?;
        sender.send(frame).await.map_err(|_| TransportError::Closed)
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.outgoing = None;
        Ok(())
    }
}
