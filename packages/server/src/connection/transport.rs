//! Transport boundary of a connection.
//!
//! A transport is split into a read half and a write half so the two pumps
//! can own one each and close them independently.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The peer (or our own write half) is already closed
    #[error("transport closed")]
    Closed,

    #[error("transport failure: {0}")]
    Failure(String),
}

/// Read half of a frame-oriented duplex connection.
#[async_trait]
pub trait FrameReader: Send {
    /// Wait for the next text frame.
    ///
    /// `Ok(None)` is a clean close by the peer.
    async fn recv_frame(&mut self) -> Result<Option<String>, TransportError>;
}

/// Write half of a frame-oriented duplex connection.
#[async_trait]
pub trait FrameWriter: Send {
    async fn send_frame(&mut self, frame: String) -> Result<(), TransportError>;

    /// Close the write direction. The read half stays usable.
    async fn close(&mut self) -> Result<(), TransportError>;
}
