//! Transport adapters implementing `FrameReader` / `FrameWriter`.

pub mod channel;
pub mod websocket;

pub use channel::{ChannelPeer, ChannelReader, ChannelWriter, channel_transport};
pub use websocket::{WebSocketReader, WebSocketWriter, split_websocket};
