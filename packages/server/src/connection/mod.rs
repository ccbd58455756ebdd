//! Per-connection bridging between a transport and the room hub.
//!
//! Each connection runs an inbound pump (transport to hub) and an outbound
//! pump (hub to transport). [`join_room`] wires both up and guarantees the
//! matching leave.

mod pump;
mod session;
mod transport;

pub use pump::{InboundExit, OutboundExit, run_inbound_pump, run_outbound_pump};
pub use session::join_room;
pub use transport::{FrameReader, FrameWriter, TransportError};
