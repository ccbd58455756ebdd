//! Hub-side representation of one connected participant.

use serde::Serialize;
use tokio::sync::mpsc;

use crate::domain::{ClientId, ConnectionId, Message, Timestamp};

/// Receiving end of a client's private outbound queue.
///
/// Read only by that client's outbound pump. `recv()` yielding `None` means
/// the hub has dropped the client.
pub type OutboundQueue = mpsc::Receiver<Message>;

/// One member of a room as the hub sees it.
///
/// The hub is the only writer of `outbound`; dropping the handle closes the
/// queue, which is the outbound pump's signal to shut its write half.
#[derive(Debug)]
pub struct ClientHandle {
    connection_id: ConnectionId,
    identity: ClientId,
    joined_at: Timestamp,
    outbound: mpsc::Sender<Message>,
}

impl ClientHandle {
    /// Create a handle with a fresh bounded outbound queue of `capacity` slots.
    ///
    /// A zero capacity is bumped to one since tokio channels need at least one slot.
    pub fn new(identity: ClientId, capacity: usize) -> (Self, OutboundQueue) {
        let (outbound, queue) = mpsc::channel(capacity.max(1));
        let handle = Self {
            connection_id: ConnectionId::generate(),
            identity,
            joined_at: Timestamp::now(),
            outbound,
        };
        (handle, queue)
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    pub fn identity(&self) -> &ClientId {
        &self.identity
    }

    pub(crate) fn outbound(&self) -> &mpsc::Sender<Message> {
        &self.outbound
    }

    pub(crate) fn info(&self) -> MemberInfo {
        MemberInfo {
            connection_id: self.connection_id,
            client_id: self.identity.clone(),
            joined_at: self.joined_at,
        }
    }
}

/// Read-only snapshot of one member, handed out by the hub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberInfo {
    pub connection_id: ConnectionId,
    pub client_id: ClientId,
    pub joined_at: Timestamp,
}
