//! Cloneable front door to a running hub.

use thiserror::Error;
use tokio::sync::{
    mpsc::{self, error::TrySendError},
    oneshot,
};

use super::{
    client::{ClientHandle, MemberInfo},
    HubRequest,
};
use crate::domain::{ConnectionId, Message, RoomName};

/// The hub task has stopped and its queue is closed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HubError {
    #[error("room hub '{0}' is not running")]
    Unavailable(String),
}

/// Sending side of a room's request queue.
///
/// Every request kind shares one bounded FIFO queue, so the hub sees them in
/// the order they were sent and a flooding client is slowed down instead of
/// growing memory.
#[derive(Debug, Clone)]
pub struct RoomHandle {
    name: RoomName,
    outbound_capacity: usize,
    requests: mpsc::Sender<HubRequest>,
}

impl RoomHandle {
    pub(super) fn new(
        name: RoomName,
        outbound_capacity: usize,
        requests: mpsc::Sender<HubRequest>,
    ) -> Self {
        Self {
            name,
            outbound_capacity,
            requests,
        }
    }

    pub fn name(&self) -> &RoomName {
        &self.name
    }

    /// Capacity new clients should use for their outbound queue.
    pub fn outbound_capacity(&self) -> usize {
        self.outbound_capacity
    }

    pub async fn join(&self, client: ClientHandle) -> Result<(), HubError> {
        self.send(HubRequest::Join(client)).await
    }

    /// Ask the hub to drop a connection. Leaving twice is harmless.
    pub async fn leave(&self, connection_id: ConnectionId) -> Result<(), HubError> {
        self.send(HubRequest::Leave(connection_id)).await
    }

    /// Queue a leave without waiting, for callers that cannot await.
    ///
    /// When the queue is full the leave is sent from a spawned task, so it
    /// still lands behind every request already queued.
    pub fn leave_detached(&self, connection_id: ConnectionId) -> Result<(), HubError> {
        match self.requests.try_send(HubRequest::Leave(connection_id)) {
            Ok(()) => Ok(()),
            Err(TrySendError::Closed(_)) => Err(self.unavailable()),
            Err(TrySendError::Full(request)) => {
                let Ok(runtime) = tokio::runtime::Handle::try_current() else {
                    return Err(self.unavailable());
                };
                let requests = self.requests.clone();
                let name = self.name.clone();
                runtime.spawn(async move {
                    if requests.send(request).await.is_err() {
                        tracing::debug!(
                            "Room '{}' stopped before leave for {} was queued",
                            name,
                            connection_id
                        );
                    }
                });
                Ok(())
            }
        }
    }

    /// Queue a message for fan-out, waiting while the queue is full.
    pub async fn publish(&self, message: Message) -> Result<(), HubError> {
        self.send(HubRequest::Publish(message)).await
    }

    /// Current members, in join order.
    pub async fn members(&self) -> Result<Vec<MemberInfo>, HubError> {
        let (reply, response) = oneshot::channel();
        self.send(HubRequest::Members(reply)).await?;
        response.await.map_err(|_| self.unavailable())
    }

    async fn send(&self, request: HubRequest) -> Result<(), HubError> {
        self.requests
            .send(request)
            .await
            .map_err(|_| self.unavailable())
    }

    fn unavailable(&self) -> HubError {
        HubError::Unavailable(self.name.to_string())
    }
}
