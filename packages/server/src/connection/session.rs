//! Connection setup: the single entry point the web layer uses.

use crate::{
    domain::{ClientId, ConnectionId},
    hub::{ClientHandle, HubError, RoomHandle},
};

use super::{
    pump::{InboundExit, OutboundExit, run_inbound_pump, run_outbound_pump},
    transport::{FrameReader, FrameWriter},
};

/// Issues the leave request for a connection when dropped.
///
/// Armed before the join is sent, so every exit path of [`join_room`] leaves
/// the room, including cancellation of the connection future.
struct LeaveGuard {
    room: RoomHandle,
    connection_id: ConnectionId,
}

impl Drop for LeaveGuard {
    fn drop(&mut self) {
        if self.room.leave_detached(self.connection_id).is_err() {
            tracing::debug!(
                "Room '{}' already stopped; leave for {} skipped",
                self.room.name(),
                self.connection_id
            );
        }
    }
}

/// Join `room` as `identity` and pump frames until the connection ends.
///
/// Spawns the outbound pump, runs the inbound pump on the current task, then
/// leaves the room and waits for the outbound pump to flush and close.
///
/// # Errors
///
/// Returns `HubError::Unavailable` if the hub is not running at join time.
pub async fn join_room<R, W>(
    room: &RoomHandle,
    identity: ClientId,
    mut reader: R,
    writer: W,
) -> Result<InboundExit, HubError>
where
    R: FrameReader,
    W: FrameWriter + 'static,
{
    let (client, queue) = ClientHandle::new(identity.clone(), room.outbound_capacity());
    let leave = LeaveGuard {
        room: room.clone(),
        connection_id: client.connection_id(),
    };
    room.join(client).await?;

    let outbound = tokio::spawn(run_outbound_pump(queue, writer));
    let exit = run_inbound_pump(&identity, &mut reader, room).await;

    drop(leave);
    match outbound.await {
        Ok(OutboundExit::QueueClosed) => {}
        Ok(OutboundExit::TransportError(e)) => {
            tracing::debug!("Outbound pump of '{}' ended early: {}", identity, e);
        }
        Err(e) => tracing::error!("Outbound pump of '{}' panicked: {}", identity, e),
    }

    tracing::info!("Client '{}' disconnected: {:?}", identity, exit);
    Ok(exit)
}
