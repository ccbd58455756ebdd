//! Room configuration consumed by the hub.

use crate::domain::RoomName;

/// Default capacity of each client's outbound queue
pub const DEFAULT_OUTBOUND_CAPACITY: usize = 256;

/// Default capacity of the hub's request queue
pub const DEFAULT_REQUEST_CAPACITY: usize = 256;

/// What the hub does when a recipient's outbound queue is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FanoutPolicy {
    /// Wait for room in the queue. One slow client stalls fan-out to the
    /// rest, but nobody ever misses a message.
    #[default]
    Block,
    /// Skip the full recipient for this message and move on.
    DropWhenFull,
}

#[derive(Debug, Clone)]
pub struct RoomConfig {
    pub name: RoomName,
    pub outbound_capacity: usize,
    pub request_capacity: usize,
    pub fanout: FanoutPolicy,
}

impl RoomConfig {
    /// Config with default capacities and blocking fan-out.
    pub fn new(name: RoomName) -> Self {
        Self {
            name,
            outbound_capacity: DEFAULT_OUTBOUND_CAPACITY,
            request_capacity: DEFAULT_REQUEST_CAPACITY,
            fanout: FanoutPolicy::default(),
        }
    }

    pub fn with_outbound_capacity(mut self, capacity: usize) -> Self {
        self.outbound_capacity = capacity;
        self
    }

    pub fn with_request_capacity(mut self, capacity: usize) -> Self {
        self.request_capacity = capacity;
        self
    }

    pub fn with_fanout(mut self, fanout: FanoutPolicy) -> Self {
        self.fanout = fanout;
        self
    }
}
