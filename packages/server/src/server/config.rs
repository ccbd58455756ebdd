//! Command line configuration.

use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

use crate::{
    domain::{RoomName, ValueObjectError},
    hub::{DEFAULT_OUTBOUND_CAPACITY, DEFAULT_REQUEST_CAPACITY, FanoutPolicy, RoomConfig},
    infrastructure::repository::inmemory::DEFAULT_HISTORY_CAPACITY,
};

/// Parlor chat room server
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub addr: SocketAddr,

    /// Name of the room served
    #[arg(long, default_value = "default")]
    pub room: String,

    /// Capacity of each client's outbound queue
    #[arg(long, default_value_t = DEFAULT_OUTBOUND_CAPACITY)]
    pub outbound_capacity: usize,

    /// Capacity of the hub's request queue
    #[arg(long, default_value_t = DEFAULT_REQUEST_CAPACITY)]
    pub request_capacity: usize,

    /// What to do when a client's outbound queue is full
    #[arg(long, value_enum, default_value_t = FanoutPolicy::Block)]
    pub fanout: FanoutPolicy,

    /// Maximum number of messages kept in memory
    #[arg(long, default_value_t = DEFAULT_HISTORY_CAPACITY)]
    pub history_capacity: usize,

    /// Append messages to this JSON-lines file instead of keeping them in memory
    #[arg(long)]
    pub history_file: Option<PathBuf>,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "debug")]
    pub log_level: String,
}

impl ServerConfig {
    /// Config for the given address with every other option at its default.
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            addr,
            room: "default".to_string(),
            outbound_capacity: DEFAULT_OUTBOUND_CAPACITY,
            request_capacity: DEFAULT_REQUEST_CAPACITY,
            fanout: FanoutPolicy::Block,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            history_file: None,
            log_level: "debug".to_string(),
        }
    }

    pub fn room_config(&self) -> Result<RoomConfig, ValueObjectError> {
        Ok(RoomConfig::new(RoomName::new(self.room.clone())?)
            .with_outbound_capacity(self.outbound_capacity)
            .with_request_capacity(self.request_capacity)
            .with_fanout(self.fanout))
    }
}
