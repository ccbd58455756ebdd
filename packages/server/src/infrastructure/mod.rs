//! Infrastructure layer: wire formats, message stores and transport adapters.

pub mod dto;
pub mod repository;
pub mod transport;
