//! MessageSink implementations.
//!
//! The hub depends on the `MessageSink` trait from the domain layer only;
//! these are the concrete stores it can be handed.

pub mod inmemory;
pub mod jsonl;

pub use inmemory::InMemoryMessageStore;
pub use jsonl::JsonLinesMessageStore;
