//! Errors that stop the server binary.

use thiserror::Error;

use crate::domain::{SinkError, ValueObjectError};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ValueObjectError),

    #[error("failed to open message store: {0}")]
    Store(#[from] SinkError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}
