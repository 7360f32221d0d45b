//! Error types for device streaming.

use thiserror::Error;

/// Errors from the device channel.
#[derive(Error, Debug)]
pub enum StreamError {
    /// Serial port could not be opened or configured.
    #[error("serial error: {0}")]
    Serial(#[from] serialport::Error),

    /// Read or write on the channel failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The channel was used after it was closed.
    #[error("channel is closed")]
    Closed,

    /// Invalid channel settings.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result type for streaming operations.
pub type Result<T> = std::result::Result<T, StreamError>;
