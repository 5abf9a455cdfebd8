//! Every error raised by the client ends up as a status line for the
//! observer, so the `Display` text of [`ClientError`] is the exact string
//! the user sees.

use core_types::TransportError;
use framing::DecodeError;
use thiserror::Error;

/// Unified error type for connection operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Opening the transport failed; the session goes to Failed
    #[error("Connect failed: {0}")]
    Connect(TransportError),

    /// Reading from an established session failed; the session ends
    #[error("Read failed: {0}")]
    Read(TransportError),

    /// Writing a command failed; the session stays up
    #[error("Send failed: {0}")]
    Send(TransportError),

    /// Device sent bytes that are not UTF-8; framing carries on
    #[error("Bad data from device: {0}")]
    Decode(DecodeError),

    /// State transition was rejected
    #[error("Invalid state transition: {0}")]
    InvalidTransition(String),
}

impl From<DecodeError> for ClientError {
    fn from(err: DecodeError) -> Self {
        ClientError::Decode(err)
    }
}
