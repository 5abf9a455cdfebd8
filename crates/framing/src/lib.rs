use core_types::Frame;
use thiserror::Error;

pub mod lines;

pub use lines::LineFramer;

/// A run of bytes that is not valid UTF-8.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid UTF-8 sequence {bytes:02X?}")]
pub struct DecodeError {
    pub bytes: Vec<u8>,
}

/// Trait for converting a stream of bytes into discrete Frames.
pub trait Framer: Send {
    /// Ingest new bytes and return any complete frames found, in stream order.
    ///
    /// Decode failures are reported in place and do not stop framing.
    ///
    /// # Arguments
    /// * `bytes` - The new chunk of data read from transport.
    fn push(&mut self, bytes: &[u8]) -> Vec<Result<Frame, DecodeError>>;

    /// Reset internal state (e.g., clear buffers).
    fn reset(&mut self);

    /// Get the name of the framer.
    fn name(&self) -> &'static str;
}
