use std::future::Future;

use thiserror::Error;

use crate::DeviceTarget;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("{0}")]
    Io(String),
    #[error("{0}")]
    ConnectionFailed(String),
    #[error("Not connected")]
    NotConnected,
    #[error("Invalid device address: {0}")]
    InvalidAddress(String),
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError::Io(err.to_string())
    }
}

/// An open bidirectional byte stream to a device.
///
/// Reads and writes take `&self` so that one reader and one writer can use
/// the same transport at the same time. Serializing concurrent *writers* is
/// the caller's job.
///
/// The methods return `Send` futures so that sessions can live on a
/// multi-threaded runtime.
pub trait Transport: Send + Sync + 'static {
    /// Block until bytes arrive. `Ok(0)` means end of stream.
    fn read_chunk(
        &self,
        buf: &mut [u8],
    ) -> impl Future<Output = Result<usize, TransportError>> + Send;

    /// Write every byte of `data` or fail.
    fn write_all(&self, data: &[u8]) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Close the stream. A read pending on another task completes with `Ok(0)`.
    fn close(&self) -> impl Future<Output = ()> + Send;

    fn is_alive(&self) -> bool;
}

/// Opens transports for device targets.
///
/// `open` does not enforce a timeout; wrap it with `tokio::time::timeout`
/// when a deadline is needed.
pub trait Connector: Send + Sync + 'static {
    type Transport: Transport;

    fn open(
        &self,
        target: &DeviceTarget,
    ) -> impl Future<Output = Result<Self::Transport, TransportError>> + Send;
}
