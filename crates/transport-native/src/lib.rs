//! # Native Transport
//!
//! Opens device connections on desktop targets:
//! - TCP sockets, for serial-to-network bridges and simulators
//! - serial device nodes, including Bluetooth RFCOMM channels bound with
//!   `rfcomm bind` (`/dev/rfcommN`)
//!
//! Pairing and discovery happen outside this crate; it only needs an
//! address it can open.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::todo
)]

pub mod endpoint;
pub mod stream;

pub use endpoint::Endpoint;
pub use stream::StreamTransport;

use core_types::{Connector, DeviceTarget, TransportError};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;

pub type BoxedReader = Box<dyn AsyncRead + Send + Unpin>;
pub type BoxedWriter = Box<dyn AsyncWrite + Send + Unpin>;
pub type NativeTransport = StreamTransport<BoxedReader, BoxedWriter>;

/// [`Connector`] for addresses understood by [`Endpoint`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeConnector;

impl NativeConnector {
    pub fn new() -> Self {
        Self
    }
}

impl Connector for NativeConnector {
    type Transport = NativeTransport;

    async fn open(&self, target: &DeviceTarget) -> Result<NativeTransport, TransportError> {
        let endpoint: Endpoint = target.address.parse()?;
        tracing::debug!(device = %target.display_name(), ?endpoint, "opening transport");

        match endpoint {
            Endpoint::Tcp(addr) => {
                let stream = TcpStream::connect(&addr)
                    .await
                    .map_err(|e| TransportError::ConnectionFailed(e.to_string()))?;
                // Commands are single short lines; don't let Nagle sit on them.
                stream
                    .set_nodelay(true)
                    .map_err(|e| TransportError::ConnectionFailed(e.to_string()))?;
                let (reader, writer) = stream.into_split();
                Ok(StreamTransport::new(Box::new(reader), Box::new(writer)))
            }
            // A blocked read on a tty file sits on tokio's blocking pool and is
            // abandoned, not interrupted, by close().
            Endpoint::Serial(path) => {
                let file = tokio::fs::OpenOptions::new()
                    .read(true)
                    .write(true)
                    .open(&path)
                    .await
                    .map_err(|e| {
                        TransportError::ConnectionFailed(format!("{}: {e}", path.display()))
                    })?;
                let (reader, writer) = tokio::io::split(file);
                Ok(StreamTransport::new(Box::new(reader), Box::new(writer)))
            }
        }
    }
}
