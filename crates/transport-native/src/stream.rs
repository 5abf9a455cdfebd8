use core_types::{Transport, TransportError};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadHalf, WriteHalf};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// [`Transport`] over any pair of async byte-stream halves.
///
/// `close` cancels an internal token, and a read that is blocked on the
/// device observes it and returns `Ok(0)`. The session above this never
/// sees the token; it only sees end-of-stream.
pub struct StreamTransport<R, W> {
    reader: Mutex<R>,
    writer: Mutex<W>,
    closed: CancellationToken,
}

impl<R, W> StreamTransport<R, W>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: Mutex::new(reader),
            writer: Mutex::new(writer),
            closed: CancellationToken::new(),
        }
    }
}

impl<T> StreamTransport<ReadHalf<T>, WriteHalf<T>>
where
    T: AsyncRead + AsyncWrite + Send + 'static,
{
    /// Wrap a single duplex stream (a socket, a tty file, `tokio::io::duplex`).
    pub fn from_stream(stream: T) -> Self {
        let (reader, writer) = tokio::io::split(stream);
        Self::new(reader, writer)
    }
}

impl<R, W> Transport for StreamTransport<R, W>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    async fn read_chunk(&self, buf: &mut [u8]) -> Result<usize, TransportError> {
        if self.closed.is_cancelled() {
            return Ok(0);
        }

        let mut reader = self.reader.lock().await;
        let result = tokio::select! {
            biased;
            () = self.closed.cancelled() => Ok(0),
            read = reader.read(buf) => read.map_err(TransportError::from),
        };

        // EOF and read errors both end the stream for good.
        if !matches!(result, Ok(n) if n > 0) {
            self.closed.cancel();
        }
        result
    }

    async fn write_all(&self, data: &[u8]) -> Result<(), TransportError> {
        if self.closed.is_cancelled() {
            return Err(TransportError::NotConnected);
        }

        let mut writer = self.writer.lock().await;
        writer.write_all(data).await?;
        writer.flush().await?;
        Ok(())
    }

    async fn close(&self) {
        self.closed.cancel();
        // A writer blocked on a hung peer holds the lock; the drop of the
        // transport releases the stream in that case.
        if let Ok(mut writer) = self.writer.try_lock() {
            let _ = writer.shutdown().await;
        }
    }

    fn is_alive(&self) -> bool {
        !self.closed.is_cancelled()
    }
}
