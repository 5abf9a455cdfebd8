use actor_protocol::ClientError;
use actor_runtime::{actor_debug, actor_warn};
use core_types::{Decoder, Observer, Transport, TransportError};
use decoders::LineClassifier;
use framing::{Framer, LineFramer};

/// Why a read loop stopped.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum LoopExit {
    /// Read returned 0: the peer hung up or the transport was closed
    EndOfStream,
    /// `is_alive` went false between reads
    Closed,
    /// Read raised an error
    Failed(TransportError),
}

/// Pump bytes from `transport` through framing and classification into
/// `observer` until the stream ends.
///
/// Events are delivered in the order their lines arrived. The loop never
/// returns early on bad data: decode errors become status lines and
/// framing continues.
pub(crate) async fn run<T, O>(transport: &T, observer: &O, buffer_size: usize) -> LoopExit
where
    T: Transport,
    O: Observer,
{
    let mut framer = LineFramer::new();
    let mut decoder = LineClassifier::new();
    let mut buf = vec![0u8; buffer_size.max(1)];

    let exit = loop {
        if !transport.is_alive() {
            break LoopExit::Closed;
        }

        let n = match transport.read_chunk(&mut buf).await {
            Ok(0) => break LoopExit::EndOfStream,
            Ok(n) => n,
            Err(e) => break LoopExit::Failed(e),
        };

        let Some(chunk) = buf.get(..n) else {
            break LoopExit::Failed(TransportError::Io(format!(
                "transport reported {n} bytes for a {} byte buffer",
                buf.len()
            )));
        };

        for result in framer.push(chunk) {
            match result {
                Ok(frame) => {
                    if let Some(event) = decoder.ingest(&frame) {
                        event.deliver(observer);
                    }
                }
                Err(e) => {
                    let error = ClientError::from(e);
                    actor_warn!("{}", error);
                    observer.on_status(&error.to_string());
                }
            }
        }
    };

    if !framer.pending().is_empty() {
        actor_debug!(
            pending = framer.pending(),
            "Discarding unterminated line at end of stream"
        );
    }
    match &exit {
        LoopExit::Failed(e) => actor_warn!("{}", ClientError::Read(e.clone())),
        other => actor_debug!("Read loop finished: {:?}", other),
    }
    exit
}
