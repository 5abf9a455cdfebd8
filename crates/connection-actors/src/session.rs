use core_types::{Transport, TransportError};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{watch, Mutex};

/// One established connection: the open transport plus the bookkeeping
/// shared by its read loop and its senders.
pub(crate) struct Session<T> {
    pub(crate) transport: T,
    // Held for a whole frame so concurrent senders never interleave bytes.
    write_lock: Mutex<()>,
    // Set once teardown starts; commands queued after that are dropped.
    retired: AtomicBool,
    // Flips to true after the read loop has reported "Disconnected".
    finished: watch::Sender<bool>,
}

impl<T: Transport> Session<T> {
    pub(crate) fn new(transport: T) -> Self {
        let (finished, _) = watch::channel(false);
        Self {
            transport,
            write_lock: Mutex::new(()),
            retired: AtomicBool::new(false),
            finished,
        }
    }

    /// Write one complete frame, excluding other writers until it is out.
    pub(crate) async fn write_frame(&self, bytes: &[u8]) -> Result<(), TransportError> {
        let _guard = self.write_lock.lock().await;
        self.transport.write_all(bytes).await
    }

    /// Stop accepting commands. Idempotent.
    pub(crate) fn retire(&self) {
        self.retired.store(true, Ordering::Release);
    }

    pub(crate) fn is_retired(&self) -> bool {
        self.retired.load(Ordering::Acquire)
    }

    /// Called by the read loop's owner once its last event is out.
    pub(crate) fn mark_finished(&self) {
        self.finished.send_replace(true);
    }

    /// Resolve once [`mark_finished`](Self::mark_finished) has run.
    pub(crate) async fn wait_finished(&self) {
        let mut finished = self.finished.subscribe();
        // The sender lives in `self`, so this only returns once finished.
        let _ = finished.wait_for(|done| *done).await;
    }
}
