use core_types::{DeviceEvent, Observer};
use futures_channel::mpsc;
use std::sync::{Arc, Mutex, PoisonError};

use crate::actor_warn;

/// Capacity of the event channel handed to the presentation layer
///
/// Sized so that a burst of device lines never has to wait on a slow
/// consumer; once full, further events are dropped with a warning.
pub const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Observer that forwards every event into a bounded channel
///
/// Lets a presentation layer consume events as a stream on its own task
/// instead of being called back on the connection's task.
///
/// One sender is shared by all clones: each clone of a `futures` sender
/// adds a slot to the bound.
#[derive(Clone)]
pub struct ChannelObserver {
    event_tx: Arc<Mutex<mpsc::Sender<DeviceEvent>>>,
}

impl ChannelObserver {
    /// Create an observer and the receiver that drains it
    pub fn new() -> (Self, mpsc::Receiver<DeviceEvent>) {
        Self::with_capacity(EVENT_CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> (Self, mpsc::Receiver<DeviceEvent>) {
        let (event_tx, event_rx) = mpsc::channel(capacity);
        (
            Self {
                event_tx: Arc::new(Mutex::new(event_tx)),
            },
            event_rx,
        )
    }

    /// Never blocks. Failures are logged but don't propagate.
    fn forward(&self, event: DeviceEvent) {
        let mut event_tx = self.event_tx.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = event_tx.try_send(event) {
            if e.is_disconnected() {
                actor_warn!("Event dropped, receiver closed: {}", e.into_inner().text());
            } else {
                actor_warn!("Event dropped, channel full: {}", e.into_inner().text());
            }
        }
    }
}

impl Observer for ChannelObserver {
    fn on_status(&self, text: &str) {
        self.forward(DeviceEvent::StatusLine(text.to_string()));
    }

    fn on_environment_report(&self, text: &str) {
        self.forward(DeviceEvent::EnvironmentReport(text.to_string()));
    }
}
