use serde::{Deserialize, Serialize};

pub mod transport;
pub use transport::{Connector, Transport, TransportError};

/// Represents the direction of data flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    Rx, // Received from device
    Tx, // Sent to device
}

/// One newline-delimited logical message.
///
/// The text never contains the `\n` delimiter nor any `\r`; the terminator
/// exists only on the wire and is added back by [`Frame::to_wire`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Frame {
    pub text: String,
    /// Direction of the frame.
    pub channel: Channel,
}

impl Frame {
    pub fn new_rx(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            channel: Channel::Rx,
        }
    }

    pub fn new_tx(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            channel: Channel::Tx,
        }
    }

    /// UTF-8 bytes of the frame followed by exactly one `\n`.
    pub fn to_wire(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.text.len() + 1);
        bytes.extend_from_slice(self.text.as_bytes());
        bytes.push(b'\n');
        bytes
    }
}

/// Classified device output, as handed to an [`Observer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceEvent {
    /// `{`-prefixed payload carrying sensor readings. Not validated.
    EnvironmentReport(String),
    /// Anything else: device acknowledgments, errors, and the client's own
    /// lifecycle narration ("Connected", "Disconnected", ...).
    StatusLine(String),
}

impl DeviceEvent {
    pub fn text(&self) -> &str {
        match self {
            Self::EnvironmentReport(text) | Self::StatusLine(text) => text,
        }
    }

    /// Route the event to the matching observer callback.
    pub fn deliver<O: Observer + ?Sized>(&self, observer: &O) {
        match self {
            Self::EnvironmentReport(text) => observer.on_environment_report(text),
            Self::StatusLine(text) => observer.on_status(text),
        }
    }
}

/// A connection candidate: display name plus an address only the
/// [`Connector`] knows how to interpret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceTarget {
    pub name: String,
    pub address: String,
}

impl DeviceTarget {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }

    /// Name used in status narration, falling back to the address.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.address
        } else {
            &self.name
        }
    }
}

/// Trait for turning Frames into DeviceEvents.
pub trait Decoder: Send {
    /// Interpret a frame. Returns None if the frame carries no event.
    fn ingest(&mut self, frame: &Frame) -> Option<DeviceEvent>;

    /// Get the unique name of this decoder (e.g., "lines").
    fn id(&self) -> &'static str;
}

/// Consumer of classified events, implemented by the presentation layer.
///
/// Callbacks run on whichever tokio worker drives the connection task that
/// produced the event. Implementations that need a specific thread (a UI
/// loop, for instance) must re-marshal themselves. Within one connection,
/// callbacks arrive in wire order.
pub trait Observer: Send + Sync + 'static {
    fn on_status(&self, text: &str);
    fn on_environment_report(&self, text: &str);
}

impl<O: Observer + ?Sized> Observer for std::sync::Arc<O> {
    fn on_status(&self, text: &str) {
        (**self).on_status(text);
    }

    fn on_environment_report(&self, text: &str) {
        (**self).on_environment_report(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    impl Observer for Recorder {
        fn on_status(&self, text: &str) {
            self.calls.lock().unwrap().push(format!("status:{text}"));
        }

        fn on_environment_report(&self, text: &str) {
            self.calls.lock().unwrap().push(format!("env:{text}"));
        }
    }

    #[test]
    fn test_frame_serialization() {
        let frame = Frame::new_rx("LIGHT ON OK");
        let json = serde_json::to_string(&frame).unwrap();
        let deserialized: Frame = serde_json::from_str(&json).unwrap();
        assert_eq!(frame, deserialized);
    }

    #[test]
    fn test_frame_to_wire_appends_single_newline() {
        let frame = Frame::new_tx("LIGHT ON");
        assert_eq!(frame.to_wire(), b"LIGHT ON\n");
        assert_eq!(frame.channel, Channel::Tx);
    }

    #[test]
    fn test_event_delivery_routes_by_kind() {
        let recorder = Recorder::default();
        DeviceEvent::StatusLine("Connected".into()).deliver(&recorder);
        DeviceEvent::EnvironmentReport("{\"t\":1}".into()).deliver(&recorder);

        let calls = recorder.calls.lock().unwrap();
        assert_eq!(*calls, vec!["status:Connected", "env:{\"t\":1}"]);
    }

    #[test]
    fn test_display_name_falls_back_to_address() {
        assert_eq!(DeviceTarget::new("HC-05", "serial:///dev/rfcomm0").display_name(), "HC-05");
        assert_eq!(
            DeviceTarget::new("", "98:D3:31:F5:2A:11").display_name(),
            "98:D3:31:F5:2A:11"
        );
    }
}
