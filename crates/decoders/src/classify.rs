use core_types::{Decoder, DeviceEvent, Frame};

/// Tag a frame's text as an environment report or a status line.
///
/// A report is anything whose trimmed text starts with `{`. The payload is
/// not validated; malformed JSON is passed through untouched.
pub fn classify(text: &str) -> DeviceEvent {
    let trimmed = text.trim();
    if trimmed.starts_with('{') {
        DeviceEvent::EnvironmentReport(trimmed.to_string())
    } else {
        DeviceEvent::StatusLine(trimmed.to_string())
    }
}

/// Decoder used by the read loop: classifies every non-blank line.
pub struct LineClassifier;

impl LineClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineClassifier {
    fn ingest(&mut self, frame: &Frame) -> Option<DeviceEvent> {
        // Blank lines (e.g. "\r\n\r\n" keep-alives) are not worth an event.
        if frame.text.trim().is_empty() {
            return None;
        }
        Some(classify(&frame.text))
    }

    fn id(&self) -> &'static str {
        "lines"
    }
}
