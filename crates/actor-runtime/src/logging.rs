//! Centralized logging macros for the client
//!
//! These macros forward to `tracing` so that every crate logs through the
//! same subscriber. The host application decides where the output goes.

/// Log debug-level message
///
/// # Example
/// ```
/// use actor_runtime::actor_debug;
/// actor_debug!("State: {:?} → {:?}", "Connecting", "Connected");
/// ```
#[macro_export]
macro_rules! actor_debug {
    ($($arg:tt)*) => {
        $crate::tracing::debug!($($arg)*)
    };
}

/// Log info-level message
///
/// Use for important state changes and user-facing events
#[macro_export]
macro_rules! actor_info {
    ($($arg:tt)*) => {
        $crate::tracing::info!($($arg)*)
    };
}

/// Log warning-level message
///
/// Use for recoverable errors and unexpected conditions
#[macro_export]
macro_rules! actor_warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!($($arg)*)
    };
}

/// Log error-level message
#[macro_export]
macro_rules! actor_error {
    ($($arg:tt)*) => {
        $crate::tracing::error!($($arg)*)
    };
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing::Level;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` under a plain-text subscriber and return what it printed.
    fn captured(max_level: Level, f: impl FnOnce()) -> String {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(max_level)
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = capture.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_macros_emit_at_their_level_with_fields() {
        let output = captured(Level::DEBUG, || {
            actor_debug!("State: {:?} -> {:?}", "Connecting", "Connected");
            actor_info!(device = %"HC-05", "Connected");
            actor_warn!("Event dropped, channel full: {}", "DOOR OPEN OK");
            actor_error!("Invalid transition: {}", "Idle -> Connected");
        });

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4, "{output}");
        assert!(lines[0].contains("DEBUG") && lines[0].contains(r#"State: "Connecting" -> "Connected""#));
        assert!(lines[1].contains("INFO") && lines[1].contains("device=HC-05"));
        assert!(lines[2].contains("WARN") && lines[2].contains("channel full: DOOR OPEN OK"));
        assert!(lines[3].contains("ERROR") && lines[3].contains("Idle -> Connected"));
    }

    #[test]
    fn test_debug_lines_respect_subscriber_level() {
        let output = captured(Level::INFO, || {
            actor_debug!("Sent");
            actor_info!("Disconnect requested");
        });

        assert!(!output.contains("Sent"));
        assert!(output.contains("Disconnect requested"));
    }
}
