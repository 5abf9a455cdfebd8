//! Centralized configuration constants for the connection tasks
//!
//! Wire-visible strings live here too: observers and tests match on them.

/// Transport I/O sizing
pub mod io {
    /// Bytes requested per read from the transport
    ///
    /// **Value**: 256 bytes
    ///
    /// **Rationale**: Controller lines are short (`LIGHT ON OK`, a one-line
    /// JSON report of well under 200 bytes). The framer reassembles lines
    /// across reads, so the size only trades syscalls against memory and
    /// never affects correctness.
    ///
    /// **Used in**: read_loop.rs
    pub const READ_BUFFER_SIZE: usize = 256;
}

/// Client-generated status lines
pub mod status {
    /// Emitted once the transport is open and the read loop is starting
    pub const CONNECTED: &str = "Connected";

    /// Emitted exactly once when a connected session ends, whichever side
    /// ended it
    pub const DISCONNECTED: &str = "Disconnected";

    /// Emitted as soon as `connect` is called
    pub fn connecting(device_name: &str) -> String {
        format!("Connecting to {device_name}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connecting_text() {
        assert_eq!(status::connecting("HC-05"), "Connecting to HC-05...");
    }
}
