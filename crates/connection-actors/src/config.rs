use serde::{Deserialize, Serialize};

use crate::constants;

/// Tunables for a [`ConnectionManager`](crate::ConnectionManager).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Bytes requested per transport read. Zero is treated as one.
    pub read_buffer_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            read_buffer_size: constants::io::READ_BUFFER_SIZE,
        }
    }
}
