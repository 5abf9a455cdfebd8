//! CLI error types and their exit codes.

use thiserror::Error;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid configuration: {0}")]
    Config(Box<figment::Error>),

    #[error("Device '{name}' is not configured (run `smarthome devices` to list devices)")]
    UnknownDevice { name: String },

    #[error("No device selected: pass --device or --address, or set default_device in {path}")]
    NoDevice { path: String },

    #[error("{0}")]
    ConnectionFailed(String),

    #[error("Timed out connecting to {device}")]
    ConnectTimeout { device: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::NoDevice { .. } => exit_code::USAGE,
            Self::UnknownDevice { .. } => exit_code::NOT_FOUND,
            Self::ConnectionFailed(_) | Self::ConnectTimeout { .. } => exit_code::CONNECTION,
            Self::Io(_) => exit_code::GENERAL,
        }
    }
}
