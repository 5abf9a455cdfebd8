use core_types::Frame;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An outbound instruction for the controller.
///
/// The typed variants cover the controller's known verbs; [`Command::Raw`]
/// carries anything else verbatim. The client never validates a command,
/// it only appends the line terminator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Forward a session credential: `AUTH <pin>`
    Auth { pin: String },
    LightOn,
    LightOff,
    DoorOpen,
    DoorClose,
    /// Ask for an environment report: `READ ENV`
    ReadEnv,
    Raw(String),
}

impl Command {
    /// Wire bytes: UTF-8 text plus a single `\n`.
    pub fn encode(&self) -> Vec<u8> {
        Frame::new_tx(self.to_string()).to_wire()
    }

    /// Text safe for logs: the PIN of an `AUTH` is masked.
    pub fn redacted(&self) -> String {
        match self {
            Self::Auth { .. } => "AUTH ****".to_string(),
            other => other.to_string(),
        }
    }

    /// Map loosely typed user input onto a command.
    ///
    /// Matching is case-insensitive and whitespace-tolerant; unknown input
    /// becomes [`Command::Raw`] with the trimmed input.
    pub fn parse_user_input(input: &str) -> Command {
        let words: Vec<String> = input
            .split_whitespace()
            .map(str::to_ascii_uppercase)
            .collect();
        let words: Vec<&str> = words.iter().map(String::as_str).collect();

        match words.as_slice() {
            ["LIGHT", "ON"] => Command::LightOn,
            ["LIGHT", "OFF"] => Command::LightOff,
            ["DOOR", "OPEN"] => Command::DoorOpen,
            ["DOOR", "CLOSE"] => Command::DoorClose,
            ["READ", "ENV"] | ["ENV"] => Command::ReadEnv,
            ["AUTH", _] => {
                let pin = input.split_whitespace().nth(1).unwrap_or_default();
                Command::Auth { pin: pin.to_string() }
            }
            _ => Command::Raw(input.trim().to_string()),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auth { pin } => write!(f, "AUTH {pin}"),
            Self::LightOn => f.write_str("LIGHT ON"),
            Self::LightOff => f.write_str("LIGHT OFF"),
            Self::DoorOpen => f.write_str("DOOR OPEN"),
            Self::DoorClose => f.write_str("DOOR CLOSE"),
            Self::ReadEnv => f.write_str("READ ENV"),
            Self::Raw(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        Command::Raw(s.to_string())
    }
}

impl From<String> for Command {
    fn from(s: String) -> Self {
        Command::Raw(s)
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_text() {
        assert_eq!(Command::Auth { pin: "1234".into() }.to_string(), "AUTH 1234");
        assert_eq!(Command::LightOn.to_string(), "LIGHT ON");
        assert_eq!(Command::LightOff.to_string(), "LIGHT OFF");
        assert_eq!(Command::DoorOpen.to_string(), "DOOR OPEN");
        assert_eq!(Command::DoorClose.to_string(), "DOOR CLOSE");
        assert_eq!(Command::ReadEnv.to_string(), "READ ENV");
    }

    #[test]
    fn test_encode_appends_one_newline() {
        assert_eq!(Command::LightOn.encode(), b"LIGHT ON\n");
        assert_eq!(Command::from("PING").encode(), b"PING\n");
    }

    #[test]
    fn test_encode_is_utf8() {
        assert_eq!(Command::from("TEMP 21°").encode(), "TEMP 21°\n".as_bytes());
    }

    #[test]
    fn test_redacted_masks_pin() {
        assert_eq!(Command::Auth { pin: "1234".into() }.redacted(), "AUTH ****");
        assert_eq!(Command::DoorOpen.redacted(), "DOOR OPEN");
    }

    #[test]
    fn test_parse_user_input() {
        assert_eq!(Command::parse_user_input("light on"), Command::LightOn);
        assert_eq!(Command::parse_user_input("  Door   Close "), Command::DoorClose);
        assert_eq!(Command::parse_user_input("env"), Command::ReadEnv);
        assert_eq!(
            Command::parse_user_input("auth 0000"),
            Command::Auth { pin: "0000".into() }
        );
        assert_eq!(
            Command::parse_user_input("FAN 3"),
            Command::Raw("FAN 3".into())
        );
    }

    #[test]
    fn test_command_serialization() {
        let cmd = Command::Auth { pin: "1234".into() };
        let json = serde_json::to_string(&cmd).unwrap();
        let deserialized: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, deserialized);
    }
}
