use serde::{Deserialize, Serialize};

/// # Connection State Machine
///
/// One value per [`ConnectionManager`](../../connection_actors/struct.ConnectionManager.html);
/// it is the single source of truth for whether a transport is open.
///
/// ## State Transition Diagram
///
/// ```text
///   ┌──────┐ connect ┌────────────┐ open ok ┌───────────┐
///   │ Idle │────────►│ Connecting │────────►│ Connected │
///   └──────┘         └─┬────────┬─┘         └─────┬─────┘
///                      │        │                 │ EOF / read error /
///             open err │        │ disconnect      │ disconnect
///                      ▼        ▼                 ▼
///              ┌────────┐   ┌──────────────┐◄─────┘
///              │ Failed │   │ Disconnected │
///              └────────┘   └──────────────┘
/// ```
///
/// `connect` is accepted from every state. From Connecting or Connected it
/// supersedes the running session.
///
/// ## State Invariants
///
/// - **Idle**: nothing attempted yet, no transport
/// - **Connecting**: transport being opened, no read loop yet
/// - **Connected**: transport open, read loop running
/// - **Disconnected**: transport released after EOF, read error or disconnect
/// - **Failed**: the last open attempt raised an error, no transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionState {
    Idle,
    Connecting,
    Connected,
    Disconnected,
    Failed { reason: String },
}

impl ConnectionState {
    /// Whether a transport may be held in this state.
    pub fn has_transport(&self) -> bool {
        matches!(self, Self::Connecting | Self::Connected)
    }

    pub fn can_disconnect(&self) -> bool {
        self.has_transport()
    }

    /// User-facing status text
    pub fn status_text(&self) -> &str {
        match self {
            Self::Idle => "Ready to connect",
            Self::Connecting => "Connecting...",
            Self::Connected => "Connected",
            Self::Disconnected => "Disconnected",
            Self::Failed { reason } => reason,
        }
    }

    /// Validate if transition to new_state is allowed from current state
    pub fn can_transition_to(&self, new_state: &ConnectionState) -> bool {
        use ConnectionState::*;

        match (self, new_state) {
            // A fresh connect is allowed from anywhere
            (_, Connecting) => true,

            // From Connecting
            (Connecting, Connected) => true,    // Open succeeded
            (Connecting, Failed { .. }) => true, // Open raised
            (Connecting, Disconnected) => true, // User cancelled while opening

            // From Connected
            (Connected, Disconnected) => true, // EOF, read error or user disconnect

            _ => false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        use ConnectionState::*;
        assert!(Idle.can_transition_to(&Connecting));
        assert!(Connecting.can_transition_to(&Connected));
        assert!(Connected.can_transition_to(&Disconnected));
        assert!(Connected.can_transition_to(&Connecting));
        assert!(Disconnected.can_transition_to(&Connecting));
        assert!(Connecting.can_transition_to(&Failed {
            reason: "refused".into()
        }));
    }

    #[test]
    fn test_invalid_transitions() {
        use ConnectionState::*;
        // Never connected without opening
        assert!(!Idle.can_transition_to(&Connected));
        // An established session cannot fail at open
        assert!(!Connected.can_transition_to(&Failed {
            reason: "late".into()
        }));
        // Terminal transition happens once
        assert!(!Disconnected.can_transition_to(&Disconnected));
        assert!(!Failed { reason: "x".into() }.can_transition_to(&Connected));
    }

    #[test]
    fn test_transport_presence() {
        assert!(ConnectionState::Connecting.has_transport());
        assert!(ConnectionState::Connected.has_transport());
        assert!(!ConnectionState::Idle.has_transport());
        assert!(!ConnectionState::Disconnected.has_transport());
        assert!(!ConnectionState::Failed { reason: String::new() }.has_transport());
    }

    #[test]
    fn test_status_text() {
        assert_eq!(ConnectionState::Connected.status_text(), "Connected");
        assert_eq!(
            ConnectionState::Failed {
                reason: "Connect failed: timed out".into()
            }
            .status_text(),
            "Connect failed: timed out"
        );
    }

    #[test]
    fn test_serialization() {
        let state = ConnectionState::Failed {
            reason: "refused".into(),
        };
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: ConnectionState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
