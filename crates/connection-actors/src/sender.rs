use actor_protocol::{ClientError, Command};
use actor_runtime::{actor_debug, actor_warn};
use core_types::{Observer, Transport};

use crate::session::Session;

/// Encode `command` as one line and write it.
///
/// A failed write is reported to the observer as "Send failed: ..." and
/// leaves the session up; the read side decides whether it is over. Once
/// the session is being torn down, a failed write is dropped silently like
/// any other command sent without an open transport.
pub(crate) async fn send_command<T, O>(session: &Session<T>, observer: &O, command: &Command)
where
    T: Transport,
    O: Observer,
{
    match session.write_frame(&command.encode()).await {
        Ok(()) => actor_debug!(command = %command.redacted(), "Sent"),
        Err(e) if session.is_retired() => {
            actor_debug!(command = %command.redacted(), "Dropped during disconnect: {}", e);
        }
        Err(e) => {
            let error = ClientError::Send(e);
            actor_warn!(command = %command.redacted(), "{}", error);
            observer.on_status(&error.to_string());
        }
    }
}
