use actor_protocol::{ClientError, Command, ConnectionState};
use actor_runtime::{actor_debug, actor_error, actor_info, actor_warn};
use core_types::{Connector, DeviceTarget, Observer, Transport};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::ClientConfig;
use crate::constants::status;
use crate::read_loop::{self, LoopExit};
use crate::sender;
use crate::session::Session;

/// ConnectionManager owns the connection lifecycle for one device link
///
/// Responsibilities:
/// - Open transports through the [`Connector`] without blocking the caller
/// - Run exactly one read loop per established session
/// - Serialize command writes onto the open transport
/// - Narrate every lifecycle step to the [`Observer`] as a status line
///
/// ## State Machine
///
/// For the transition diagram and invariants, see:
/// `actor-protocol/src/state.rs` - ConnectionState documentation
///
/// Every public method returns immediately. Work that touches the device
/// runs on a tokio task, so all methods must be called from within a
/// runtime. `connect` hands back the session task's [`JoinHandle`]; it
/// completes once that session is over.
///
/// Cloning is cheap and every clone drives the same connection.
pub struct ConnectionManager<C: Connector, O: Observer> {
    shared: Arc<Shared<C, O>>,
}

impl<C: Connector, O: Observer> Clone for ConnectionManager<C, O> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

struct Shared<C: Connector, O> {
    connector: C,
    observer: O,
    config: ClientConfig,
    // Never held across an await or an observer callback.
    slot: Mutex<Slot<C::Transport>>,
}

struct Slot<T> {
    state: ConnectionState,
    // Mirrors `state` for subscribers.
    state_tx: watch::Sender<ConnectionState>,
    session: Option<Arc<Session<T>>>,
    // Incremented on each connect and on cancelling an open, used to
    // detect opens that completed after being superseded.
    operation_sequence: u64,
}

impl<T> Slot<T> {
    fn next_operation_id(&mut self) -> u64 {
        self.operation_sequence = self.operation_sequence.wrapping_add(1);
        self.operation_sequence
    }

    fn transition(&mut self, new_state: ConnectionState) {
        if !self.state.can_transition_to(&new_state) {
            let error = ClientError::InvalidTransition(format!(
                "{:?} -> {:?}",
                self.state, new_state
            ));
            actor_error!("{}", error);
            return;
        }

        actor_debug!("State: {:?} -> {:?}", self.state, new_state);
        self.state = new_state;
        if self.session.is_some() && !self.state.has_transport() {
            actor_error!("Session still installed in state {:?}", self.state);
        }
        self.state_tx.send_replace(self.state.clone());
    }
}

impl<C: Connector, O: Observer> ConnectionManager<C, O> {
    pub fn new(connector: C, observer: O) -> Self {
        Self::with_config(connector, observer, ClientConfig::default())
    }

    pub fn with_config(connector: C, observer: O, config: ClientConfig) -> Self {
        let (state_tx, _) = watch::channel(ConnectionState::Idle);
        Self {
            shared: Arc::new(Shared {
                connector,
                observer,
                config,
                slot: Mutex::new(Slot {
                    state: ConnectionState::Idle,
                    state_tx,
                    session: None,
                    operation_sequence: 0,
                }),
            }),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ConnectionState {
        self.shared.lock().state.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.shared.lock().state == ConnectionState::Connected
    }

    /// Watch lifecycle changes. The receiver starts at the current state.
    pub fn subscribe_state(&self) -> watch::Receiver<ConnectionState> {
        self.shared.lock().state_tx.subscribe()
    }

    /// Start connecting to `target`, superseding any current session.
    ///
    /// "Connecting to <name>..." is reported before this returns. The old
    /// transport, if any, is closed and its read loop has reported
    /// "Disconnected" before the new one is opened, so a session's events
    /// never trail its own "Disconnected".
    pub fn connect(&self, target: DeviceTarget) -> JoinHandle<()> {
        let (operation_id, previous) = {
            let mut slot = self.shared.lock();
            let operation_id = slot.next_operation_id();
            let previous = slot.session.take();
            slot.transition(ConnectionState::Connecting);
            (operation_id, previous)
        };

        if let Some(previous) = &previous {
            actor_info!("Superseding current session");
            previous.retire();
        }
        self.shared
            .observer
            .on_status(&status::connecting(target.display_name()));

        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            if let Some(previous) = previous {
                previous.transport.close().await;
                previous.wait_finished().await;
            }
            shared.run_session(operation_id, target).await;
        })
    }

    /// Close the current transport.
    ///
    /// The read loop then ends through the same path as a remote hang-up
    /// and reports "Disconnected" once. An open still in flight is
    /// abandoned. With nothing to disconnect this does nothing.
    pub fn disconnect(&self) {
        let mut slot = self.shared.lock();
        if !slot.state.can_disconnect() {
            actor_debug!("Disconnect ignored in state {:?}", slot.state);
            return;
        }

        match slot.session.clone() {
            // Still opening: abandon the open in flight
            None => {
                slot.next_operation_id();
                slot.transition(ConnectionState::Disconnected);
                drop(slot);
                actor_info!("Connect cancelled");
                self.shared.observer.on_status(status::DISCONNECTED);
            }
            Some(session) => {
                drop(slot);
                actor_info!("Disconnect requested");
                session.retire();
                tokio::spawn(async move { session.transport.close().await });
            }
        }
    }

    /// Queue `command` for the device.
    ///
    /// Fire-and-forget: the write happens on a spawned task and failures
    /// surface as "Send failed: ..." status lines. Without an open
    /// transport, or once a disconnect has started, the command is dropped
    /// silently.
    pub fn send(&self, command: impl Into<Command>) {
        let command = command.into();
        let session = self.shared.lock().session.clone();
        let Some(session) = session.filter(|session| !session.is_retired()) else {
            actor_debug!(command = %command.redacted(), "Not connected; dropping command");
            return;
        };

        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            sender::send_command(&session, &shared.observer, &command).await;
        });
    }
}

impl<C: Connector, O: Observer> Shared<C, O> {
    fn lock(&self) -> MutexGuard<'_, Slot<C::Transport>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn run_session(&self, operation_id: u64, target: DeviceTarget) {
        let transport = match self.connector.open(&target).await {
            Ok(transport) => transport,
            Err(e) => {
                let error = ClientError::Connect(e);
                let reported = {
                    let mut slot = self.lock();
                    let current = slot.operation_sequence == operation_id;
                    if current {
                        slot.transition(ConnectionState::Failed {
                            reason: error.to_string(),
                        });
                    }
                    current
                };
                if reported {
                    actor_warn!(device = %target.display_name(), "{}", error);
                    self.observer.on_status(&error.to_string());
                } else {
                    actor_debug!("Stale open failed: {}", error);
                }
                return;
            }
        };

        let session = Arc::new(Session::new(transport));
        if !self.install(operation_id, &session) {
            actor_debug!(device = %target.display_name(), "Open superseded; closing");
            session.retire();
            session.transport.close().await;
            session.mark_finished();
            return;
        }

        actor_info!(device = %target.display_name(), "Connected");
        self.observer.on_status(status::CONNECTED);

        let exit = read_loop::run(
            &session.transport,
            &self.observer,
            self.config.read_buffer_size,
        )
        .await;
        if exit != LoopExit::EndOfStream {
            actor_debug!("Session ended: {:?}", exit);
        }
        self.finish(&session).await;
    }

    /// Publish a freshly opened session unless a newer operation replaced it.
    fn install(&self, operation_id: u64, session: &Arc<Session<C::Transport>>) -> bool {
        let mut slot = self.lock();
        if slot.operation_sequence != operation_id {
            return false;
        }
        slot.session = Some(Arc::clone(session));
        slot.transition(ConnectionState::Connected);
        true
    }

    /// Tear down after the read loop. Runs once per installed session, so
    /// "Disconnected" is reported once whoever closed the transport.
    async fn finish(&self, session: &Arc<Session<C::Transport>>) {
        session.retire();
        session.transport.close().await;

        {
            let mut slot = self.lock();
            let still_current = slot
                .session
                .as_ref()
                .is_some_and(|current| Arc::ptr_eq(current, session));
            if still_current {
                slot.session = None;
                slot.transition(ConnectionState::Disconnected);
            }
        }

        actor_info!("Disconnected");
        self.observer.on_status(status::DISCONNECTED);
        session.mark_finished();
    }
}
