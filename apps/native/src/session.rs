//! Subcommand bodies: open a connection and print what the device says.

use std::path::Path;
use std::time::Duration;

use actor_protocol::{Command, ConnectionState};
use actor_runtime::ChannelObserver;
use connection_actors::{ClientConfig, ConnectionManager};
use core_types::{DeviceEvent, DeviceTarget};
use decoders::EnvironmentReadings;
use futures::channel::mpsc;
use futures::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use transport_native::NativeConnector;

use crate::config::Config;
use crate::error::CliError;

type Manager = ConnectionManager<NativeConnector, ChannelObserver>;

/// Upper bound for opening the transport
const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// How long to let the session and printer drain after disconnecting
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

pub fn list_devices(config: &Config, path: &Path) {
    if config.devices.is_empty() {
        println!("No devices configured. Add [[devices]] entries to {}", path.display());
        return;
    }

    let default = config.default_device.as_deref().unwrap_or_default();
    for device in &config.devices {
        let marker = if device.name.eq_ignore_ascii_case(default) { "*" } else { " " };
        println!("{marker} {:<16} {}", device.name, device.address);
    }
}

/// Render one event for stdout.
fn render(event: &DeviceEvent) -> Vec<String> {
    match event {
        DeviceEvent::StatusLine(text) => vec![format!("status: {text}")],
        DeviceEvent::EnvironmentReport(text) => {
            let mut lines = vec![format!("env: {text}")];
            if let Some(readings) = EnvironmentReadings::parse(text) {
                lines.extend(readings.to_lines().into_iter().map(|line| format!("  {line}")));
            }
            lines
        }
    }
}

fn spawn_printer(mut events: mpsc::Receiver<DeviceEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events.next().await {
            for line in render(&event) {
                println!("{line}");
            }
        }
    })
}

/// Connect and wait until the open attempt settles.
async fn open(
    target: DeviceTarget,
    pin: Option<String>,
    config: ClientConfig,
) -> Result<(Manager, JoinHandle<()>, JoinHandle<()>), CliError> {
    let (observer, events) = ChannelObserver::new();
    let printer = spawn_printer(events);
    let manager = ConnectionManager::with_config(NativeConnector::new(), observer, config);
    let device = target.display_name().to_string();
    let session = manager.connect(target);

    let mut states = manager.subscribe_state();
    let settled = tokio::time::timeout(CONNECT_TIMEOUT, async {
        states
            .wait_for(|state| *state != ConnectionState::Connecting)
            .await
            .map(|state| state.clone())
    })
    .await;

    match settled {
        Ok(Ok(ConnectionState::Connected)) => {
            if let Some(pin) = pin {
                manager.send(Command::Auth { pin });
            }
            Ok((manager, session, printer))
        }
        Ok(Ok(ConnectionState::Failed { reason })) => {
            finish(manager, session, printer).await;
            Err(CliError::ConnectionFailed(reason))
        }
        Ok(Ok(other)) => {
            finish(manager, session, printer).await;
            Err(CliError::ConnectionFailed(other.status_text().to_string()))
        }
        Ok(Err(_)) => {
            finish(manager, session, printer).await;
            Err(CliError::ConnectionFailed("state updates stopped".into()))
        }
        Err(_) => {
            manager.disconnect();
            finish(manager, session, printer).await;
            Err(CliError::ConnectTimeout { device })
        }
    }
}

/// Disconnect and let queued output reach stdout.
async fn finish(manager: Manager, session: JoinHandle<()>, printer: JoinHandle<()>) {
    manager.disconnect();
    if tokio::time::timeout(SHUTDOWN_GRACE, session).await.is_err() {
        tracing::warn!("session did not shut down in time");
    }
    // Dropping the last handle closes the event channel and ends the printer.
    drop(manager);
    if tokio::time::timeout(SHUTDOWN_GRACE, printer).await.is_err() {
        tracing::warn!("event printer did not drain in time");
    }
}

/// `connect`: forward stdin lines as commands until `quit`, EOF or hang-up.
pub async fn interactive(
    target: DeviceTarget,
    pin: Option<String>,
    config: ClientConfig,
) -> Result<(), CliError> {
    let (manager, mut session, printer) = open(target, pin, config).await?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim();
                match line {
                    "" => continue,
                    "quit" | "exit" => break,
                    _ => manager.send(Command::parse_user_input(line)),
                }
            }
            _ = &mut session => {
                tracing::info!("device closed the connection");
                drop(manager);
                if tokio::time::timeout(SHUTDOWN_GRACE, printer).await.is_err() {
                    tracing::warn!("event printer did not drain in time");
                }
                return Ok(());
            }
        }
    }

    finish(manager, session, printer).await;
    Ok(())
}

/// `send`: one connection, a batch of commands, then a quiet period.
pub async fn send_batch(
    target: DeviceTarget,
    pin: Option<String>,
    config: ClientConfig,
    commands: &[String],
    wait_ms: u64,
) -> Result<(), CliError> {
    let (manager, session, printer) = open(target, pin, config).await?;

    for input in commands {
        manager.send(Command::parse_user_input(input));
    }
    tokio::time::sleep(Duration::from_millis(wait_ms)).await;

    finish(manager, session, printer).await;
    Ok(())
}
