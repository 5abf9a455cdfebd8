//! Clap derive structures for the `smarthome` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// smarthome -- talk to a smart-home controller over its serial link
#[derive(Debug, Parser)]
#[command(
    name = "smarthome",
    version,
    about = "Control lights and doors and read sensors on a smart-home controller",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "SMARTHOME_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List configured devices
    Devices,

    /// Open an interactive session; stdin lines become commands
    Connect(ConnectArgs),

    /// Connect, send commands, print replies, then disconnect
    Send(SendArgs),
}

/// Which device to talk to and how to authenticate.
#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Configured device name
    #[arg(long, short = 'd')]
    pub device: Option<String>,

    /// Device address: tcp://host:port, serial:///dev/rfcomm0 or a device path
    #[arg(long, short = 'a', conflicts_with = "device")]
    pub address: Option<String>,

    /// PIN sent as `AUTH <pin>` once connected
    #[arg(long, env = "SMARTHOME_PIN", hide_env_values = true)]
    pub pin: Option<String>,
}

#[derive(Debug, Args)]
pub struct ConnectArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

#[derive(Debug, Args)]
pub struct SendArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// How long to keep printing device output after the last command
    #[arg(long, default_value = "1500")]
    pub wait_ms: u64,

    /// Commands, e.g. "light on" "door close" env
    #[arg(required = true, num_args = 1..)]
    pub commands: Vec<String>,
}
