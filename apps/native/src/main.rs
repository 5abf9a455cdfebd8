mod cli;
mod config;
mod error;
mod session;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Logs go to stderr; stdout carries device output only.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let path = cli.global.config.clone().unwrap_or_else(config::config_path);
    let cfg = config::load_config(&path)?;
    tracing::debug!(path = %path.display(), devices = cfg.devices.len(), "loaded config");

    match cli.command {
        Command::Devices => {
            session::list_devices(&cfg, &path);
            Ok(())
        }
        Command::Connect(args) => {
            let target = cfg.resolve_target(&args.target, &path)?;
            let pin = cfg.resolve_pin(&args.target);
            session::interactive(target, pin, cfg.client_config()).await
        }
        Command::Send(args) => {
            let target = cfg.resolve_target(&args.target, &path)?;
            let pin = cfg.resolve_pin(&args.target);
            session::send_batch(target, pin, cfg.client_config(), &args.commands, args.wait_ms)
                .await
        }
    }
}
