//! CLI-owned configuration: the TOML device list and its translation into
//! a `DeviceTarget` plus `ClientConfig`.
//!
//! The libraries never see these types.

use std::path::{Path, PathBuf};

use connection_actors::ClientConfig;
use core_types::DeviceTarget;
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::cli::TargetArgs;
use crate::error::CliError;

/// Contents of `config.toml`.
///
/// ```toml
/// default_device = "hall"
/// pin = "1234"
///
/// [[devices]]
/// name = "hall"
/// address = "/dev/rfcomm0"
/// ```
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub devices: Vec<DeviceTarget>,

    /// Used when neither --device nor --address is given.
    pub default_device: Option<String>,

    /// Sent as `AUTH <pin>` after connecting, unless --pin overrides it.
    pub pin: Option<String>,

    pub read_buffer_size: Option<usize>,
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "smarthome", "smarthome")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("smarthome.toml"))
}

/// Load defaults, then the TOML file (if present), then `SMARTHOME_*`.
pub fn load_config(path: &Path) -> Result<Config, CliError> {
    let config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SMARTHOME_").only(&["default_device", "pin", "read_buffer_size"]))
        .extract()?;
    Ok(config)
}

impl Config {
    pub fn find_device(&self, name: &str) -> Option<&DeviceTarget> {
        self.devices
            .iter()
            .find(|device| device.name.eq_ignore_ascii_case(name))
    }

    /// Pick the target: --address, then --device, then `default_device`,
    /// then the only configured device.
    pub fn resolve_target(&self, args: &TargetArgs, path: &Path) -> Result<DeviceTarget, CliError> {
        if let Some(address) = &args.address {
            return Ok(DeviceTarget::new("", address.clone()));
        }

        let wanted = args.device.as_ref().or(self.default_device.as_ref());
        match (wanted, self.devices.as_slice()) {
            (Some(name), _) => self
                .find_device(name)
                .cloned()
                .ok_or_else(|| CliError::UnknownDevice { name: name.clone() }),
            (None, [only]) => Ok(only.clone()),
            (None, _) => Err(CliError::NoDevice {
                path: path.display().to_string(),
            }),
        }
    }

    pub fn resolve_pin(&self, args: &TargetArgs) -> Option<String> {
        args.pin.clone().or_else(|| self.pin.clone())
    }

    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::default();
        if let Some(size) = self.read_buffer_size {
            config.read_buffer_size = size;
        }
        config
    }
}
