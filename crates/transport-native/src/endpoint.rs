use core_types::TransportError;
use std::path::PathBuf;
use std::str::FromStr;

/// Where a device address points.
///
/// - `tcp://host:port`: serial-to-network bridge or simulator
/// - `serial:///dev/rfcomm0`: bound RFCOMM channel or any serial device node
/// - a bare path (`/dev/ttyUSB0`, `COM5`): same as `serial://`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Tcp(String),
    Serial(PathBuf),
}

impl FromStr for Endpoint {
    type Err = TransportError;

    fn from_str(address: &str) -> Result<Self, Self::Err> {
        let address = address.trim();

        if let Some(host_port) = address.strip_prefix("tcp://") {
            if host_port.rsplit_once(':').is_some_and(|(host, port)| {
                !host.is_empty() && port.parse::<u16>().is_ok()
            }) {
                return Ok(Endpoint::Tcp(host_port.to_string()));
            }
            return Err(TransportError::InvalidAddress(format!(
                "{address} (expected tcp://host:port)"
            )));
        }

        if let Some(path) = address.strip_prefix("serial://") {
            if path.is_empty() {
                return Err(TransportError::InvalidAddress(format!(
                    "{address} (missing device path)"
                )));
            }
            return Ok(Endpoint::Serial(PathBuf::from(path)));
        }

        let looks_like_com_port = address
            .get(..3)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("com"));
        if address.starts_with('/') || looks_like_com_port {
            return Ok(Endpoint::Serial(PathBuf::from(address)));
        }

        Err(TransportError::InvalidAddress(address.to_string()))
    }
}
