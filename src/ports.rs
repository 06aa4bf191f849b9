//! Finding serial devices and letting the operator pick one.

use log::{debug, warn};
use serial2::SerialPort;
use std::{error::Error, fmt, path::PathBuf};

/// Lists the serial devices currently attached to the host.
///
/// The host is asked again on every call since devices come and go. If the
/// query itself fails we log it and report no devices.
pub fn list_ports() -> Vec<PathBuf> {
    match SerialPort::available_ports() {
        Ok(ports) => {
            debug!("Found {} serial port(s)", ports.len());
            ports
        }
        Err(e) => {
            warn!("Failed to enumerate serial ports: {}", e);
            Vec::new()
        }
    }
}

/// Why the operator's port choice was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// There was nothing to choose from
    NoPorts,
    /// The input wasn't a number
    NotANumber(String),
    /// The number didn't name a listed port
    OutOfRange {
        /// What the operator typed
        index: usize,
        /// How many ports were listed
        available: usize,
    },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::NoPorts => write!(f, "no serial ports available"),
            SelectionError::NotANumber(input) => write!(f, "{:?} is not a port number", input),
            SelectionError::OutOfRange { index, available } => write!(
                f,
                "port {} does not exist, choose between 0 and {}",
                index,
                available.saturating_sub(1)
            ),
        }
    }
}

impl Error for SelectionError {}

/// Resolves the index typed by the operator against the listed `ports`.
pub fn select_port(ports: &[PathBuf], input: &str) -> Result<PathBuf, SelectionError> {
    if ports.is_empty() {
        return Err(SelectionError::NoPorts);
    }
    let input = input.trim();
    let index: usize = input
        .parse()
        .map_err(|_| SelectionError::NotANumber(input.to_owned()))?;
    ports
        .get(index)
        .cloned()
        .ok_or(SelectionError::OutOfRange {
            index,
            available: ports.len(),
        })
}
