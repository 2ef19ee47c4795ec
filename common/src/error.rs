//! # Error Taxonomy
//!
//! Only [`ScanError`] ever reaches a caller. Discovery and probe failures are absorbed
//! by the engine and turned into "fewer results", but they keep their own types so the
//! reason survives into the logs.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Configuration-level errors, raised before any packet leaves the machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("invalid range '{descriptor}': {reason}")]
    InvalidRange { descriptor: String, reason: String },

    #[error("invalid port list '{descriptor}': {reason}")]
    InvalidPorts { descriptor: String, reason: String },
}

impl ScanError {
    pub fn invalid_range(descriptor: &str, reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            descriptor: descriptor.to_string(),
            reason: reason.into(),
        }
    }

    pub fn invalid_ports(descriptor: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPorts {
            descriptor: descriptor.to_string(),
            reason: reason.into(),
        }
    }
}

/// Link-layer failures during host discovery.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("no usable LAN interface covers the target range")]
    NoInterface,

    #[error("opening datalink channel on {interface}")]
    Channel {
        interface: String,
        #[source]
        source: io::Error,
    },

    #[error("non-ethernet channel for {0}")]
    NotEthernet(String),

    #[error("failed to build ARP request: {0}")]
    Packet(String),

    #[error("discovery worker stopped unexpectedly: {0}")]
    Worker(String),
}

/// Why a single connection attempt did not establish.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProbeFailure {
    #[error("timed out after {}ms", .0.as_millis())]
    TimedOut(Duration),

    #[error("connection reset")]
    Reset,

    #[error("socket error: {0}")]
    Io(io::ErrorKind),
}

impl From<io::Error> for ProbeFailure {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::ConnectionReset | io::ErrorKind::ConnectionAborted => Self::Reset,
            kind => Self::Io(kind),
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
