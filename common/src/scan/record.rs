use std::fmt;
use std::net::Ipv4Addr;
use std::time::Duration;

use pnet::util::MacAddr;

use crate::network::target::TargetRange;
use crate::scan::{PortSet, ScanProfile};

pub const NO_OPEN_PORTS: &str = "None";
pub const NO_ACTION_NEEDED: &str = "No urgent action required.";

/// Coarse risk classification of one host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskTier {
    #[default]
    Low,
    High,
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTier::Low => write!(f, "Low"),
            RiskTier::High => write!(f, "High"),
        }
    }
}

/// The audit result for one host. `recommendations[i]` belongs to the i-th open port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRecord {
    pub ip: Ipv4Addr,
    pub mac: MacAddr,
    pub open_ports: PortSet,
    pub recommendations: Vec<String>,
    pub risk: RiskTier,
}

impl ScanRecord {
    /// The CSV-ready shape of this record.
    pub fn to_flat(&self) -> FlatRecord {
        let open_ports = if self.open_ports.is_empty() {
            NO_OPEN_PORTS.to_string()
        } else {
            self.open_ports.to_string()
        };
        let recommendations = if self.recommendations.is_empty() {
            NO_ACTION_NEEDED.to_string()
        } else {
            self.recommendations.join(" | ")
        };

        FlatRecord {
            ip: self.ip.to_string(),
            mac: self.mac.to_string().to_uppercase(),
            open_ports,
            recommendations,
            risk: self.risk.to_string(),
        }
    }
}

/// A [`ScanRecord`] flattened to text columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRecord {
    pub ip: String,
    pub mac: String,
    pub open_ports: String,
    pub recommendations: String,
    pub risk: String,
}

impl FlatRecord {
    pub const HEADERS: [&'static str; 5] = [
        "IP Address",
        "MAC Address",
        "Open Ports",
        "Recommendations",
        "Risk",
    ];

    pub fn fields(&self) -> [&str; 5] {
        [
            &self.ip,
            &self.mac,
            &self.open_ports,
            &self.recommendations,
            &self.risk,
        ]
    }
}

/// Everything one invocation of the scanner produced.
#[derive(Debug, Clone)]
pub struct ScanRun {
    pub target: TargetRange,
    pub profile: ScanProfile,
    pub records: Vec<ScanRecord>,
    /// Set when the run was cancelled before every discovered host was probed.
    pub interrupted: bool,
    pub elapsed: Duration,
}

impl ScanRun {
    pub fn empty(target: TargetRange, profile: ScanProfile) -> Self {
        Self {
            target,
            profile,
            records: Vec::new(),
            interrupted: false,
            elapsed: Duration::ZERO,
        }
    }

    pub fn host_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
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
