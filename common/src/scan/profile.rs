//! Port lists fed to the prober.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::ScanError;

/// Common services checked by a quick audit.
pub const QUICK_PORTS: [u16; 8] = [21, 22, 23, 80, 443, 445, 3306, 3389];

/// Upper bound of the full audit (well-known ports).
pub const FULL_RANGE_END: u16 = 1024;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScanProfile {
    /// A short list of common, frequently misconfigured services.
    #[default]
    Quick,
    /// Every well-known port, 1 through 1024.
    Full,
    /// An operator supplied list, ascending and deduplicated.
    Custom(Vec<u16>),
}

impl ScanProfile {
    pub fn ports(&self) -> Vec<u16> {
        match self {
            ScanProfile::Quick => QUICK_PORTS.to_vec(),
            ScanProfile::Full => (1..=FULL_RANGE_END).collect(),
            ScanProfile::Custom(ports) => ports.clone(),
        }
    }
}

impl fmt::Display for ScanProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanProfile::Quick => write!(f, "quick ({} ports)", QUICK_PORTS.len()),
            ScanProfile::Full => write!(f, "full (1-{FULL_RANGE_END})"),
            ScanProfile::Custom(ports) => write!(f, "custom ({} ports)", ports.len()),
        }
    }
}

impl FromStr for ScanProfile {
    type Err = ScanError;

    /// Accepts `quick`, `full`, or a port list such as `22,80,8000-8010`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quick" | "q" => Ok(ScanProfile::Quick),
            "full" | "f" => Ok(ScanProfile::Full),
            _ => parse_port_list(s).map(ScanProfile::Custom),
        }
    }
}

fn parse_port_list(s: &str) -> Result<Vec<u16>, ScanError> {
    let mut ports: BTreeSet<u16> = BTreeSet::new();

    for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.split_once('-') {
            Some((start, end)) => {
                let start = parse_port(start, s)?;
                let end = parse_port(end, s)?;
                if end < start {
                    return Err(ScanError::invalid_ports(s, format!("reversed range {part}")));
                }
                ports.extend(start..=end);
            }
            None => {
                ports.insert(parse_port(part, s)?);
            }
        }
    }

    if ports.is_empty() {
        return Err(ScanError::invalid_ports(s, "no ports given"));
    }
    Ok(ports.into_iter().collect())
}

fn parse_port(s: &str, descriptor: &str) -> Result<u16, ScanError> {
    match s.trim().parse::<u16>() {
        Ok(0) => Err(ScanError::invalid_ports(descriptor, "port 0 is not scannable")),
        Ok(port) => Ok(port),
        Err(e) => Err(ScanError::invalid_ports(descriptor, format!("'{s}': {e}"))),
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
