//! # Scan Target Model
//!
//! Parses the range descriptor an operator types into a bounded set of IPv4 addresses.
//!
//! Supported descriptors:
//! * A single IPv4 address (e.g., `192.168.1.5`).
//! * An IPv4 range (e.g., `192.168.1.1-100` or `192.168.1.1-192.168.1.100`).
//! * A CIDR block (e.g., `192.168.1.0/24`).
//!
//! A [`TargetRange`] can only be obtained through [`FromStr`], which enforces the
//! size bound. Holding one therefore means expansion cannot fail.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;

use crate::error::ScanError;
use crate::network::range::{self, Ipv4Range};

/// Largest number of candidate addresses a single target may expand to (a /16).
pub const MAX_TARGET_ADDRS: u64 = 65_536;

/// Shortest CIDR prefix accepted.
pub const MIN_CIDR_PREFIX: u8 = 16;

/// A validated, bounded set of candidate addresses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetRange {
    /// A single specific host.
    Host { target_addr: Ipv4Addr },
    /// An explicit, inclusive range of addresses.
    Range { ipv4_range: Ipv4Range },
    /// A network block. Network and broadcast addresses are not candidates.
    Cidr { network: Ipv4Network },
}

impl TargetRange {
    /// The contiguous block of candidate addresses this target denotes.
    pub fn hosts(&self) -> Ipv4Range {
        match self {
            TargetRange::Host { target_addr } => Ipv4Range::new(*target_addr, *target_addr),
            TargetRange::Range { ipv4_range } => *ipv4_range,
            TargetRange::Cidr { network } => range::usable_hosts(network.ip(), network.prefix())
                .unwrap_or_else(|_| Ipv4Range::new(network.network(), network.broadcast())),
        }
    }

    /// Expands the target into its ordered candidate addresses.
    pub fn expand(&self) -> Vec<Ipv4Addr> {
        self.hosts().iter().collect()
    }

    pub fn len(&self) -> u64 {
        self.hosts().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, addr: &Ipv4Addr) -> bool {
        self.hosts().contains(addr)
    }
}

impl fmt::Display for TargetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetRange::Host { target_addr } => write!(f, "{target_addr}"),
            TargetRange::Range { ipv4_range } => {
                write!(f, "{}-{}", ipv4_range.start_addr, ipv4_range.end_addr)
            }
            TargetRange::Cidr { network } => write!(f, "{}/{}", network.network(), network.prefix()),
        }
    }
}

impl FromStr for TargetRange {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ScanError::invalid_range(s, "empty descriptor"));
        }

        let target = if s.contains('/') {
            parse_cidr_range(s)?
        } else if s.contains('-') {
            parse_ip_range(s)?
        } else {
            parse_host(s)?
        };

        let len = target.len();
        if len == 0 {
            return Err(ScanError::invalid_range(s, "range contains no addresses"));
        }
        if len > MAX_TARGET_ADDRS {
            return Err(ScanError::invalid_range(
                s,
                format!("{len} addresses exceed the limit of {MAX_TARGET_ADDRS}"),
            ));
        }
        Ok(target)
    }
}

/// Parses `descriptor` and returns its candidate addresses in ascending order.
pub fn expand(descriptor: &str) -> Result<Vec<Ipv4Addr>, ScanError> {
    Ok(descriptor.parse::<TargetRange>()?.expand())
}

fn parse_host(s: &str) -> Result<TargetRange, ScanError> {
    match s.parse::<IpAddr>() {
        Ok(IpAddr::V4(target_addr)) => Ok(TargetRange::Host { target_addr }),
        Ok(IpAddr::V6(_)) => Err(ScanError::invalid_range(s, "only IPv4 targets are supported")),
        Err(e) => Err(ScanError::invalid_range(s, e.to_string())),
    }
}

/// Parses a range string like "1.1.1.1-2.2.2.2" or "1.1.1.1-50".
fn parse_ip_range(s: &str) -> Result<TargetRange, ScanError> {
    let Some((start_str, end_str)) = s.split_once('-') else {
        return Err(ScanError::invalid_range(s, "expected START-END"));
    };

    let start_addr = start_str
        .trim()
        .parse::<Ipv4Addr>()
        .map_err(|e| ScanError::invalid_range(s, format!("invalid start IP '{start_str}': {e}")))?;

    let end_addr = parse_range_end_addr(end_str.trim(), &start_addr)
        .map_err(|reason| ScanError::invalid_range(s, reason))?;

    if end_addr < start_addr {
        return Err(ScanError::invalid_range(s, "end address precedes start address"));
    }

    Ok(TargetRange::Range {
        ipv4_range: Ipv4Range::new(start_addr, end_addr),
    })
}

/// Helper to parse the end address of a range.
///
/// Handles abbreviated forms like "192.168.1.1-50" (implies 192.168.1.50)
/// and full forms like "192.168.1.1-192.168.1.255".
fn parse_range_end_addr(end_str: &str, start_addr: &Ipv4Addr) -> Result<Ipv4Addr, String> {
    if let Ok(full_addr) = end_str.parse::<Ipv4Addr>() {
        return Ok(full_addr);
    }

    if end_str.is_empty() {
        return Err("end of range cannot be empty".to_string());
    }

    let partial_octets: Vec<u8> = end_str
        .split('.')
        .map(|octet_str| octet_str.parse::<u8>())
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|e| format!("invalid end of range '{end_str}': {e}"))?;

    if partial_octets.len() > 4 {
        return Err(format!("end of range has too many octets: {end_str}"));
    }

    let mut end_octets = start_addr.octets();
    let start_index = 4 - partial_octets.len();
    end_octets[start_index..].copy_from_slice(&partial_octets);

    Ok(Ipv4Addr::from(end_octets))
}

/// Parses CIDR notation like "192.168.1.0/24".
fn parse_cidr_range(s: &str) -> Result<TargetRange, ScanError> {
    let Some((ip_str, prefix_str)) = s.split_once('/') else {
        return Err(ScanError::invalid_range(s, "expected NETWORK/PREFIX"));
    };

    let ipv4_addr = ip_str
        .trim()
        .parse::<Ipv4Addr>()
        .map_err(|e| ScanError::invalid_range(s, format!("invalid IP in CIDR '{ip_str}': {e}")))?;

    let prefix = prefix_str
        .trim()
        .parse::<u8>()
        .map_err(|e| ScanError::invalid_range(s, format!("invalid prefix '{prefix_str}': {e}")))?;

    if prefix < MIN_CIDR_PREFIX {
        return Err(ScanError::invalid_range(
            s,
            format!("prefix /{prefix} is wider than /{MIN_CIDR_PREFIX}"),
        ));
    }

    let network =
        Ipv4Network::new(ipv4_addr, prefix).map_err(|e| ScanError::invalid_range(s, e.to_string()))?;

    Ok(TargetRange::Cidr { network })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
