//! # IPv4 Range Model
//!
//! A continuous, inclusive range of IPv4 addresses. Used by
//! [`TargetRange`](crate::network::target::TargetRange) for both explicit ranges
//! (`192.168.1.1-100`) and CIDR blocks (`192.168.1.0/24`).

use std::net::Ipv4Addr;

use pnet::ipnetwork::Ipv4Network;

/// Represents a continuous range of IPv4 addresses, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    /// Number of addresses covered. Zero when `end_addr` precedes `start_addr`.
    pub fn len(&self) -> u64 {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        if end < start {
            return 0;
        }
        u64::from(end - start) + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, addr: &Ipv4Addr) -> bool {
        (self.start_addr..=self.end_addr).contains(addr)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Ipv4Addr> + Clone {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        (start..=end).map(Ipv4Addr::from)
    }
}

/// Creates the range covering an entire network block (network through broadcast).
pub fn cidr_range(ip: Ipv4Addr, prefix: u8) -> anyhow::Result<Ipv4Range> {
    let network = Ipv4Network::new(ip, prefix)?;
    Ok(Ipv4Range::new(network.network(), network.broadcast()))
}

/// Same as [`cidr_range`] but without the network and broadcast addresses.
///
/// Blocks of two or fewer addresses (/31, /32) have no reserved addresses and are
/// returned whole.
pub fn usable_hosts(ip: Ipv4Addr, prefix: u8) -> anyhow::Result<Ipv4Range> {
    let full = cidr_range(ip, prefix)?;
    if prefix >= 31 {
        return Ok(full);
    }
    let start: u32 = u32::from(full.start_addr) + 1;
    let end: u32 = u32::from(full.end_addr) - 1;
    Ok(Ipv4Range::new(Ipv4Addr::from(start), Ipv4Addr::from(end)))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cidr_range_masks_host_bits() {
        let range = cidr_range(Ipv4Addr::new(192, 168, 1, 77), 24).unwrap();
        assert_eq!(range.start_addr, Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(range.end_addr, Ipv4Addr::new(192, 168, 1, 255));
        assert_eq!(range.len(), 256);
    }

    #[test]
    fn cidr_range_rejects_prefix_over_32() {
        assert!(cidr_range(Ipv4Addr::new(10, 0, 0, 0), 33).is_err());
    }

    #[test]
    fn usable_hosts_strips_network_and_broadcast() {
        let range = usable_hosts(Ipv4Addr::new(10, 0, 0, 0), 30).unwrap();
        assert_eq!(range.start_addr, Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(range.end_addr, Ipv4Addr::new(10, 0, 0, 2));
        assert_eq!(range.len(), 2);
    }

    #[test]
    fn usable_hosts_keeps_point_to_point_blocks_whole() {
        assert_eq!(usable_hosts(Ipv4Addr::new(10, 0, 0, 4), 31).unwrap().len(), 2);
        assert_eq!(usable_hosts(Ipv4Addr::new(10, 0, 0, 4), 32).unwrap().len(), 1);
    }

    #[test]
    fn reversed_range_is_empty() {
        let range = Ipv4Range::new(Ipv4Addr::new(10, 0, 0, 9), Ipv4Addr::new(10, 0, 0, 1));
        assert!(range.is_empty());
        assert_eq!(range.len(), 0);
    }

    #[test]
    fn iter_is_inclusive_and_ordered() {
        let range = Ipv4Range::new(Ipv4Addr::new(10, 0, 0, 254), Ipv4Addr::new(10, 0, 1, 1));
        let ips: Vec<Ipv4Addr> = range.iter().collect();
        assert_eq!(
            ips,
            vec![
                Ipv4Addr::new(10, 0, 0, 254),
                Ipv4Addr::new(10, 0, 0, 255),
                Ipv4Addr::new(10, 0, 1, 0),
                Ipv4Addr::new(10, 0, 1, 1),
            ]
        );
        assert!(range.contains(&Ipv4Addr::new(10, 0, 0, 255)));
        assert!(!range.contains(&Ipv4Addr::new(10, 0, 1, 2)));
    }
}
