use std::fmt;
use std::net::Ipv4Addr;

use pnet::util::MacAddr;

/// A live host as reported by link-layer discovery. Identity is the IP address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostRecord {
    pub ip: Ipv4Addr,
    pub mac: MacAddr,
}

impl HostRecord {
    pub fn new(ip: Ipv4Addr, mac: MacAddr) -> Self {
        Self { ip, mac }
    }
}

impl fmt::Display for HostRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.ip, self.mac)
    }
}
