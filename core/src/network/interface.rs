//! Picks the local interface an ARP sweep has to leave through.

use lanaudit_common::error::DiscoveryError;
use lanaudit_common::network::range::Ipv4Range;
use lanaudit_common::network::target::TargetRange;
use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::{IpNetwork, Ipv4Network};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ViabilityError {
    /// The interface is operationally down.
    IsDown,
    /// Loopback cannot carry ARP.
    IsLoopback,
    /// The interface does not have a MAC address.
    NoMacAddress,
    /// The interface does not support broadcast (required for ARP).
    NotBroadcast,
    /// The interface is a point-to-point link (e.g., a VPN).
    IsPointToPoint,
    /// The interface has no IPv4 network to source requests from.
    NoIpv4,
}

/// Finds the interface whose IPv4 network overlaps `target`, along with that network.
pub fn find_lan_interface(
    target: &TargetRange,
) -> Result<(NetworkInterface, Ipv4Network), DiscoveryError> {
    let interfaces: Vec<NetworkInterface> = datalink::interfaces();
    select_for_target(&interfaces, target).ok_or(DiscoveryError::NoInterface)
}

pub fn select_for_target(
    interfaces: &[NetworkInterface],
    target: &TargetRange,
) -> Option<(NetworkInterface, Ipv4Network)> {
    let hosts: Ipv4Range = target.hosts();

    interfaces
        .iter()
        .filter(|interface| is_viable_lan_interface(interface).is_ok())
        .find_map(|interface| {
            interface.ips.iter().find_map(|net| match net {
                IpNetwork::V4(v4) if overlaps(v4, &hosts) => Some((interface.clone(), *v4)),
                _ => None,
            })
        })
}

fn overlaps(net: &Ipv4Network, hosts: &Ipv4Range) -> bool {
    net.network() <= hosts.end_addr && hosts.start_addr <= net.broadcast()
}

fn is_viable_lan_interface(interface: &NetworkInterface) -> Result<(), ViabilityError> {
    if !interface.is_up() {
        return Err(ViabilityError::IsDown);
    }
    if interface.is_loopback() {
        return Err(ViabilityError::IsLoopback);
    }
    if interface.mac.is_none() {
        return Err(ViabilityError::NoMacAddress);
    }
    if !interface.is_broadcast() {
        return Err(ViabilityError::NotBroadcast);
    }
    if interface.is_point_to_point() {
        return Err(ViabilityError::IsPointToPoint);
    }
    if !interface.ips.iter().any(IpNetwork::is_ipv4) {
        return Err(ViabilityError::NoIpv4);
    }
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
