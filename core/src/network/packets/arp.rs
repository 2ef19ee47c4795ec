use std::net::Ipv4Addr;

use anyhow::{Context, ensure};
use lanaudit_common::network::host::HostRecord;
use pnet::packet::Packet;
use pnet::packet::arp::{ArpHardwareTypes, ArpOperations, ArpPacket, MutableArpPacket};
use pnet::packet::ethernet::{EtherTypes, EthernetPacket};
use pnet::util::MacAddr;

use super::{ARP_LEN, ETH_HDR_LEN, MIN_ETH_FRAME_NO_FCS, ethernet};

/// Builds a broadcast "who-has `dst_addr`" frame.
pub fn create_request(
    src_mac: MacAddr,
    src_addr: Ipv4Addr,
    dst_addr: Ipv4Addr,
) -> anyhow::Result<Vec<u8>> {
    let mut buffer = [0u8; MIN_ETH_FRAME_NO_FCS];
    ethernet::make_header(&mut buffer, src_mac, MacAddr::broadcast(), EtherTypes::Arp)?;

    let mut arp_packet = MutableArpPacket::new(&mut buffer[ETH_HDR_LEN..ETH_HDR_LEN + ARP_LEN])
        .context("failed to create mutable ARP packet")?;
    arp_packet.set_hardware_type(ArpHardwareTypes::Ethernet);
    arp_packet.set_protocol_type(EtherTypes::Ipv4);
    arp_packet.set_hw_addr_len(6);
    arp_packet.set_proto_addr_len(4);
    arp_packet.set_operation(ArpOperations::Request);
    arp_packet.set_sender_hw_addr(src_mac);
    arp_packet.set_target_hw_addr(MacAddr::zero());
    arp_packet.set_sender_proto_addr(src_addr);
    arp_packet.set_target_proto_addr(dst_addr);

    Ok(Vec::from(buffer))
}

/// Extracts the sender of an ARP reply from a raw ethernet frame.
pub fn parse_reply(frame: &[u8]) -> anyhow::Result<HostRecord> {
    let eth_packet = EthernetPacket::new(frame).context("truncated ethernet frame")?;
    ensure!(
        eth_packet.get_ethertype() == EtherTypes::Arp,
        "not an ARP frame (ethertype 0x{:04x})",
        eth_packet.get_ethertype().0
    );

    let arp_packet = ArpPacket::new(eth_packet.payload()).context(format!(
        "truncated or invalid ARP packet (payload len {})",
        eth_packet.payload().len()
    ))?;
    ensure!(
        arp_packet.get_operation() == ArpOperations::Reply,
        "ARP packet is not a reply"
    );

    Ok(HostRecord::new(
        arp_packet.get_sender_proto_addr(),
        arp_packet.get_sender_hw_addr(),
    ))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
