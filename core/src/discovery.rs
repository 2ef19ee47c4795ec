//! # Host Discovery
//!
//! Finds live hosts on the local segment with a single ARP sweep.
//!
//! A request for every candidate address is broadcast up front, then replies are
//! collected for a fixed window. There are no retries: a host that stays silent for
//! the whole window is not part of the audit.
//!
//! Failures never reach the caller. Missing privileges, a missing interface or a
//! broken channel all log an error and yield an empty host list, which is
//! indistinguishable from a subnet with no live hosts.

use std::collections::BTreeMap;
use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lanaudit_common::config::DEFAULT_DISCOVERY_WINDOW;
use lanaudit_common::error::DiscoveryError;
use lanaudit_common::network::host::HostRecord;
use lanaudit_common::network::target::TargetRange;
use lanaudit_common::{debug, error, success};
use pnet::datalink::{DataLinkReceiver, DataLinkSender};
use pnet::util::MacAddr;

use crate::network::packets::arp;
use crate::network::{channel, interface};

#[async_trait]
pub trait HostDiscoverer: Send + Sync {
    /// Returns the hosts that answered, ordered by address. Never fails.
    async fn discover(&self, target: &TargetRange) -> Vec<HostRecord>;
}

/// Link-layer discovery over a raw ethernet channel.
#[derive(Debug, Clone, Copy)]
pub struct ArpDiscoverer {
    window: Duration,
}

impl ArpDiscoverer {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }
}

impl Default for ArpDiscoverer {
    fn default() -> Self {
        Self::new(DEFAULT_DISCOVERY_WINDOW)
    }
}

#[async_trait]
impl HostDiscoverer for ArpDiscoverer {
    async fn discover(&self, target: &TargetRange) -> Vec<HostRecord> {
        let target: TargetRange = target.clone();
        let window: Duration = self.window;

        let result = tokio::task::spawn_blocking(move || arp_sweep(&target, window))
            .await
            .map_err(|e| DiscoveryError::Worker(e.to_string()))
            .and_then(|res| res);

        match result {
            Ok(hosts) => hosts,
            Err(e) => {
                error!("Discovery error: {e}");
                Vec::new()
            }
        }
    }
}

fn arp_sweep(target: &TargetRange, window: Duration) -> Result<Vec<HostRecord>, DiscoveryError> {
    let (intf, net) = interface::find_lan_interface(target)?;
    let src_mac: MacAddr = intf.mac.ok_or(DiscoveryError::NoInterface)?;
    let mut handle = channel::open(&intf)?;

    let candidates: Vec<Ipv4Addr> = target.expand();
    let sent = send_requests(handle.tx.as_mut(), src_mac, net.ip(), &candidates)?;
    debug!("Sent {sent} ARP requests on {}", intf.name);

    let hosts = collect_replies(handle.rx.as_mut(), window, target);
    success!("{} of {} addresses answered on {}", hosts.len(), candidates.len(), intf.name);
    Ok(hosts)
}

/// Broadcasts one request per candidate. Individual send failures are skipped.
fn send_requests(
    tx: &mut dyn DataLinkSender,
    src_mac: MacAddr,
    src_addr: Ipv4Addr,
    candidates: &[Ipv4Addr],
) -> Result<usize, DiscoveryError> {
    let mut sent: usize = 0;
    for &dst_addr in candidates {
        let packet = arp::create_request(src_mac, src_addr, dst_addr)
            .map_err(|e| DiscoveryError::Packet(format!("{e:#}")))?;
        match tx.send_to(&packet, None) {
            Some(Err(e)) => debug!("ARP request for {dst_addr} failed: {e}"),
            _ => sent += 1,
        }
    }
    Ok(sent)
}

/// Listens until `window` elapses. A later reply for the same address replaces an
/// earlier one.
fn collect_replies(
    rx: &mut dyn DataLinkReceiver,
    window: Duration,
    target: &TargetRange,
) -> Vec<HostRecord> {
    let mut replies: BTreeMap<Ipv4Addr, MacAddr> = BTreeMap::new();
    let deadline: Instant = Instant::now() + window;

    while Instant::now() < deadline {
        let Ok(frame) = rx.next() else {
            continue;
        };
        if let Ok(host) = arp::parse_reply(frame)
            && target.contains(&host.ip)
        {
            replies.insert(host.ip, host.mac);
        }
    }

    replies
        .into_iter()
        .map(|(ip, mac)| HostRecord::new(ip, mac))
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
