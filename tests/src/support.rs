#![cfg(test)]

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Mutex;

use async_trait::async_trait;
use lanaudit_common::network::host::HostRecord;
use lanaudit_common::network::target::TargetRange;
use lanaudit_common::scan::PortSet;
use lanaudit_core::{HostDiscoverer, PortProber};
use pnet::util::MacAddr;

/// Discovery that "finds" a fixed set of hosts.
pub struct SimulatedDiscovery(pub Vec<HostRecord>);

#[async_trait]
impl HostDiscoverer for SimulatedDiscovery {
    async fn discover(&self, _target: &TargetRange) -> Vec<HostRecord> {
        self.0.clone()
    }
}

/// Probing that reports `open` as listening on every host, except `unreachable` ones
/// which fail outright. Yields once per call so other tasks get to run.
#[derive(Default)]
pub struct SimulatedProbing {
    pub open: Vec<u16>,
    pub unreachable: Vec<Ipv4Addr>,
    pub probed: Mutex<Vec<IpAddr>>,
}

impl SimulatedProbing {
    pub fn with_open(open: &[u16]) -> Self {
        Self {
            open: open.to_vec(),
            ..Default::default()
        }
    }

    pub fn probed(&self) -> Vec<IpAddr> {
        self.probed.lock().unwrap().clone()
    }
}

#[async_trait]
impl PortProber for SimulatedProbing {
    async fn probe(&self, ip: IpAddr, ports: &[u16]) -> anyhow::Result<PortSet> {
        self.probed.lock().unwrap().push(ip);
        tokio::task::yield_now().await;

        if let IpAddr::V4(v4) = ip {
            if self.unreachable.contains(&v4) {
                anyhow::bail!("host {v4} unreachable");
            }
        }
        Ok(self
            .open
            .iter()
            .copied()
            .filter(|port| ports.contains(port))
            .collect())
    }
}

pub fn host(ip: [u8; 4], mac: [u8; 6]) -> HostRecord {
    HostRecord::new(
        Ipv4Addr::from(ip),
        MacAddr::new(mac[0], mac[1], mac[2], mac[3], mac[4], mac[5]),
    )
}

pub fn hosts_on_ten_net(count: u8) -> Vec<HostRecord> {
    (1..=count)
        .map(|i| host([10, 0, 0, i], [0x02, 0, 0, 0, 0, i]))
        .collect()
}
