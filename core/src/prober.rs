//! # Port Probing
//!
//! TCP connect checks against a single host through a bounded worker pool.
//!
//! At most `concurrency` attempts are in flight at once no matter how many ports are
//! requested, so a full 1-1024 sweep never opens 1024 sockets simultaneously. Worst
//! case wall time is `ceil(ports / concurrency) * timeout`.

use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use lanaudit_common::config::{Config, DEFAULT_CONCURRENCY, DEFAULT_PROBE_TIMEOUT};
use lanaudit_common::scan::PortSet;
use lanaudit_common::{debug, warn};

use crate::network::tcp::{self, ProbeOutcome};

#[async_trait]
pub trait PortProber: Send + Sync {
    /// Returns the open subset of `ports`. An error means the host as a whole could not
    /// be probed.
    async fn probe(&self, ip: IpAddr, ports: &[u16]) -> anyhow::Result<PortSet>;
}

#[derive(Debug, Clone, Copy)]
pub struct TcpProber {
    concurrency: usize,
    timeout: Duration,
}

impl TcpProber {
    pub fn new(concurrency: usize, timeout: Duration) -> Self {
        if concurrency == 0 {
            warn!("Concurrency of 0 requested, probing one port at a time");
        }
        Self {
            concurrency: concurrency.max(1),
            timeout,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.concurrency, cfg.probe_timeout)
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    async fn probe_all(&self, ip: IpAddr, ports: &[u16]) -> Vec<(u16, ProbeOutcome)> {
        let probe_timeout: Duration = self.timeout;
        probe_ports(ip, ports, self.concurrency, |addr| {
            tcp::connect_probe(addr, probe_timeout)
        })
        .await
    }
}

/// Runs `attempt` once per port with at most `concurrency` attempts in flight.
/// Outcomes come back in completion order.
pub async fn probe_ports<F, Fut>(
    ip: IpAddr,
    ports: &[u16],
    concurrency: usize,
    attempt: F,
) -> Vec<(u16, ProbeOutcome)>
where
    F: Fn(SocketAddr) -> Fut,
    Fut: Future<Output = ProbeOutcome>,
{
    stream::iter(ports.iter().copied())
        .map(|port| {
            let outcome = attempt(SocketAddr::new(ip, port));
            async move { (port, outcome.await) }
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await
}

/// Keeps the open ports. Fails only when every attempt ended in an error.
fn open_ports(ip: IpAddr, outcomes: &[(u16, ProbeOutcome)]) -> anyhow::Result<PortSet> {
    let mut open: PortSet = PortSet::new();
    let mut failures: usize = 0;
    for (port, outcome) in outcomes {
        match outcome {
            ProbeOutcome::Open => {
                open.insert(*port);
            }
            ProbeOutcome::NotOpen => {}
            ProbeOutcome::Error(reason) => {
                failures += 1;
                debug!("{ip}:{port} not open ({reason})");
            }
        }
    }

    anyhow::ensure!(
        outcomes.is_empty() || failures < outcomes.len(),
        "{ip} did not answer any of {} connection attempts",
        outcomes.len()
    );

    Ok(open)
}

impl Default for TcpProber {
    fn default() -> Self {
        Self::new(DEFAULT_CONCURRENCY, DEFAULT_PROBE_TIMEOUT)
    }
}

#[async_trait]
impl PortProber for TcpProber {
    async fn probe(&self, ip: IpAddr, ports: &[u16]) -> anyhow::Result<PortSet> {
        let outcomes: Vec<(u16, ProbeOutcome)> = self.probe_all(ip, ports).await;
        open_ports(ip, &outcomes)
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
