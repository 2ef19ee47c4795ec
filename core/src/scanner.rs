//! # Scan Orchestration
//!
//! Sequences discovery, probing and classification into a single [`ScanRun`].
//!
//! Hosts are processed one after another in discovery order. Probing inside a host is
//! concurrent (see [`prober`](crate::prober)), so the host loop itself stays simple and
//! cancellation is only observed between hosts.
//!
//! [`ScanOrchestrator::run`] executes the pipeline and returns the finished run.
//! [`ScanOrchestrator::start`] executes it in the background and hands back a
//! [`ScanHandle`] that streams [`ScanEvent`]s and can stop the run early.

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use anyhow::Context;
use lanaudit_common::config::Config;
use lanaudit_common::network::host::HostRecord;
use lanaudit_common::network::target::TargetRange;
use lanaudit_common::scan::{PortSet, ScanProfile, ScanRecord, ScanRun};
use lanaudit_common::{debug, info, success, warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::classifier;
use crate::discovery::{ArpDiscoverer, HostDiscoverer};
use crate::prober::{PortProber, TcpProber};

/// Progress notifications emitted while a run is in flight.
#[derive(Debug, Clone)]
pub enum ScanEvent {
    DiscoveryStarted { candidates: u64 },
    DiscoveryFinished { hosts: Vec<HostRecord> },
    /// `index` is 1-based.
    HostStarted { index: usize, total: usize, ip: Ipv4Addr },
    HostScanned { index: usize, total: usize, record: ScanRecord },
}

#[derive(Clone)]
pub struct ScanOrchestrator {
    discoverer: Arc<dyn HostDiscoverer>,
    prober: Arc<dyn PortProber>,
}

impl ScanOrchestrator {
    pub fn new(discoverer: Arc<dyn HostDiscoverer>, prober: Arc<dyn PortProber>) -> Self {
        Self { discoverer, prober }
    }

    /// ARP discovery and TCP probing tuned by `cfg`.
    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            Arc::new(ArpDiscoverer::new(cfg.discovery_window)),
            Arc::new(TcpProber::from_config(cfg)),
        )
    }

    pub async fn run(&self, target: TargetRange, profile: ScanProfile) -> ScanRun {
        let stop: AtomicBool = AtomicBool::new(false);
        self.execute(target, profile, None, &stop).await
    }

    /// Spawns the run onto the tokio runtime.
    pub fn start(&self, target: TargetRange, profile: ScanProfile) -> ScanHandle {
        let (tx, rx) = mpsc::unbounded_channel::<ScanEvent>();
        let stop: Arc<AtomicBool> = Arc::new(AtomicBool::new(false));

        let orchestrator: ScanOrchestrator = self.clone();
        let task_stop: Arc<AtomicBool> = Arc::clone(&stop);
        let task: JoinHandle<ScanRun> = tokio::spawn(async move {
            orchestrator
                .execute(target, profile, Some(&tx), &task_stop)
                .await
        });

        ScanHandle {
            events: rx,
            stop,
            task,
        }
    }

    async fn execute(
        &self,
        target: TargetRange,
        profile: ScanProfile,
        events: Option<&mpsc::UnboundedSender<ScanEvent>>,
        stop: &AtomicBool,
    ) -> ScanRun {
        let started: Instant = Instant::now();
        let emit = |event: ScanEvent| {
            if let Some(tx) = events {
                // A dropped receiver only means nobody is watching any more.
                let _ = tx.send(event);
            }
        };

        info!("Scanning {target} ({} addresses, {profile} profile)", target.len());
        emit(ScanEvent::DiscoveryStarted {
            candidates: target.len(),
        });

        let hosts: Vec<HostRecord> = self.discoverer.discover(&target).await;
        emit(ScanEvent::DiscoveryFinished {
            hosts: hosts.clone(),
        });

        let mut run: ScanRun = ScanRun::empty(target, profile);
        if hosts.is_empty() {
            warn!("No hosts answered on {}, nothing to probe", run.target);
            run.elapsed = started.elapsed();
            return run;
        }

        let ports: Vec<u16> = run.profile.ports();
        let total: usize = hosts.len();
        for (offset, host) in hosts.into_iter().enumerate() {
            if stop.load(Ordering::Relaxed) {
                warn!("Scan stopped with {} of {total} hosts probed", run.records.len());
                run.interrupted = true;
                break;
            }

            let index: usize = offset + 1;
            emit(ScanEvent::HostStarted {
                index,
                total,
                ip: host.ip,
            });

            let record: ScanRecord = self.scan_host(host, &ports).await;
            emit(ScanEvent::HostScanned {
                index,
                total,
                record: record.clone(),
            });
            run.records.push(record);
        }

        run.elapsed = started.elapsed();
        success!(
            "Audited {} hosts on {} in {:.2}s",
            run.records.len(),
            run.target,
            run.elapsed.as_secs_f64()
        );
        run
    }

    async fn scan_host(&self, host: HostRecord, ports: &[u16]) -> ScanRecord {
        let open_ports: PortSet = match self.prober.probe(IpAddr::V4(host.ip), ports).await {
            Ok(open) => open,
            Err(e) => {
                warn!("Could not probe {}: {e:#}", host.ip);
                PortSet::new()
            }
        };
        debug!("{host}: open ports [{open_ports}]");

        let (recommendations, risk) = classifier::classify(&open_ports);
        ScanRecord {
            ip: host.ip,
            mac: host.mac,
            open_ports,
            recommendations,
            risk,
        }
    }
}

/// A run in flight. Dropping the handle detaches the run; it keeps going until done.
pub struct ScanHandle {
    events: mpsc::UnboundedReceiver<ScanEvent>,
    stop: Arc<AtomicBool>,
    task: JoinHandle<ScanRun>,
}

impl ScanHandle {
    /// `None` once the run has emitted its last event.
    pub async fn next_event(&mut self) -> Option<ScanEvent> {
        self.events.recv().await
    }

    /// Asks the run to stop before the next host. Records already produced are kept.
    pub fn cancel(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Shared flag for cancelling from another thread, e.g. a keyboard listener.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Waits for the run to complete and returns it. Unread events are discarded.
    pub async fn finish(self) -> anyhow::Result<ScanRun> {
        drop(self.events);
        self.task.await.context("scan task terminated abnormally")
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

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lanaudit_common::scan::RiskTier;
    use pnet::util::MacAddr;
    use std::sync::Mutex;

    struct FixedDiscoverer(Vec<HostRecord>);

    #[async_trait]
    impl HostDiscoverer for FixedDiscoverer {
        async fn discover(&self, _target: &TargetRange) -> Vec<HostRecord> {
            self.0.clone()
        }
    }

    /// Reports `open` for every host except those in `failing`, and records each call.
    #[derive(Default)]
    struct ScriptedProber {
        open: Vec<u16>,
        failing: Vec<Ipv4Addr>,
        calls: Mutex<Vec<(IpAddr, Vec<u16>)>>,
        stop_after: Option<(usize, Arc<AtomicBool>)>,
    }

    impl ScriptedProber {
        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl PortProber for ScriptedProber {
        async fn probe(&self, ip: IpAddr, ports: &[u16]) -> anyhow::Result<PortSet> {
            let count = {
                let mut calls = self.calls.lock().unwrap();
                calls.push((ip, ports.to_vec()));
                calls.len()
            };
            if let Some((limit, flag)) = &self.stop_after
                && count >= *limit
            {
                flag.store(true, Ordering::Relaxed);
            }
            if let IpAddr::V4(v4) = ip
                && self.failing.contains(&v4)
            {
                anyhow::bail!("unreachable");
            }
            Ok(self.open.iter().copied().filter(|p| ports.contains(p)).collect())
        }
    }

    fn host(last_octet: u8) -> HostRecord {
        HostRecord::new(
            Ipv4Addr::new(10, 0, 0, last_octet),
            MacAddr::new(0xaa, 0xbb, 0xcc, 0xdd, 0xee, last_octet),
        )
    }

    fn target() -> TargetRange {
        "10.0.0.0/24".parse().unwrap()
    }

    fn orchestrator(hosts: Vec<HostRecord>, prober: Arc<ScriptedProber>) -> ScanOrchestrator {
        ScanOrchestrator::new(Arc::new(FixedDiscoverer(hosts)), prober)
    }

    #[tokio::test]
    async fn run_builds_one_record_per_discovered_host() {
        let prober = Arc::new(ScriptedProber {
            open: vec![22, 445],
            ..Default::default()
        });
        let scanner = orchestrator(vec![host(5), host(7)], Arc::clone(&prober));

        let run = scanner.run(target(), ScanProfile::Quick).await;

        assert!(!run.interrupted);
        assert_eq!(run.host_count(), 2);
        assert_eq!(run.records[0].ip, Ipv4Addr::new(10, 0, 0, 5));
        assert_eq!(run.records[1].ip, Ipv4Addr::new(10, 0, 0, 7));
        for record in &run.records {
            assert_eq!(record.open_ports.to_vec(), vec![22, 445]);
            assert_eq!(record.recommendations.len(), 2);
            assert_eq!(record.risk, RiskTier::High);
        }

        let calls = prober.calls.lock().unwrap();
        assert!(calls.iter().all(|(_, ports)| *ports == ScanProfile::Quick.ports()));
    }

    #[tokio::test]
    async fn no_hosts_means_no_probing() {
        let prober = Arc::new(ScriptedProber::default());
        let scanner = orchestrator(Vec::new(), Arc::clone(&prober));

        let run = scanner.run(target(), ScanProfile::Full).await;

        assert!(run.is_empty());
        assert!(!run.interrupted);
        assert_eq!(prober.call_count(), 0);
    }

    #[tokio::test]
    async fn failed_host_is_kept_with_no_open_ports() {
        let prober = Arc::new(ScriptedProber {
            open: vec![80],
            failing: vec![Ipv4Addr::new(10, 0, 0, 3)],
            ..Default::default()
        });
        let scanner = orchestrator(vec![host(2), host(3), host(4)], prober);

        let run = scanner.run(target(), ScanProfile::Quick).await;

        assert_eq!(run.host_count(), 3);
        let failed = &run.records[1];
        assert_eq!(failed.ip, Ipv4Addr::new(10, 0, 0, 3));
        assert!(failed.open_ports.is_empty());
        assert!(failed.recommendations.is_empty());
        assert_eq!(failed.risk, RiskTier::Low);
        assert_eq!(run.records[2].open_ports.to_vec(), vec![80]);
    }

    #[tokio::test]
    async fn stop_flag_is_checked_between_hosts() {
        let stop = Arc::new(AtomicBool::new(false));
        let prober = Arc::new(ScriptedProber {
            stop_after: Some((2, Arc::clone(&stop))),
            ..Default::default()
        });
        let scanner = orchestrator(vec![host(1), host(2), host(3), host(4)], Arc::clone(&prober));

        let run = scanner.execute(target(), ScanProfile::Quick, None, &stop).await;

        assert!(run.interrupted);
        assert_eq!(run.host_count(), 2);
        assert_eq!(prober.call_count(), 2);
    }

    #[tokio::test]
    async fn start_streams_events_in_order() {
        let prober = Arc::new(ScriptedProber {
            open: vec![443],
            ..Default::default()
        });
        let scanner = orchestrator(vec![host(9), host(10)], prober);

        let mut handle = scanner.start(target(), ScanProfile::Quick);
        let mut events: Vec<ScanEvent> = Vec::new();
        while let Some(event) = handle.next_event().await {
            events.push(event);
        }
        let run = handle.finish().await.unwrap();

        assert_eq!(events.len(), 6);
        assert!(matches!(events[0], ScanEvent::DiscoveryStarted { candidates: 254 }));
        assert!(matches!(&events[1], ScanEvent::DiscoveryFinished { hosts } if hosts.len() == 2));
        assert!(matches!(events[2], ScanEvent::HostStarted { index: 1, total: 2, .. }));
        assert!(matches!(events[5], ScanEvent::HostScanned { index: 2, total: 2, .. }));
        assert_eq!(run.host_count(), 2);
        assert!(!run.interrupted);
    }

    #[tokio::test]
    async fn cancel_before_probing_keeps_no_records() {
        let prober = Arc::new(ScriptedProber::default());
        let scanner = orchestrator(vec![host(1), host(2)], Arc::clone(&prober));

        // The spawned task cannot run before the first await on a current-thread runtime.
        let handle = scanner.start(target(), ScanProfile::Quick);
        handle.cancel();
        assert!(handle.is_cancelled());
        let run = handle.finish().await.unwrap();

        assert!(run.interrupted);
        assert!(run.is_empty());
        assert_eq!(prober.call_count(), 0);
    }

    #[test]
    fn orchestrator_can_be_shared_across_tasks() {
        fn assert_shareable<T: Send + Sync + 'static>() {}
        assert_shareable::<ScanOrchestrator>();
    }
}
