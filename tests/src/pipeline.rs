#![cfg(test)]

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use lanaudit_common::network::target::TargetRange;
use lanaudit_common::scan::{RiskTier, ScanProfile, ScanRun};
use lanaudit_core::summary::summarize;
use lanaudit_core::{ScanEvent, ScanOrchestrator};

use crate::support::{SimulatedDiscovery, SimulatedProbing, host, hosts_on_ten_net};

fn target() -> TargetRange {
    "10.0.0.0/24".parse().unwrap()
}

#[tokio::test]
async fn single_host_end_to_end() {
    let discovery = SimulatedDiscovery(vec![host(
        [10, 0, 0, 5],
        [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff],
    )]);
    let probing = Arc::new(SimulatedProbing::with_open(&[22, 80]));
    let scanner = ScanOrchestrator::new(Arc::new(discovery), probing.clone());

    let run: ScanRun = scanner.run(target(), ScanProfile::Quick).await;

    assert_eq!(run.host_count(), 1);
    assert!(!run.interrupted);
    let record = &run.records[0];
    assert_eq!(record.ip, Ipv4Addr::new(10, 0, 0, 5));
    assert_eq!(record.open_ports.to_vec(), vec![22, 80]);
    assert_eq!(record.recommendations.len(), 2);
    assert_eq!(record.risk, RiskTier::Low);

    let flat = record.to_flat();
    assert_eq!(flat.ip, "10.0.0.5");
    assert_eq!(flat.mac, "AA:BB:CC:DD:EE:FF");
    assert_eq!(flat.open_ports, "22, 80");
    assert_eq!(flat.risk, "Low");

    let summary = summarize(&run);
    assert_eq!(summary.host_count, 1);
    assert_eq!(summary.hosts_with_open_ports, 1);
    assert_eq!(summary.high_risk_count, 0);
    assert_eq!(summary.total_open_ports, 2);
    assert_eq!(probing.probed(), vec![IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5))]);
}

#[tokio::test]
async fn empty_discovery_skips_probing() {
    let probing = Arc::new(SimulatedProbing::with_open(&[22]));
    let scanner = ScanOrchestrator::new(Arc::new(SimulatedDiscovery(Vec::new())), probing.clone());

    let run = scanner.run(target(), ScanProfile::Full).await;

    assert!(run.is_empty());
    assert!(!run.interrupted);
    assert!(probing.probed().is_empty());
    assert_eq!(summarize(&run).host_count, 0);
}

#[tokio::test]
async fn unreachable_host_keeps_its_record() {
    let probing = Arc::new(SimulatedProbing {
        open: vec![23, 80],
        unreachable: vec![Ipv4Addr::new(10, 0, 0, 2)],
        ..Default::default()
    });
    let scanner = ScanOrchestrator::new(Arc::new(SimulatedDiscovery(hosts_on_ten_net(3))), probing);

    let run = scanner.run(target(), ScanProfile::Quick).await;

    assert_eq!(run.host_count(), 3);
    let unreachable = &run.records[1];
    assert_eq!(unreachable.ip, Ipv4Addr::new(10, 0, 0, 2));
    assert!(unreachable.open_ports.is_empty());
    assert_eq!(unreachable.risk, RiskTier::Low);
    assert_eq!(unreachable.to_flat().open_ports, "None");

    let summary = summarize(&run);
    assert_eq!(summary.high_risk_count, 2);
    assert_eq!(summary.port_frequency.get(&23), Some(&2));
}

#[tokio::test]
async fn custom_profile_limits_probed_ports() {
    let probing = Arc::new(SimulatedProbing::with_open(&[22, 8080, 3389]));
    let scanner = ScanOrchestrator::new(Arc::new(SimulatedDiscovery(hosts_on_ten_net(1))), probing);
    let profile: ScanProfile = "22,8000-8100".parse().unwrap();

    let run = scanner.run(target(), profile).await;

    assert_eq!(run.records[0].open_ports.to_vec(), vec![22, 8080]);
    assert_eq!(run.records[0].risk, RiskTier::Low);
}

#[tokio::test]
async fn cancelling_mid_run_keeps_finished_hosts() {
    let scanner = ScanOrchestrator::new(
        Arc::new(SimulatedDiscovery(hosts_on_ten_net(4))),
        Arc::new(SimulatedProbing::with_open(&[80])),
    );

    let mut handle = scanner.start(target(), ScanProfile::Quick);
    while let Some(event) = handle.next_event().await {
        if let ScanEvent::HostScanned { index: 1, .. } = event {
            handle.cancel();
            break;
        }
    }
    let run = handle.finish().await.unwrap();

    assert!(run.interrupted);
    assert!(run.host_count() >= 1);
    assert!(run.host_count() < 4);
    assert_eq!(run.records[0].ip, Ipv4Addr::new(10, 0, 0, 1));
}

#[tokio::test]
async fn event_stream_reports_every_host() {
    let scanner = ScanOrchestrator::new(
        Arc::new(SimulatedDiscovery(hosts_on_ten_net(3))),
        Arc::new(SimulatedProbing::with_open(&[445])),
    );

    let mut handle = scanner.start(target(), ScanProfile::Quick);
    let mut scanned: Vec<Ipv4Addr> = Vec::new();
    while let Some(event) = handle.next_event().await {
        if let ScanEvent::HostScanned { record, total, .. } = event {
            assert_eq!(total, 3);
            assert_eq!(record.risk, RiskTier::High);
            scanned.push(record.ip);
        }
    }
    let run = handle.finish().await.unwrap();

    let recorded: Vec<Ipv4Addr> = run.records.iter().map(|r| r.ip).collect();
    assert_eq!(scanned, recorded);
    assert!(!run.interrupted);
}
