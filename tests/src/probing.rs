#![cfg(test)]

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

use lanaudit_common::network::target::TargetRange;
use lanaudit_common::scan::{RiskTier, ScanProfile};
use lanaudit_core::{PortProber, ScanOrchestrator, TcpProber};
use tokio::net::TcpListener;

use crate::support::{SimulatedDiscovery, host};

async fn listener() -> (TcpListener, u16) {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, port)
}

#[tokio::test]
async fn tcp_prober_is_order_independent_on_loopback() {
    let (_first, open_a) = listener().await;
    let (_second, open_b) = listener().await;
    let (closed_listener, closed) = listener().await;
    drop(closed_listener);

    let prober = TcpProber::new(4, Duration::from_millis(500));
    let localhost = IpAddr::V4(Ipv4Addr::LOCALHOST);

    let forward = prober.probe(localhost, &[open_a, closed, open_b]).await.unwrap();
    let backward = prober.probe(localhost, &[open_b, closed, open_a]).await.unwrap();

    assert_eq!(forward, backward);
    assert!(forward.contains(open_a));
    assert!(forward.contains(open_b));
    assert!(!forward.contains(closed));
}

#[tokio::test]
async fn loopback_host_audited_with_real_probing() {
    let (_listening, open) = listener().await;
    let (closed_listener, closed) = listener().await;
    drop(closed_listener);

    let discovery = SimulatedDiscovery(vec![host([127, 0, 0, 1], [0, 0, 0, 0, 0, 0])]);
    let scanner = ScanOrchestrator::new(
        Arc::new(discovery),
        Arc::new(TcpProber::new(2, Duration::from_millis(500))),
    );
    let target: TargetRange = "127.0.0.1".parse().unwrap();

    let run = scanner.run(target, ScanProfile::Custom(vec![open, closed])).await;

    assert_eq!(run.host_count(), 1);
    assert_eq!(run.records[0].open_ports.to_vec(), vec![open]);
    assert_eq!(run.records[0].recommendations.len(), 1);
    assert_eq!(run.records[0].risk, RiskTier::Low);
}
