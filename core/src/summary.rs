//! # Result Aggregation
//!
//! Dashboard metrics over a finished run. Pure and independent of record order.

use std::collections::BTreeMap;

use lanaudit_common::scan::{RiskTier, ScanRecord, ScanRun, Summary};

pub fn summarize(run: &ScanRun) -> Summary {
    summarize_records(&run.records)
}

pub fn summarize_records(records: &[ScanRecord]) -> Summary {
    let mut port_frequency: BTreeMap<u16, usize> = BTreeMap::new();
    for port in records.iter().flat_map(|record| record.open_ports.iter()) {
        *port_frequency.entry(port).or_default() += 1;
    }

    Summary {
        host_count: records.len(),
        hosts_with_open_ports: records.iter().filter(|r| !r.open_ports.is_empty()).count(),
        high_risk_count: records.iter().filter(|r| r.risk == RiskTier::High).count(),
        total_open_ports: records.iter().map(|r| r.open_ports.len()).sum(),
        port_frequency,
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
