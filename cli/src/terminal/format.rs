//! Conversion of audit records into colored tree details.

use colored::*;
use lanaudit_common::network::host::HostRecord;
use lanaudit_common::scan::{PortSet, RiskTier, ScanRecord};
use lanaudit_core::classifier::CRITICAL_PORTS;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

pub fn mac_to_detail(host: &HostRecord) -> Detail {
    (
        "MAC".to_string(),
        host.mac.to_string().to_uppercase().color(colors::MAC_ADDR),
    )
}

pub fn risk_colored(risk: RiskTier) -> ColoredString {
    match risk {
        RiskTier::Low => risk.to_string().color(colors::RISK_LOW),
        RiskTier::High => risk.to_string().color(colors::RISK_HIGH).bold(),
    }
}

/// Critical ports stand out from the rest of the list.
pub fn ports_colored(ports: &PortSet) -> ColoredString {
    if ports.is_empty() {
        return "none".dimmed();
    }

    let rendered: Vec<String> = ports
        .iter()
        .map(|port| {
            if CRITICAL_PORTS.contains(&port) {
                port.to_string().color(colors::RISK_HIGH).bold().to_string()
            } else {
                port.to_string().color(colors::ACCENT).to_string()
            }
        })
        .collect();

    rendered.join(&", ".color(colors::SEPARATOR).to_string()).normal()
}

/// MAC, ports, risk, then one entry per recommendation.
pub fn record_details(record: &ScanRecord) -> Vec<Detail> {
    let host: HostRecord = HostRecord::new(record.ip, record.mac);
    let mut details: Vec<Detail> = vec![
        mac_to_detail(&host),
        ("Ports".to_string(), ports_colored(&record.open_ports)),
        ("Risk".to_string(), risk_colored(record.risk)),
    ];

    details.extend(
        record
            .recommendations
            .iter()
            .map(|advice| ("Advice".to_string(), advice.color(colors::TEXT_DEFAULT))),
    );

    details
}

/// Single line used by the compact (`-q`) listing.
pub fn record_line(record: &ScanRecord) -> String {
    format!(
        "{} {} [{}] {}",
        format!("{:<15}", record.ip).color(colors::IPV4_ADDR),
        record.mac.to_string().to_uppercase().color(colors::MAC_ADDR),
        ports_colored(&record.open_ports),
        risk_colored(record.risk)
    )
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
    use pnet::util::MacAddr;
    use std::net::Ipv4Addr;

    fn record(ports: &[u16], risk: RiskTier, advice: &[&str]) -> ScanRecord {
        ScanRecord {
            ip: Ipv4Addr::new(192, 168, 1, 20),
            mac: MacAddr::new(0xaa, 0xbb, 0xcc, 0x01, 0x02, 0x03),
            open_ports: ports.iter().copied().collect(),
            recommendations: advice.iter().map(|a| a.to_string()).collect(),
            risk,
        }
    }

    #[test]
    fn details_hold_one_advice_entry_per_recommendation() {
        let details = record_details(&record(&[22, 80], RiskTier::Low, &["ssh", "http"]));
        let keys: Vec<&str> = details.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["MAC", "Ports", "Risk", "Advice", "Advice"]);
    }

    #[test]
    fn plain_rendering_without_colors() {
        colored::control::set_override(false);
        let rec = record(&[23, 80], RiskTier::High, &[]);

        assert_eq!(ports_colored(&rec.open_ports).to_string(), "23, 80");
        assert_eq!(ports_colored(&PortSet::new()).to_string(), "none");
        assert_eq!(risk_colored(RiskTier::High).to_string(), "High");
        assert_eq!(mac_to_detail(&HostRecord::new(rec.ip, rec.mac)).1.to_string(), "AA:BB:CC:01:02:03");
    }
}
