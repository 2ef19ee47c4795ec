//! # Risk Classification
//!
//! Pure mapping from a host's open ports to mitigation advice and a risk tier.

use lanaudit_common::scan::{PortSet, RiskTier};

/// Ports whose exposure alone makes a host high risk: FTP, Telnet, SMB and RDP.
pub const CRITICAL_PORTS: [u16; 4] = [21, 23, 445, 3389];

pub const GENERIC_ADVICE: &str = "Service detected: perform a manual audit.";

const ADVICE: &[(u16, &str)] = &[
    (21, "FTP (insecure): use SFTP or disable it if not needed."),
    (22, "SSH: make sure key-based authentication is used instead of passwords."),
    (23, "TELNET (critical): disable immediately and use SSH instead."),
    (80, "HTTP: web service, keep the server patched."),
    (443, "HTTPS: secure, check the TLS certificate expiry date."),
    (445, "SMB: high ransomware risk, restrict access to local addresses only."),
    (3306, "MySQL: never expose the database to public networks."),
    (3389, "RDP (remote desktop): put it behind a VPN, never expose it directly."),
];

/// Advice for a single open port.
pub fn recommendation(port: u16) -> &'static str {
    ADVICE
        .iter()
        .find(|(known, _)| *known == port)
        .map_or(GENERIC_ADVICE, |(_, advice)| advice)
}

pub fn risk_tier(open_ports: &PortSet) -> RiskTier {
    if CRITICAL_PORTS.iter().any(|port| open_ports.contains(*port)) {
        RiskTier::High
    } else {
        RiskTier::Low
    }
}

/// One recommendation per open port, in port order, and the host's risk tier.
pub fn classify(open_ports: &PortSet) -> (Vec<String>, RiskTier) {
    let recommendations: Vec<String> = open_ports
        .iter()
        .map(|port| recommendation(port).to_string())
        .collect();

    (recommendations, risk_tier(open_ports))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
