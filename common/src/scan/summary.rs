use std::collections::BTreeMap;

/// Dashboard metrics derived from a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub host_count: usize,
    pub hosts_with_open_ports: usize,
    pub high_risk_count: usize,
    pub total_open_ports: usize,
    /// How many hosts expose each port.
    pub port_frequency: BTreeMap<u16, usize>,
}

impl Summary {
    /// Ports ordered by how many hosts expose them, most common first.
    pub fn most_common_ports(&self) -> Vec<(u16, usize)> {
        let mut ports: Vec<(u16, usize)> =
            self.port_frequency.iter().map(|(p, c)| (*p, *c)).collect();
        ports.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ports
    }
}
