use indicatif::ProgressStyle;

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

pub const INTERRUPT_TIP: &str = "press 'q' to finish early";

/// Indeterminate phase, while ARP replies are still coming in.
pub fn discovery_style() -> anyhow::Result<ProgressStyle> {
    Ok(ProgressStyle::with_template("{spinner:.blue} {msg} {elapsed:.dim}")?.tick_strings(TICKS))
}

/// One tick per audited host.
pub fn probe_style() -> anyhow::Result<ProgressStyle> {
    Ok(
        ProgressStyle::with_template("{spinner:.blue} {msg} [{bar:24.green/white}] {pos}/{len}")?
            .tick_strings(TICKS)
            .progress_chars("━╸ "),
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
