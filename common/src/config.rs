use std::time::Duration;

/// How long discovery listens for ARP replies.
pub const DEFAULT_DISCOVERY_WINDOW: Duration = Duration::from_millis(2_000);
/// Upper bound of a single TCP connection attempt.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(500);
/// Concurrent connection attempts per host.
pub const DEFAULT_CONCURRENCY: usize = 50;

#[derive(Debug, Clone)]
pub struct Config {
    /// Suppresses the start-up banner.
    pub no_banner: bool,
    /// 0 prints everything, 1 compacts the host listing, 2 prints the summary only.
    pub quiet: u8,
    /// Disables the keyboard listener that allows finishing a scan early.
    pub disable_input: bool,
    pub discovery_window: Duration,
    pub probe_timeout: Duration,
    pub concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            no_banner: false,
            quiet: 0,
            disable_input: false,
            discovery_window: DEFAULT_DISCOVERY_WINDOW,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}
