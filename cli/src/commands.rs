pub mod discover;
pub mod scan;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use lanaudit_common::config::{
    Config, DEFAULT_CONCURRENCY, DEFAULT_DISCOVERY_WINDOW, DEFAULT_PROBE_TIMEOUT,
};
use lanaudit_common::network::target::TargetRange;
use lanaudit_common::scan::ScanProfile;

#[derive(Parser)]
#[command(name = "lanaudit", version)]
#[command(about = "Audits the hosts of a local network for exposed services.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Reduce output; repeat for the summary only
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Do not listen for 'q' to finish a scan early
    #[arg(long, global = true)]
    pub no_input: bool,

    /// How long to wait for ARP replies, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_DISCOVERY_WINDOW.as_millis() as u64, global = true)]
    pub discovery_timeout: u64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find live hosts with an ARP sweep
    #[command(alias = "d")]
    Discover { target: TargetRange },
    /// Discover hosts, probe their ports and assess the risk
    #[command(alias = "s")]
    Scan {
        /// Address, range (10.0.0.1-50) or CIDR block (10.0.0.0/24)
        target: TargetRange,

        /// quick, full (1-1024) or a port list such as 22,80,8000-8010
        #[arg(short = 'P', long, default_value = "quick")]
        profile: ScanProfile,

        /// Timeout of a single connection attempt, in milliseconds
        #[arg(short, long, value_name = "MS", default_value_t = DEFAULT_PROBE_TIMEOUT.as_millis() as u64)]
        timeout: u64,

        /// Connection attempts in flight per host
        #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,

        /// Write the results to a CSV file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        let mut cfg: Config = Config {
            no_banner: self.no_banner,
            quiet: self.quiet,
            disable_input: self.no_input,
            discovery_window: Duration::from_millis(self.discovery_timeout),
            ..Config::default()
        };

        if let Commands::Scan {
            timeout,
            concurrency,
            ..
        } = &self.command
        {
            cfg.probe_timeout = Duration::from_millis(*timeout);
            cfg.concurrency = *concurrency;
        }

        cfg
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
    use clap::CommandFactory;

    #[test]
    fn command_line_is_consistent() {
        CommandLine::command().debug_assert();
    }

    #[test]
    fn scan_arguments_reach_the_config() {
        let cli = CommandLine::try_parse_from([
            "lanaudit", "-qq", "--no-input", "scan", "10.0.0.0/24", "-P", "full", "-t", "250",
            "-c", "8",
        ])
        .unwrap();
        let cfg = cli.to_config();

        assert_eq!(cfg.quiet, 2);
        assert!(cfg.disable_input);
        assert_eq!(cfg.probe_timeout, Duration::from_millis(250));
        assert_eq!(cfg.concurrency, 8);
        assert_eq!(cfg.discovery_window, DEFAULT_DISCOVERY_WINDOW);
        match cli.command {
            Commands::Scan {
                target, profile, ..
            } => {
                assert_eq!(target.to_string(), "10.0.0.0/24");
                assert_eq!(profile, ScanProfile::Full);
            }
            Commands::Discover { .. } => panic!("expected scan"),
        }
    }

    #[test]
    fn discover_keeps_probe_defaults() {
        let cli = CommandLine::try_parse_from([
            "lanaudit", "d", "192.168.1.1-20", "--discovery-timeout", "500",
        ])
        .unwrap();
        let cfg = cli.to_config();

        assert_eq!(cfg.discovery_window, Duration::from_millis(500));
        assert_eq!(cfg.probe_timeout, DEFAULT_PROBE_TIMEOUT);
        assert_eq!(cfg.concurrency, DEFAULT_CONCURRENCY);
    }

    #[test]
    fn malformed_target_is_rejected_before_anything_runs() {
        assert!(CommandLine::try_parse_from(["lanaudit", "scan", "10.0.0.0/33"]).is_err());
        assert!(CommandLine::try_parse_from(["lanaudit", "scan", "fe80::1"]).is_err());
        assert!(CommandLine::try_parse_from(["lanaudit", "scan", "10.0.0.1", "-P", "0"]).is_err());
    }
}
