use std::time::{Duration, Instant};

use colored::*;
use tracing::{Instrument, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::terminal::{colors, format, print, spinner};
use lanaudit_common::config::Config;
use lanaudit_common::network::host::HostRecord;
use lanaudit_common::network::target::TargetRange;
use lanaudit_common::success;
use lanaudit_core::{ArpDiscoverer, HostDiscoverer};

pub async fn discover(target: TargetRange, cfg: &Config) -> anyhow::Result<()> {
    let span = info_span!("discovery", indicatif.pb_show = true);
    span.pb_set_style(&spinner::discovery_style()?);
    span.pb_set_message(&format!("Sweeping {} addresses of {target}", target.len()));

    let start_time: Instant = Instant::now();
    let hosts: Vec<HostRecord> = ArpDiscoverer::new(cfg.discovery_window)
        .discover(&target)
        .instrument(span)
        .await;

    discovery_ends(&hosts, start_time.elapsed(), cfg);
    Ok(())
}

fn discovery_ends(hosts: &[HostRecord], total_time: Duration, cfg: &Config) {
    if hosts.is_empty() {
        print::nothing_found("NO LIVE HOSTS ANSWERED");
        return;
    }

    if cfg.quiet > 0 {
        print::blank();
    }

    print::section("live hosts", cfg.quiet);
    if cfg.quiet < 2 {
        print_hosts(hosts);
    }
    print_summary(hosts.len(), total_time, cfg);
}

fn print_hosts(hosts: &[HostRecord]) {
    for (idx, host) in hosts.iter().enumerate() {
        print::host_tree(idx, &host.ip.to_string(), &[format::mac_to_detail(host)]);
        if idx + 1 != hosts.len() {
            print::blank();
        }
    }
}

fn print_summary(hosts_len: usize, total_time: Duration, cfg: &Config) {
    let active_hosts: ColoredString = format!("{hosts_len} active hosts").bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: ColoredString =
        format!("Discovery Complete: {active_hosts} identified in {total_time}")
            .color(colors::TEXT_DEFAULT);

    match cfg.quiet {
        0 => {
            print::rule();
            print::centered(&output.to_string());
        }
        _ => {
            print::blank();
            success!("{}", output)
        }
    }
}
