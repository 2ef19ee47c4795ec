use std::path::Path;

use colored::*;
use tracing::{Instrument, Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::export;
use crate::terminal::input::InputHandle;
use crate::terminal::{colors, format, print, spinner};
use lanaudit_common::config::Config;
use lanaudit_common::network::target::TargetRange;
use lanaudit_common::scan::{RiskTier, ScanProfile, ScanRun, Summary};
use lanaudit_common::{success, warn};
use lanaudit_core::summary;
use lanaudit_core::{ScanEvent, ScanHandle, ScanOrchestrator};

const TOP_PORTS: usize = 10;

pub async fn scan(
    target: TargetRange,
    profile: ScanProfile,
    output: Option<&Path>,
    cfg: &Config,
) -> anyhow::Result<()> {
    let orchestrator: ScanOrchestrator = ScanOrchestrator::from_config(cfg);
    let span = info_span!("scan", indicatif.pb_show = true);
    span.pb_set_style(&spinner::discovery_style()?);

    let mut handle: ScanHandle = orchestrator.start(target, profile);
    let input: Option<InputHandle> =
        (!cfg.disable_input).then(|| InputHandle::listen(handle.stop_flag()));

    follow_progress(&mut handle, cfg).instrument(span).await?;
    drop(input);

    let run: ScanRun = handle.finish().await?;
    scan_ends(&run, cfg);

    if let Some(path) = output {
        export::save_csv(path, &run.records)?;
        success!("Report written to {}", path.display());
    }
    Ok(())
}

async fn follow_progress(handle: &mut ScanHandle, cfg: &Config) -> anyhow::Result<()> {
    let span: Span = Span::current();
    let tip: String = if cfg.disable_input {
        String::new()
    } else {
        format!(" ({})", spinner::INTERRUPT_TIP).italic().dimmed().to_string()
    };

    while let Some(event) = handle.next_event().await {
        match event {
            ScanEvent::DiscoveryStarted { candidates } => {
                span.pb_set_message(&format!("Sweeping {candidates} addresses{tip}"));
            }
            ScanEvent::DiscoveryFinished { hosts } => {
                if !hosts.is_empty() {
                    span.pb_set_style(&spinner::probe_style()?);
                    span.pb_set_length(hosts.len() as u64);
                }
                success!("{} live hosts found", hosts.len());
            }
            ScanEvent::HostStarted { index, total, ip } => {
                span.pb_set_message(&format!("Probing {ip} ({index}/{total}){tip}"));
            }
            ScanEvent::HostScanned { record, .. } => {
                span.pb_inc(1);
                if record.risk == RiskTier::High {
                    warn!("{} exposes critical services", record.ip);
                }
            }
        }
    }
    Ok(())
}

fn scan_ends(run: &ScanRun, cfg: &Config) {
    if run.interrupted {
        warn!("Scan finished early, results are partial");
    }

    if run.is_empty() {
        print::nothing_found("NO HOSTS AUDITED");
        return;
    }

    if cfg.quiet > 0 {
        print::blank();
    }

    print::section("audit results", cfg.quiet);
    match cfg.quiet {
        0 => print_record_trees(run),
        1 => run
            .records
            .iter()
            .for_each(|record| print::bullet(format::record_line(record))),
        _ => {}
    }

    print_summary(run, &summary::summarize(run));
}

fn print_record_trees(run: &ScanRun) {
    for (idx, record) in run.records.iter().enumerate() {
        print::host_tree(idx, &record.ip.to_string(), &format::record_details(record));
        if idx + 1 != run.records.len() {
            print::blank();
        }
    }
}

fn print_summary(run: &ScanRun, summary: &Summary) {
    const KEYS: [&str; 7] = [
        "Target",
        "Profile",
        "Hosts audited",
        "With open ports",
        "Open ports",
        "High risk hosts",
        "Elapsed",
    ];

    print::rule();
    let block = print::KeyValueBlock::for_keys(KEYS);
    block.row("Target", run.target.to_string().color(colors::IPV4_ADDR));
    block.row("Profile", &run.profile);
    block.row("Hosts audited", summary.host_count);
    block.row("With open ports", summary.hosts_with_open_ports);
    block.row("Open ports", summary.total_open_ports);

    let high_risk: ColoredString = if summary.high_risk_count > 0 {
        summary.high_risk_count.to_string().color(colors::RISK_HIGH).bold()
    } else {
        summary.high_risk_count.to_string().color(colors::RISK_LOW)
    };
    block.row("High risk hosts", high_risk);
    block.row("Elapsed", format!("{:.2}s", run.elapsed.as_secs_f64()).yellow());

    let frequent = summary.most_common_ports();
    if frequent.is_empty() {
        return;
    }

    print::blank();
    print::section("most common ports", 0);
    let top: Vec<(u16, usize)> = frequent.into_iter().take(TOP_PORTS).collect();
    let labels: Vec<String> = top.iter().map(|(port, _)| format!("Port {port}")).collect();
    let ports_block = print::KeyValueBlock::for_keys(labels.iter().map(String::as_str));
    for (label, (_, hosts)) in labels.iter().zip(&top) {
        let plural: &str = if *hosts == 1 { "" } else { "s" };
        ports_block.row(label, format!("{hosts} host{plural}"));
    }
}
