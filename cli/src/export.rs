//! CSV report of a finished run, one row per audited host.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use lanaudit_common::scan::{FlatRecord, ScanRecord};

pub fn write_csv<W: Write>(writer: W, records: &[ScanRecord]) -> anyhow::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(FlatRecord::HEADERS)?;

    for record in records {
        csv_writer.write_record(record.to_flat().fields())?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn save_csv(path: &Path, records: &[ScanRecord]) -> anyhow::Result<()> {
    let file: File = File::create(path)
        .with_context(|| format!("cannot create report file {}", path.display()))?;

    write_csv(file, records).with_context(|| format!("cannot write report {}", path.display()))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
