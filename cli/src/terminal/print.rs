//! Terminal layout of the audit output.
//!
//! Every line goes out through the [`logging::PRINT_TARGET`] target so it interleaves
//! with progress bars instead of tearing them.

use std::fmt::Display;

use crate::terminal::format::Detail;
use crate::terminal::{colors, logging};
use colored::*;
use tracing::info;
use unicode_width::UnicodeWidthStr;

pub const TOTAL_WIDTH: usize = 64;

pub fn print(msg: &str) {
    info!(target: logging::PRINT_TARGET, "{msg}");
}

pub fn blank() {
    print("");
}

pub fn banner(no_banner: bool, quiet: u8) {
    if no_banner || quiet > 0 {
        return;
    }

    let title: String = format!("⟦ LANAUDIT v{} ⟧", env!("CARGO_PKG_VERSION"));
    let side: usize = TOTAL_WIDTH.saturating_sub(UnicodeWidthStr::width(title.as_str())) / 2;
    let sep: ColoredString = "═".repeat(side).bright_black();

    print(&format!("{sep}{}{sep}", title.bright_green().bold()));
    centered(&"local network security audit".color(colors::SECONDARY).italic().to_string());
}

/// Section title, hidden in quiet modes.
pub fn section(title: &str, quiet: u8) {
    if quiet == 0 {
        print(&section_line(title));
    }
}

fn section_line(title: &str) -> String {
    let label: String = format!(" {} ", title.to_uppercase());
    let fill: usize = TOTAL_WIDTH.saturating_sub(UnicodeWidthStr::width(label.as_str()) + 2);
    format!(
        "{}{}{}",
        "━━".bright_black(),
        label.bright_green().bold(),
        "━".repeat(fill).bright_black()
    )
}

pub fn rule() {
    print(&"═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR).to_string());
}

pub fn centered(msg: &str) {
    let pad: String = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{pad}{msg}"));
}

pub fn bullet(msg: impl AsRef<str>) {
    print(&format!("{} {}", "•".color(colors::SEPARATOR), msg.as_ref()));
}

/// Key/value rows with the keys padded to a common width.
pub struct KeyValueBlock {
    key_width: usize,
}

impl KeyValueBlock {
    pub fn for_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        let key_width: usize = keys.into_iter().map(UnicodeWidthStr::width).max().unwrap_or(0);
        Self { key_width }
    }

    pub fn row(&self, key: &str, value: impl Display) {
        print(&self.render(key, value));
    }

    fn render(&self, key: &str, value: impl Display) -> String {
        let dots: String = ".".repeat(self.key_width.saturating_sub(key.width()) + 1);
        format!(
            "{} {}{}{} {}",
            ">".color(colors::SEPARATOR),
            key.color(colors::PRIMARY),
            dots.color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value
        )
    }
}

/// One host as a numbered head line with its details hanging below.
pub fn host_tree(idx: usize, title: &str, details: &[Detail]) {
    for line in tree_lines(idx, title, details) {
        print(&line);
    }
}

fn tree_lines(idx: usize, title: &str, details: &[Detail]) -> Vec<String> {
    let key_width: usize = details.iter().map(|(key, _)| key.width()).max().unwrap_or(0);
    let head: String = format!(
        "{}{}{} {}",
        "[".color(colors::SEPARATOR),
        (idx + 1).to_string().color(colors::ACCENT),
        "]".color(colors::SEPARATOR),
        title.color(colors::IPV4_ADDR).bold()
    );

    let mut lines: Vec<String> = vec![head];
    for (i, (key, value)) in details.iter().enumerate() {
        let branch: &str = if i + 1 == details.len() { "└─" } else { "├─" };
        lines.push(format!(
            " {} {}{} {}",
            branch.bright_black(),
            key.color(colors::TEXT_DEFAULT),
            " ".repeat(key_width - key.width()),
            value
        ));
    }
    lines
}

/// Framed notice for a run that produced nothing to show.
pub fn nothing_found(message: &str) {
    for line in boxed(message) {
        print(&line.red().bold().to_string());
    }
}

fn boxed(message: &str) -> Vec<String> {
    let inner: usize = UnicodeWidthStr::width(message) + 4;
    vec![
        format!("╔{}╗", "═".repeat(inner)),
        format!("║  {message}  ║"),
        format!("╚{}╝", "═".repeat(inner)),
    ]
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
