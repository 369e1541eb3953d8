//! Terminal output that is not a log line.
//!
//! Everything goes through [`print`], which routes the text through the
//! logging sink so it never tears through the spinner.

use std::fmt::Display;

use colored::*;
use tracing::info;

use crate::terminal::colors;

pub const TOTAL_WIDTH: usize = 64;

pub fn print(msg: &str) {
    info!(target: "rexec::print", raw_msg = msg);
}

pub fn blank() {
    print("");
}

/// Centers `label` on a line of `fill` that is [`TOTAL_WIDTH`] wide.
fn rule(fill: &str, label: ColoredString) -> String {
    let width = console::measure_text_width(&label);
    let pad = TOTAL_WIDTH.saturating_sub(width);
    let left = fill.repeat(pad / 2).color(colors::SEPARATOR);
    let right = fill.repeat(pad - pad / 2).color(colors::SEPARATOR);
    format!("{left}{label}{right}")
}

pub fn banner(no_banner: bool, q_level: u8) {
    if no_banner || q_level > 0 {
        return;
    }
    let label = format!("⟦ REXEC v{} ⟧", env!("CARGO_PKG_VERSION"));
    print(&rule("═", label.bright_green().bold()));
}

pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }
    let label = format!("⟦ {} ⟧", msg.to_uppercase());
    print(&rule("─", label.color(colors::PRIMARY)));
}

pub fn fat_separator() {
    print(&"═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR).to_string());
}

pub fn status(msg: impl AsRef<str>) {
    let prefix = ">".color(colors::SEPARATOR);
    print(&format!("{prefix} {}", msg.as_ref()));
}

/// Prints `key....: value` lines with the dots aligned on the longest key.
pub fn aligned_lines<V: Display>(pairs: &[(&str, V)]) {
    let width = pairs.iter().map(|(key, _)| key.len()).max().unwrap_or(0);

    for (key, value) in pairs {
        let dots = ".".repeat(width + 1 - key.len());
        status(format!(
            "{}{}{} {}",
            key.color(colors::PRIMARY),
            dots.color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value
        ));
    }
}

pub fn tree_head(idx: usize, name: &str) {
    print(&format!(
        "{}{}{} {}",
        "[".color(colors::SEPARATOR),
        idx.to_string().color(colors::ACCENT),
        "]".color(colors::SEPARATOR),
        name.color(colors::PRIMARY)
    ));
}

/// One level of `├─ key: value` branches under a [`tree_head`].
pub fn tree(pairs: Vec<(String, ColoredString)>) {
    let width = pairs.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let last = pairs.len().saturating_sub(1);

    for (i, (key, value)) in pairs.iter().enumerate() {
        let branch = if i == last { "└─" } else { "├─" };
        print(&format!(
            " {} {}{}{} {}",
            branch.color(colors::SEPARATOR),
            key.color(colors::TEXT_DEFAULT),
            ".".repeat(width - key.len()).color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value
        ));
    }
}

pub fn centerln(msg: &str) {
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{space}{msg}"));
}

pub fn no_findings() {
    centerln(&"no findings".red().bold().to_string());
}
