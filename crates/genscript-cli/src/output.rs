// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! CLI output styling.
//!
//! Respects `--no-color` and the NO_COLOR and FORCE_COLOR environment
//! variables. Colors are automatically disabled when output is piped.

use colored::{ColoredString, Colorize};

/// Initialize color support. Call once at startup.
pub fn init(no_color: bool) {
    if no_color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    } else if std::env::var_os("FORCE_COLOR").is_some() {
        colored::control::set_override(true);
    }
}

// === Error Output ===

pub fn error_label() -> ColoredString {
    "error".red().bold()
}

// === Banners ===

pub fn banner_ok(phase: &str) -> String {
    format!(
        "{} {} {}",
        "===".dimmed(),
        format!("{} OK", phase).green().bold(),
        "===".dimmed()
    )
}

pub fn banner_fail(phase: &str, count: usize) -> String {
    let msg = if count == 1 {
        format!("{} FAILED: 1 diagnostic", phase)
    } else {
        format!("{} FAILED: {} diagnostics", phase, count)
    };
    format!("{} {} {}", "===".dimmed(), msg.red().bold(), "===".dimmed())
}

// === Reference Output ===

pub fn title(name: &str) -> ColoredString {
    name.bold()
}

pub fn section_header(header: &str) -> ColoredString {
    header.yellow().bold()
}

pub fn command(name: &str) -> ColoredString {
    name.green()
}

pub fn arg(name: &str) -> ColoredString {
    name.cyan()
}
