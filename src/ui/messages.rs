//! Coloured status lines for the terminal.

use crate::core::session::ScriptReport;
use std::fmt;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

#[derive(Debug, Clone, Copy)]
enum Tone {
    Info,
    Ok,
    Warn,
    Err,
}

impl Tone {
    fn style(self) -> (&'static str, &'static str) {
        match self {
            Tone::Info => ("\x1b[34m", "ℹ️"),
            Tone::Ok => ("\x1b[32m", "✅"),
            Tone::Warn => ("\x1b[33m", "⚠️"),
            Tone::Err => ("\x1b[31m", "❌"),
        }
    }
}

fn render<T: fmt::Display>(tone: Tone, msg: T) -> String {
    let (color, icon) = tone.style();
    format!("{color}{BOLD}{icon} {RESET}{msg}")
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", render(Tone::Info, msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", render(Tone::Ok, msg));
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}", render(Tone::Warn, msg));
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", render(Tone::Err, msg));
}

pub fn header<T: fmt::Display>(msg: T) {
    println!("{BOLD}=== {msg} ==={RESET}");
}

/// One-line verdict for a finished run.
pub fn summary_line(report: &ScriptReport) -> String {
    let tables = if report.tables.is_empty() {
        "-".to_string()
    } else {
        report.tables.join(", ")
    };
    format!(
        "{} accounts, {} logged failures, tables: {}",
        report.accounts.len(),
        report.failures.len(),
        tables
    )
}

/// Print what a finished run did: a header, the batch result and the summary.
pub fn print_report(connection: &str, report: &ScriptReport) {
    header(format!("session '{connection}'"));

    if let Some(id) = report.first_id {
        info(format!("first account id: {id}"));
    }

    if report.batch.committed {
        info(format!("batch committed: {} rows", report.batch.inserted.len()));
    } else {
        warning("batch not committed");
    }

    if report.failures.is_empty() {
        success(summary_line(report));
    } else {
        for f in &report.failures {
            warning(f);
        }
        warning(summary_line(report));
    }
}
