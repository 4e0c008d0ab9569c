//! Leading-flag handling and the banner/status lines shared by the tools.

use std::io::{self, Write};
use std::process;

use crate::record::RecordWriter;

pub const VENDOR: &str = "diam Systems Ltd";
pub const YEAR: i64 = 2026;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    pub json: bool,
    /// Index of the first argument that is not a recognized flag.
    pub next: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagScan {
    Version { json: bool },
    Run(Flags),
}

/// Scans `args` (program name at index 0) up to the first argument that is not a flag.
pub fn scan(args: &[String], supports_json: bool) -> FlagScan {
    let mut json = false;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--version" => return FlagScan::Version { json },
            "-J" | "--json" if supports_json => json = true,
            _ => break,
        }
        i += 1;
    }
    FlagScan::Run(Flags { json, next: i })
}

/// Like `scan`, but `--version` prints the banner and ends the process.
pub fn consume_flags(tool: &str, args: &[String], supports_json: bool) -> Flags {
    match scan(args, supports_json) {
        FlagScan::Run(flags) => flags,
        FlagScan::Version { json } => {
            let _ = print_version(tool, json, &mut io::stdout());
            process::exit(0)
        }
    }
}

pub fn print_version(tool: &str, json: bool, out: &mut dyn Write) -> io::Result<()> {
    if !json {
        return writeln!(out, "{} (c) {} {}", tool, VENDOR, YEAR);
    }
    let mut w = RecordWriter::begin(out)?;
    w.field_str("command", tool)?
        .field_str("vendor", VENDOR)?
        .field_int("year", YEAR)?;
    w.end()
}

pub fn emit_status(
    tool: &str,
    event: &str,
    target: Option<&str>,
    status: &str,
    json: bool,
    out: &mut dyn Write,
) -> io::Result<()> {
    if !json {
        return writeln!(out, "{}: {} {} {}", tool, event, target.unwrap_or(""), status);
    }
    let mut w = RecordWriter::begin(out)?;
    w.field_str("command", tool)?.field_str("event", event)?;
    if let Some(target) = target {
        w.field_str("target", target)?;
    }
    w.field_str("status", status)?;
    w.end()
}
