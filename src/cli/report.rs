//! Report formatting and printing utilities.
//!
//! Separate from the pipeline so resgen can be used as a library.

use std::{
    io::{self, Write},
    path::Path,
};

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use super::commands::{CommandResult, CommandSummary, GenerateSummary, InitSummary};
use crate::{
    config::CONFIG_FILE_NAME,
    conflicts::{Conflict, Severity, filter_by_severity},
    core::{ResourceMetadata, ScanResult},
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print a command result. Scan reports go to stdout; generate keeps stdout
/// for the rendered file and reports on stderr.
pub fn print(result: &CommandResult, verbose: bool) -> Result<()> {
    match &result.summary {
        CommandSummary::Scan(summary) if summary.json => {
            let mut out = io::stdout().lock();
            print_scan_json_to(&summary.result, &mut out)?;
        }
        CommandSummary::Scan(summary) => {
            print_scan_to(&summary.result, verbose, &mut io::stdout().lock());
        }
        CommandSummary::Generate(summary) => {
            print_generate_to(
                summary,
                verbose,
                &mut io::stdout().lock(),
                &mut io::stderr().lock(),
            );
        }
        CommandSummary::Init(summary) => print_init(summary),
    }
    Ok(())
}

/// Discovered declarations, conflicts and the scan message.
pub fn print_scan_to<W: Write>(result: &ScanResult, verbose: bool, writer: &mut W) {
    if verbose {
        print_metadata_to("resource", &result.resources, writer);
        print_metadata_to("page", &result.pages, writer);
    }

    print_conflicts_to(result.all_conflicts(), writer);
    print_severity_summary_to(result, writer);

    let line = if result.success {
        format!("{} {}", SUCCESS_MARK.green(), result.message.green())
    } else {
        format!("{} {}", FAILURE_MARK.red(), result.message.red())
    };
    let _ = writeln!(writer, "{}", line);
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScanReport<'a> {
    success: bool,
    message: &'a str,
    resources: &'a [ResourceMetadata],
    pages: &'a [ResourceMetadata],
    conflicts: &'a [Conflict],
    page_conflicts: &'a [Conflict],
}

pub fn print_scan_json_to<W: Write>(result: &ScanResult, writer: &mut W) -> Result<()> {
    let report = ScanReport {
        success: result.success,
        message: &result.message,
        resources: &result.resources,
        pages: &result.pages,
        conflicts: &result.conflicts,
        page_conflicts: &result.page_conflicts,
    };
    writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    Ok(())
}

/// Conflicts in cargo-style format.
pub fn print_conflicts_to<'a, W: Write>(
    conflicts: impl IntoIterator<Item = &'a Conflict>,
    writer: &mut W,
) {
    for conflict in conflicts {
        let severity = match conflict.severity {
            Severity::Error => "error".bold().red(),
            Severity::Warning => "warning".bold().yellow(),
            Severity::Info => "info".bold().blue(),
        };

        let _ = writeln!(
            writer,
            "{}[{}]: {}",
            severity,
            conflict.conflict_type,
            conflict.message
        );

        for r in &conflict.resources {
            let _ = writeln!(
                writer,
                "  {} {} ({})",
                "-->".blue(),
                display_path(&r.file_path),
                r.qualified_name()
            );
        }

        let mut suggestion = conflict.suggestion.lines();
        if let Some(first) = suggestion.next() {
            let _ = writeln!(writer, "   {} {} {}", "=".blue(), "help:".bold(), first);
            for line in suggestion {
                let _ = writeln!(writer, "           {}", line);
            }
        }
        let _ = writeln!(writer);
    }
}

fn print_severity_summary_to<W: Write>(result: &ScanResult, writer: &mut W) {
    let count = |severity| {
        filter_by_severity(&result.conflicts, severity).len()
            + filter_by_severity(&result.page_conflicts, severity).len()
    };
    let (errors, warnings, infos) = (
        count(Severity::Error),
        count(Severity::Warning),
        count(Severity::Info),
    );
    if errors + warnings + infos == 0 {
        return;
    }

    let _ = writeln!(
        writer,
        "{} {}, {} {}, {} info",
        errors,
        if errors == 1 { "error" } else { "errors" },
        warnings,
        if warnings == 1 { "warning" } else { "warnings" },
        infos
    );
}

fn print_metadata_to<W: Write>(kind: &str, metadata: &[ResourceMetadata], writer: &mut W) {
    for m in metadata {
        let _ = writeln!(
            writer,
            "{} {} /{}  {}",
            format!("{}:", kind).bold().cyan(),
            m.qualified_name(),
            m.slug,
            display_path(&m.file_path).dimmed()
        );
    }
}

/// Generate output: the rendered file (dry-run) goes to `out`, everything
/// else to `err`.
pub fn print_generate_to<O: Write, E: Write>(
    summary: &GenerateSummary,
    verbose: bool,
    out: &mut O,
    err: &mut E,
) {
    if verbose {
        print_metadata_to("resource", &summary.scan.resources, err);
        print_metadata_to("page", &summary.scan.pages, err);
    }

    print_conflicts_to(summary.scan.all_conflicts(), err);
    print_severity_summary_to(&summary.scan, err);

    match &summary.generation {
        None => {
            let _ = writeln!(
                err,
                "{} {}",
                FAILURE_MARK.red(),
                summary.scan.message.red()
            );
        }
        Some(generation) => {
            if let Some(rendered) = &generation.rendered {
                let _ = write!(out, "{}", rendered);
            }
            let message = generation.message.replace(
                &generation.file_path.display().to_string(),
                &display_path(&generation.file_path),
            );
            let _ = writeln!(err, "{} {}", SUCCESS_MARK.green(), message.green());
        }
    }
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
    }
}

/// `path` relative to the working directory when it lies below it.
fn display_path(path: &Path) -> String {
    let relative = std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf));
    relative.as_deref().unwrap_or(path).display().to_string()
}
