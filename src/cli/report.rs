//! Report formatting and printing utilities.
//!
//! Separate from core logic to allow transgen to be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{CommandResult, CommandSummary, ExtractSummary, InitSummary};
use crate::config::CONFIG_FILE_NAME;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

pub fn print(result: &CommandResult, verbose: bool) {
    print_to(
        result,
        verbose,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    );
}

/// Print a command result to custom writers.
///
/// Useful for testing or redirecting output.
pub fn print_to<O: Write, E: Write>(
    result: &CommandResult,
    verbose: bool,
    out: &mut O,
    err: &mut E,
) {
    match &result.summary {
        CommandSummary::Extract(summary) => print_extract(summary, verbose, out, err),
        CommandSummary::Init(summary) => print_init(summary, out, err),
    }
}

fn print_extract<O: Write, E: Write>(
    summary: &ExtractSummary,
    verbose: bool,
    out: &mut O,
    err: &mut E,
) {
    let verbose = verbose || summary.debug;

    // Always shown: the previous translations are gone from the new catalog.
    if let Some(ref error) = summary.catalog_error {
        let _ = writeln!(
            err,
            "{} Existing catalog could not be loaded, its translations were discarded",
            "warning:".bold().yellow()
        );
        let _ = writeln!(err, "  {} {}", "-->".blue(), error);
    }

    if verbose {
        for warning in &summary.warnings {
            let _ = writeln!(
                err,
                "{} Skipped unreadable text: {}",
                "warning:".bold().yellow(),
                warning
            );
        }
        if summary.skipped_paths > 0 {
            let _ = writeln!(
                err,
                "{} {} path(s) skipped due to access errors",
                "warning:".bold().yellow(),
                summary.skipped_paths
            );
        }
        for phrase in &summary.new_phrases {
            let _ = writeln!(
                out,
                "  {} \"{}\"  {}:{} {}",
                "+".green(),
                phrase.phrase,
                phrase.file_path,
                phrase.line,
                format!("({})", phrase.pattern).dimmed()
            );
        }
    }

    let headline = format!(
        "Found {} {} ({} new, {} existing) in {} {}",
        summary.phrases_found,
        plural(summary.phrases_found, "phrase", "phrases"),
        summary.added,
        summary.existing,
        summary.files_scanned,
        plural(summary.files_scanned, "file", "files"),
    );
    let _ = writeln!(out, "{} {}", SUCCESS_MARK.green(), headline.green());
    let _ = writeln!(out, "  source:   {}", summary.source_root);
    let _ = writeln!(
        out,
        "  catalog:  {} ({} {})",
        summary.catalog_path.display(),
        summary.phrase_count,
        plural(summary.phrase_count, "phrase", "phrases")
    );
    let _ = writeln!(out, "  language: {}", summary.language);
    let _ = writeln!(out, "  module:   {}", summary.module);
}

fn print_init<O: Write, E: Write>(summary: &InitSummary, out: &mut O, err: &mut E) {
    match &summary.error {
        Some(error) => {
            let _ = writeln!(err, "Error: {}", error);
        }
        None => {
            let _ = writeln!(
                out,
                "{} {}",
                SUCCESS_MARK.green(),
                format!("Created {}", CONFIG_FILE_NAME).green()
            );
        }
    }
}

fn plural<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}
