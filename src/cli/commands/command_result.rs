use std::path::PathBuf;

use crate::core::{ExtractionResult, NewPhrase, extract::ReadWarning};

#[derive(Debug)]
pub enum CommandSummary {
    Extract(ExtractSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ExtractSummary {
    /// Source root as configured, for display.
    pub source_root: String,
    pub catalog_path: PathBuf,
    pub language: String,
    pub module: String,
    /// Entries in the written catalog.
    pub phrase_count: usize,
    /// Distinct phrases found in this scan.
    pub phrases_found: usize,
    pub added: usize,
    pub existing: usize,
    pub files_scanned: usize,
    pub skipped_paths: usize,
    pub catalog_error: Option<String>,
    pub warnings: Vec<ReadWarning>,
    pub new_phrases: Vec<NewPhrase>,
    /// Verbose output was enabled by `-v` or by `debug` in the config file.
    pub debug: bool,
}

impl ExtractSummary {
    pub fn new(
        source_root: String,
        catalog_path: PathBuf,
        language: String,
        module: String,
        debug: bool,
        result: ExtractionResult,
    ) -> Self {
        Self {
            source_root,
            catalog_path,
            language,
            module,
            phrase_count: result.catalog.len(),
            phrases_found: result.phrases_found,
            added: result.stats.added,
            existing: result.stats.existing,
            files_scanned: result.files_scanned,
            skipped_paths: result.skipped_paths,
            catalog_error: result.catalog_error,
            warnings: result.warnings,
            new_phrases: result.new_phrases,
            debug,
        }
    }
}

#[derive(Debug)]
pub struct InitSummary {
    /// Set when the config file could not be created.
    pub error: Option<String>,
}

/// Result of running a transgen command
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Non-zero makes the process exit with a failure status.
    pub error_count: usize,
}
