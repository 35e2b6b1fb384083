use std::{
    collections::HashSet,
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result, bail};
use rayon::prelude::*;

use crate::{
    cli::args::ExtractArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        Catalog, MergeOutcome, MergeStats,
        extract::{FileExtraction, PhraseFilter, ReadWarning, extract_file},
        file_scanner::{ExclusionSet, scan_files},
        xliff::{CatalogHeader, catalog_path, load_catalog, write_catalog},
    },
};

/// A phrase added to the catalog by this run, and where it was first seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPhrase {
    pub phrase: String,
    pub file_path: String,
    pub line: usize,
    pub pattern: &'static str,
}

/// Everything one extraction run produced, ready to be written and reported.
#[derive(Debug)]
pub struct ExtractionResult {
    /// Previous catalog merged with this scan.
    pub catalog: Catalog,
    /// Why the previous catalog could not be loaded, if it could not.
    pub catalog_error: Option<String>,
    pub files_scanned: usize,
    /// Paths the walker could not access.
    pub skipped_paths: usize,
    pub warnings: Vec<ReadWarning>,
    /// Distinct phrases found in the source tree.
    pub phrases_found: usize,
    /// Distinct phrases that were new vs already in the catalog.
    pub stats: MergeStats,
    pub new_phrases: Vec<NewPhrase>,
}

/// One extraction run over a source tree.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g., `--lang en_US`)
/// 2. `.transgenrc.json` config file
/// 3. Built-in defaults
///
/// Exclusions from the CLI are added to those from the config file.
pub struct ExtractionContext {
    pub config: Config,
    pub source_root: PathBuf,
    pub catalog_path: PathBuf,
    pub verbose: bool,
    exclusions: ExclusionSet,
    filter: PhraseFilter,
}

impl ExtractionContext {
    /// Build a context from command line arguments and the config file found
    /// from the current directory upward.
    pub fn from_args(args: &ExtractArgs) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to determine current directory")?;
        let config_result = load_config(&cwd)?;

        let mut config = config_result.config;
        let verbose = args.verbose || config.debug;

        if verbose && !config_result.from_file {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }

        if let Some(ref source) = args.source {
            config.source_root = source.to_string_lossy().to_string();
        }
        if let Some(ref output) = args.output {
            config.output_root = output.to_string_lossy().to_string();
        }
        if let Some(ref module) = args.module {
            config.module = module.clone();
        }
        if let Some(ref lang) = args.lang {
            config.language = lang.clone();
        }
        config.excludes.extend(args.exclude.iter().cloned());
        config.debug = verbose;

        config.validate()?;
        Self::new(config)
    }

    pub fn new(config: Config) -> Result<Self> {
        let source_root = PathBuf::from(&config.source_root);
        if !source_root.is_dir() {
            bail!("Source directory does not exist: {}", source_root.display());
        }

        let verbose = config.debug;
        let exclusions = ExclusionSet::new(&source_root, &config.excludes, verbose);
        let catalog_path = catalog_path(
            Path::new(&config.output_root),
            &config.language,
            &config.module,
        );
        let filter = PhraseFilter::new(config.module.clone());

        Ok(Self {
            config,
            source_root,
            catalog_path,
            verbose,
            exclusions,
            filter,
        })
    }

    pub fn header(&self) -> CatalogHeader {
        CatalogHeader::new(self.config.module.clone(), self.config.language.clone())
    }

    /// Enumerate, extract and merge.
    ///
    /// Files are read and matched in parallel, but results are merged in the
    /// scanner's sorted order, so new phrases are numbered exactly as a
    /// sequential scan would number them.
    pub fn run(&self) -> ExtractionResult {
        let load = load_catalog(&self.catalog_path);
        let mut catalog = load.catalog;

        let scan = scan_files(&self.source_root, &self.exclusions, self.verbose);

        let extractions: Vec<(String, FileExtraction)> = scan
            .files
            .par_iter()
            .map(|path| {
                (
                    path.to_string_lossy().to_string(),
                    extract_file(path, &self.filter),
                )
            })
            .collect();

        let mut stats = MergeStats::default();
        let mut seen: HashSet<String> = HashSet::new();
        let mut warnings = Vec::new();
        let mut new_phrases = Vec::new();

        for (file_path, extraction) in extractions {
            warnings.extend(extraction.warnings);

            for candidate in extraction.candidates {
                // Repeats are already in the catalog and already counted.
                if !seen.insert(candidate.phrase.clone()) {
                    continue;
                }
                let outcome = catalog.merge(&candidate.phrase);
                stats.record(outcome);
                if outcome == MergeOutcome::Added {
                    new_phrases.push(NewPhrase {
                        phrase: candidate.phrase,
                        file_path: file_path.clone(),
                        line: candidate.line,
                        pattern: candidate.pattern,
                    });
                }
            }
        }

        ExtractionResult {
            catalog,
            catalog_error: load.error,
            files_scanned: scan.files.len(),
            skipped_paths: scan.skipped_count,
            warnings,
            phrases_found: seen.len(),
            stats,
            new_phrases,
        }
    }

    /// Write the merged catalog. The output directory must exist.
    pub fn save(&self, catalog: &Catalog) -> Result<()> {
        write_catalog(&self.catalog_path, catalog, &self.header())
    }
}
