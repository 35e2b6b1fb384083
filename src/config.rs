use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::file_scanner::is_glob_pattern;

pub const CONFIG_FILE_NAME: &str = ".transgenrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory scanned for template files.
    #[serde(default = "default_source_root")]
    pub source_root: String,
    /// Directory receiving `<language>/<module>.xliff`.
    #[serde(default = "default_output_root")]
    pub output_root: String,
    /// Catalog base name. Also never accepted as a phrase.
    #[serde(default = "default_module")]
    pub module: String,
    #[serde(default = "default_language", alias = "lang")]
    pub language: String,
    /// Literal paths (relative to `sourceRoot` or absolute) or glob patterns.
    #[serde(default)]
    pub excludes: Vec<String>,
    #[serde(default)]
    pub debug: bool,
}

fn default_source_root() -> String {
    "src".to_string()
}

fn default_output_root() -> String {
    "out".to_string()
}

fn default_module() -> String {
    "messages".to_string()
}

fn default_language() -> String {
    "ru_RU".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            output_root: default_output_root(),
            module: default_module(),
            language: default_language(),
            excludes: Vec::new(),
            debug: false,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if the module or language is blank, or if any glob
    /// pattern in `excludes` is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.module.trim().is_empty() {
            bail!("'module' must not be empty");
        }
        if self.language.trim().is_empty() {
            bail!("'language' must not be empty");
        }

        // Entries without wildcards are literal paths and need no validation.
        for pattern in &self.excludes {
            if is_glob_pattern(pattern) {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'excludes': \"{}\"", pattern)
                })?;
            }
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
