//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Scan templates and merge found phrases into the XLIFF catalog
//! - `init`: Write a default `.transgenrc.json`

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.args.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ExtractArgs {
    /// Directory to scan for phrases (overrides config file)
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Directory receiving <LANG>/<MODULE>.xliff (overrides config file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Catalog name (overrides config file)
    #[arg(short, long)]
    pub module: Option<String>,

    /// Catalog language code (overrides config file)
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Path or glob to skip; repeatable, values may be comma-separated
    #[arg(short, long, value_name = "PATH")]
    pub exclude: Vec<String>,

    /// Show files and lines that could not be read, and every new phrase
    #[arg(short, long, env = "TRANSGEN_DEBUG")]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub args: ExtractArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translatable phrases and update the XLIFF catalog
    Extract(ExtractCommand),
    /// Initialize a new .transgenrc.json configuration file
    Init,
}
