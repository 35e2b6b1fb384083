//! Extraction-and-merge engine.
//!
//! - `file_scanner`: recursive file enumeration with exclusions
//! - `patterns` / `extract`: phrase matching and normalization
//! - `catalog`: ordered translation map and the additive merge
//! - `xliff`: catalog loading and writing
//! - `context`: the run pipeline tying them together

pub mod catalog;
pub mod context;
pub mod extract;
pub mod file_scanner;
pub mod patterns;
pub mod xliff;

pub use catalog::{Catalog, MergeOutcome, MergeStats};
pub use context::{ExtractionContext, ExtractionResult, NewPhrase};
