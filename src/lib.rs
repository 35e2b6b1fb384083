//! Transgen - translation catalog generator for template files
//!
//! Transgen scans a tree of template files for translatable phrases
//! (`{% trans %}` blocks, `|trans` filters, `__()` and `translate()` calls)
//! and merges them into an XLIFF 1.2 catalog, keeping every translation that
//! was already saved there.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction-and-merge engine

pub mod cli;
pub mod config;
pub mod core;
