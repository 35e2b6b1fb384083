use std::fs;

use anyhow::{Context, Result};

use super::super::args::ExtractCommand;
use super::{CommandResult, CommandSummary, ExtractSummary};
use crate::core::ExtractionContext;

/// Scan the source tree, merge into the existing catalog and write it back.
///
/// Unreadable files and a broken previous catalog are reported but do not
/// stop the run. Failing to write the catalog does.
pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let ctx = ExtractionContext::from_args(&cmd.args)?;
    let result = ctx.run();

    if let Some(parent) = ctx.catalog_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    ctx.save(&result.catalog)?;

    let summary = ExtractSummary::new(
        ctx.config.source_root.clone(),
        ctx.catalog_path.clone(),
        ctx.config.language.clone(),
        ctx.config.module.clone(),
        ctx.verbose,
        result,
    );

    Ok(CommandResult {
        summary: CommandSummary::Extract(summary),
        error_count: 0,
    })
}
