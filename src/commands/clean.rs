//! The `clean` subcommand: plan, confirm, delete.

use anyhow::{Context, Result};
use dialoguer::Confirm;
use log::{info, warn};

use crate::cli::CleanOpts;
use crate::constants::PRUNE_PREVIEW_LIMIT;
use crate::prep::{execute_prune, plan_prune, PruneKind};

pub fn run(opts: &CleanOpts) -> Result<()> {
    info!("Scanning {}", opts.path.display());
    let items = plan_prune(&opts.path)?;

    if items.is_empty() {
        info!("Nothing to delete - directories are already clean.");
        return Ok(());
    }

    let files = items.iter().filter(|i| i.kind == PruneKind::File).count();
    let dirs = items.len() - files;
    info!(
        "Found {} item(s) to delete ({} files, {} directories):",
        items.len(),
        files,
        dirs
    );
    for item in items.iter().take(PRUNE_PREVIEW_LIMIT) {
        info!("  {}", item.path.display());
    }
    if items.len() > PRUNE_PREVIEW_LIMIT {
        info!("  ... and {} more", items.len() - PRUNE_PREVIEW_LIMIT);
    }

    if !opts.yes {
        let confirmed = Confirm::new()
            .with_prompt("Delete these items?")
            .default(false)
            .interact()
            .context("failed to read confirmation from terminal")?;
        if !confirmed {
            info!("Cancelled - nothing deleted.");
            return Ok(());
        }
    }

    let stats = execute_prune(&items);
    info!("Deleted {} item(s)", stats.deleted);
    if stats.errors > 0 {
        warn!("{} item(s) could not be deleted", stats.errors);
    }
    Ok(())
}
