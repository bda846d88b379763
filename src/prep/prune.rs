//! Pruning of processed collection directories.
//!
//! Collections are laid out as `base/<year>/<month>/...`. After packaging,
//! each month directory should hold only its `.zip` archives and the
//! `SimpleArchiveFormat/` package; everything else is working residue.
//! Pruning is two-phase: plan first, delete only after the caller
//! confirms.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::warn;

use crate::constants::{PRUNE_KEEP_DIR, PRUNE_KEEP_EXTENSION};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneKind {
    File,
    Directory,
}

/// One filesystem entry slated for deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneItem {
    pub path: PathBuf,
    pub kind: PruneKind,
}

/// Tally of an executed prune.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PruneStats {
    pub deleted: usize,
    pub errors: usize,
}

/// Scan `base/<year>/<month>` directories and list everything that should
/// be deleted. Hidden directories are skipped; `.zip` files and
/// `SimpleArchiveFormat/` directories are kept.
pub fn plan_prune(base: &Path) -> Result<Vec<PruneItem>> {
    if !base.is_dir() {
        bail!("directory does not exist: {}", base.display());
    }

    let mut items = Vec::new();
    for year in sorted_subdirs(base)? {
        for month in sorted_subdirs(&year)? {
            let entries = fs::read_dir(&month).with_context(|| {
                format!("failed to read month directory {}", month.display())
            })?;
            for entry in entries {
                let entry = entry
                    .with_context(|| format!("failed to read entry in {}", month.display()))?;
                let path = entry.path();
                if path.is_file() {
                    if path.extension().and_then(|e| e.to_str()) == Some(PRUNE_KEEP_EXTENSION) {
                        continue;
                    }
                    items.push(PruneItem {
                        path,
                        kind: PruneKind::File,
                    });
                } else if path.is_dir() {
                    if entry.file_name() == PRUNE_KEEP_DIR {
                        continue;
                    }
                    items.push(PruneItem {
                        path,
                        kind: PruneKind::Directory,
                    });
                }
            }
        }
    }

    items.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(items)
}

/// Delete the planned items. Individual failures are logged and counted,
/// never fatal; the remaining items are still attempted.
pub fn execute_prune(items: &[PruneItem]) -> PruneStats {
    let mut stats = PruneStats::default();
    for item in items {
        let result = match item.kind {
            PruneKind::File => fs::remove_file(&item.path),
            PruneKind::Directory => fs::remove_dir_all(&item.path),
        };
        match result {
            Ok(()) => stats.deleted += 1,
            Err(e) => {
                warn!("failed to delete {}: {}", item.path.display(), e);
                stats.errors += 1;
            }
        }
    }
    stats
}

/// Non-hidden subdirectories of `dir`, in name order.
fn sorted_subdirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read entry in {}", dir.display()))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        dirs.push(path);
    }
    dirs.sort();
    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_plan_keeps_zips_and_saf_dirs() {
        let temp = TempDir::new().unwrap();
        let month = temp.path().join("1935").join("04");
        touch(&month.join("issue.zip"));
        touch(&month.join("scratch.txt"));
        touch(&month.join("SimpleArchiveFormat").join("item_000").join("contents"));
        touch(&month.join("tmpwork").join("page1.tif"));

        let items = plan_prune(temp.path()).unwrap();
        let paths: Vec<_> = items
            .iter()
            .map(|i| i.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(paths, vec!["scratch.txt", "tmpwork"]);
    }

    #[test]
    fn test_plan_skips_hidden_directories() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join(".git").join("04").join("junk.txt"));
        touch(&temp.path().join("1935").join(".cache").join("junk.txt"));

        let items = plan_prune(temp.path()).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_plan_missing_base_errors() {
        let temp = TempDir::new().unwrap();
        let result = plan_prune(&temp.path().join("missing"));
        assert!(result.is_err());
    }

    #[test]
    fn test_clean_tree_has_empty_plan() {
        let temp = TempDir::new().unwrap();
        let month = temp.path().join("1935").join("04");
        touch(&month.join("issue.zip"));
        fs::create_dir_all(month.join("SimpleArchiveFormat")).unwrap();

        let items = plan_prune(temp.path()).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_execute_prune_deletes_planned_items() {
        let temp = TempDir::new().unwrap();
        let month = temp.path().join("1935").join("04");
        touch(&month.join("scratch.txt"));
        touch(&month.join("tmpwork").join("page1.tif"));
        touch(&month.join("issue.zip"));

        let items = plan_prune(temp.path()).unwrap();
        assert_eq!(items.len(), 2);

        let stats = execute_prune(&items);
        assert_eq!(stats, PruneStats { deleted: 2, errors: 0 });
        assert!(!month.join("scratch.txt").exists());
        assert!(!month.join("tmpwork").exists());
        assert!(month.join("issue.zip").exists());
    }

    #[test]
    fn test_execute_prune_counts_errors_and_continues() {
        let temp = TempDir::new().unwrap();
        let month = temp.path().join("1935").join("04");
        touch(&month.join("scratch.txt"));

        let mut items = plan_prune(temp.path()).unwrap();
        // An item that vanished between plan and execute.
        items.insert(
            0,
            PruneItem {
                path: month.join("already_gone.txt"),
                kind: PruneKind::File,
            },
        );

        let stats = execute_prune(&items);
        assert_eq!(stats.deleted, 1);
        assert_eq!(stats.errors, 1);
        assert!(!month.join("scratch.txt").exists());
    }
}
