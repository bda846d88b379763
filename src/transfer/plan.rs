//! Enumeration of upload tasks and remote object naming.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use walkdir::WalkDir;

use crate::constants::BYTES_PER_MIB;

/// One local file and its derived remote object name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTask {
    pub local_path: PathBuf,
    pub size: u64,
    pub object_name: String,
}

impl UploadTask {
    /// File size in MiB, for progress lines.
    pub fn size_mib(&self) -> f64 {
        self.size as f64 / BYTES_PER_MIB
    }
}

/// Enumerate every regular file under `root` in lexicographic path order.
///
/// The remote object name is the file's path relative to the *parent* of
/// `root`, so the root directory's own name survives as a leading path
/// segment in the remote namespace. Collections uploaded from different
/// local roots therefore never collide even when their internal structure
/// matches, and re-running against the same root yields identical names.
pub fn plan_transfer(root: &Path) -> Result<Vec<UploadTask>> {
    if !root.is_dir() {
        bail!("source directory does not exist: {}", root.display());
    }

    // A filesystem root has no parent; fall back to the root itself.
    let base = root.parent().unwrap_or(root);

    let mut tasks = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.with_context(|| {
            format!("failed to walk source directory {}", root.display())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let metadata = entry.metadata().with_context(|| {
            format!("failed to read metadata for {}", entry.path().display())
        })?;
        tasks.push(UploadTask {
            local_path: entry.path().to_path_buf(),
            size: metadata.len(),
            object_name: object_name_for(entry.path(), base)?,
        });
    }

    tasks.sort_by(|a, b| a.local_path.cmp(&b.local_path));
    Ok(tasks)
}

/// Derive the POSIX-style remote object name for `path` relative to `base`.
fn object_name_for(path: &Path, base: &Path) -> Result<String> {
    let relative = path.strip_prefix(base).with_context(|| {
        format!(
            "{} is not under upload base {}",
            path.display(),
            base.display()
        )
    })?;
    let segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(segments.join("/"))
}
