// benchpost - core/discovery.rs
//
// Recursive directory traversal and benchmark log discovery.
//
// Uses `walkdir` for traversal. Only file *names* are inspected here; file
// contents belong to the parser. Every traversal error is fatal.

use crate::util::error::DiscoveryError;
use std::path::{Path, PathBuf};

/// Find every file below `root` whose file name contains `name_fragment`.
///
/// Paths are absolute: `root` is canonicalised before the walk. Results are
/// in traversal order, which is not sorted. No match is not an error; the
/// result is then empty.
///
/// Symlinks are not followed. A symlink whose target is a directory is
/// treated as a directory and skipped; other symlinks are matched by name.
///
/// # Errors
/// `Root` / `NotADirectory` when `root` is unusable, `Traversal` for the first
/// entry below it that cannot be read, `BrokenLink` for the first symlink
/// whose target cannot be resolved, whatever its name.
pub fn find_files(root: &Path, name_fragment: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    let root = std::fs::canonicalize(root).map_err(|source| DiscoveryError::Root {
        path: root.to_path_buf(),
        source,
    })?;
    if !root.is_dir() {
        return Err(DiscoveryError::NotADirectory { path: root });
    }

    tracing::debug!(
        root = %root.display(),
        fragment = name_fragment,
        "Discovery starting"
    );

    let mut files = Vec::new();
    for entry_result in walkdir::WalkDir::new(&root).follow_links(false) {
        let entry = entry_result.map_err(|source| DiscoveryError::Traversal {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.clone()),
            source,
        })?;

        let file_type = entry.file_type();
        if file_type.is_dir() {
            continue;
        }
        if file_type.is_symlink() {
            let target = std::fs::metadata(entry.path()).map_err(|source| {
                DiscoveryError::BrokenLink {
                    path: entry.path().to_path_buf(),
                    source,
                }
            })?;
            if target.is_dir() {
                tracing::trace!(link = %entry.path().display(), "Skipping directory symlink");
                continue;
            }
        }

        if !entry.file_name().to_string_lossy().contains(name_fragment) {
            tracing::trace!(file = %entry.path().display(), "Name does not match");
            continue;
        }

        files.push(entry.into_path());
    }

    tracing::debug!(
        root = %root.display(),
        fragment = name_fragment,
        files_found = files.len(),
        "Discovery complete"
    );

    Ok(files)
}

// =============================================================================
// Tests
// =============================================================================
