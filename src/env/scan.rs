//! env::scan
//!
//! Finding repositories below the root folder.
//!
//! # Invariants
//!
//! - Results are sorted by path
//! - The walk does not descend into a repository once found, so nested
//!   checkouts (submodules, vendored clones) are not reported separately
//! - Symbolic links are not followed

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

/// Every repository at or below `root`.
pub fn scan(root: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }

        if entry.path().join(".git").exists() {
            found.push(entry.into_path());
            walker.skip_current_dir();
        }
    }

    debug!(root = %root.display(), count = found.len(), "scanned repositories");
    found
}
