//! Deterministic source tree enumeration.
//!
//! Enumerates every file and directory strictly under a root in a stable
//! order, so that packaging the same unchanged tree twice yields identical
//! archives. Entries within each directory are visited in lexicographic
//! filename order, parents before children. Symlinks are followed; a
//! self-referential symlink cycle is reported as a scan error instead of
//! looping forever.

use crate::error::{PackagerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use walkdir::WalkDir;

/// Enumerate every path strictly under `root`, including empty directories.
///
/// The root itself is not included. The returned order is deterministic
/// across runs on the same tree.
///
/// # Errors
///
/// Returns [`PackagerError::ScanFailed`] when a directory cannot be read or
/// a symlink cycle is detected, and [`PackagerError::NonUtf8Path`] when an
/// entry's path is not valid UTF-8.
pub fn enumerate_tree(root: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let mut paths = Vec::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|source| PackagerError::ScanFailed {
            root: root.to_owned(),
            source,
        })?;
        let path = Utf8PathBuf::try_from(entry.into_path())
            .map_err(|err| PackagerError::NonUtf8Path {
                path: err.into_path_buf(),
            })?;
        paths.push(path);
    }

    Ok(paths)
}
