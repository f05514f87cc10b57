//! Packaging of a single module.
//!
//! Turns one module source tree into `dist/{module}-{version}.zip`: the
//! tree is enumerated in stable order, filtered against the built-in
//! exclusion defaults plus the module's own `framelix.release.exclude`
//! patterns, checksummed into a `filelist.json` manifest, and archived with
//! the manifest at the archive root.

use crate::archive::{ArchiveEntries, EntrySource, write_archive};
use crate::error::{PackagerError, Result};
use crate::filter::{MODULE_EXCLUDES, PathFilter};
use crate::layout::AppLayout;
use crate::manifest::{MANIFEST_FILE_NAME, ModuleManifest};
use crate::walk::enumerate_tree;
use camino::{Utf8Path, Utf8PathBuf};
use framelix_common::metadata::{METADATA_FILE_NAME, PackageMetadata};
use framelix_common::module_name::ModuleName;
use std::fs;

/// Package the named module and return the absolute archive path.
///
/// The archive lands in the layout's `dist/` directory as
/// `{module}-{version}.zip`, with `{version}` read from the module's own
/// metadata file. The transient manifest is staged in a fresh temporary
/// directory and removed best-effort once archived.
///
/// # Errors
///
/// Returns [`PackagerError::ModuleNotFound`] when the module directory does
/// not exist, a metadata error when `package.json` is missing or has no
/// usable version, [`PackagerError::InvalidExclusionPattern`] for malformed
/// override patterns, and I/O errors from enumeration, checksumming, or
/// archive writing.
pub fn package_module(layout: &AppLayout, name: &ModuleName) -> Result<Utf8PathBuf> {
    let module_root = layout.module_root(name);
    if !module_root.is_dir() {
        return Err(PackagerError::ModuleNotFound {
            name: name.clone(),
            path: module_root,
        });
    }

    let metadata = PackageMetadata::load(&module_root.join(METADATA_FILE_NAME))?;
    let filter = PathFilter::compile(MODULE_EXCLUDES, &metadata.framelix.release.exclude)?;

    let mut entries = collect_entries(&module_root, &filter)?;
    log::debug!("module {name}: {} archive entries", entries.len());

    let manifest = ModuleManifest::build(&entries)?;
    let staging = tempfile::tempdir()?;
    let manifest_path = staging.path().join(MANIFEST_FILE_NAME);
    let manifest_path =
        Utf8PathBuf::try_from(manifest_path).map_err(|err| PackagerError::NonUtf8Path {
            path: err.into_path_buf(),
        })?;
    fs::write(&manifest_path, manifest.to_json()?)?;
    entries.insert(MANIFEST_FILE_NAME, EntrySource::File(manifest_path));

    let dist = layout.ensure_dist_dir()?;
    let archive_path = dist.join(format!("{name}-{}.zip", metadata.version));
    write_archive(&archive_path, &entries)?;

    if let Err(err) = staging.close() {
        log::warn!("failed to remove temporary manifest for {name}: {err}");
    }

    Ok(archive_path)
}

/// Enumerate, filter, and key the module tree into archive entries.
///
/// Kept directories become structural entries. Every kept file additionally
/// synthesises structural entries for its ancestor directories, so the
/// archive stays navigable even when a directory's own enumeration was
/// swallowed by an exclusion pattern.
fn collect_entries(module_root: &Utf8Path, filter: &PathFilter) -> Result<ArchiveEntries> {
    let mut entries = ArchiveEntries::new();
    for path in enumerate_tree(module_root)? {
        let relative = path.strip_prefix(module_root).unwrap_or(path.as_path());
        let relative = relative.as_str();
        if filter.is_excluded(relative) {
            continue;
        }
        if path.is_dir() {
            entries.insert(relative, EntrySource::Directory);
        } else {
            entries.insert_ancestors(relative);
            entries.insert(relative, EntrySource::File(path.clone()));
        }
    }
    Ok(entries)
}

#[cfg(test)]
#[path = "module_tests.rs"]
mod tests;
