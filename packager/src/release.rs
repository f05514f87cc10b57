//! Release assembly over per-module subprocesses.
//!
//! A release build packages every built-in module declared in the root
//! metadata, then bundles the produced module archives together with the
//! application shell into `dist/release-{version}.zip`. Each module is
//! packaged by a fresh subprocess so every build starts from clean process
//! state; builds run strictly sequentially in declaration order. One failed
//! module aborts the whole release before any release archive is written.

use crate::archive::{ArchiveEntries, EntrySource, write_archive};
use crate::error::{PackagerError, Result};
use crate::filter::{PathFilter, RELEASE_EXCLUDES};
use crate::layout::{AppLayout, MODULES_DIR_NAME};
use crate::manifest::{MANIFEST_FILE_NAME, ReleaseManifest};
use camino::Utf8PathBuf;
use framelix_common::metadata::{METADATA_FILE_NAME, PackageMetadata};
use framelix_common::module_name::ModuleName;
use std::fs;
use std::process::Command;

/// Application shell files bundled at the release archive root.
const ROOT_FILES: &[&str] = &[".htaccess", "index.php", METADATA_FILE_NAME];

/// Directory name for runtime logs inside the release archive.
const LOGS_DIR_NAME: &str = "logs";

/// Runs one module packaging step on behalf of the release build.
///
/// The production implementation is [`SubprocessRunner`]; tests substitute
/// in-process or failing runners to exercise the release flow without
/// spawning child processes.
pub trait ModuleRunner {
    /// Package `name` and return the absolute path of its archive.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::ModuleBuildFailed`] (or any underlying
    /// packaging error) when the module cannot be packaged.
    fn package_module(&self, layout: &AppLayout, name: &ModuleName) -> Result<Utf8PathBuf>;
}

/// Packages each module in an isolated child process.
///
/// Re-invokes the current executable's `module` subcommand and captures the
/// single stdout line carrying the produced archive path. Isolation resets
/// per-process state between module builds; it is not a concurrency
/// mechanism.
#[derive(Debug, Default)]
pub struct SubprocessRunner;

impl ModuleRunner for SubprocessRunner {
    fn package_module(&self, layout: &AppLayout, name: &ModuleName) -> Result<Utf8PathBuf> {
        let current_exe = std::env::current_exe()?;
        let output = Command::new(current_exe)
            .arg("module")
            .arg(name.as_str())
            .arg("--app-root")
            .arg(layout.app_root().as_str())
            .arg("--quiet")
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = if stderr.trim().is_empty() {
                output.status.to_string()
            } else {
                stderr.trim().to_owned()
            };
            return Err(PackagerError::ModuleBuildFailed {
                module: name.clone(),
                reason,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let path = output_path_line(&stdout).ok_or_else(|| PackagerError::ModuleBuildFailed {
            module: name.clone(),
            reason: "subprocess produced no archive path on standard output".to_owned(),
        })?;
        Ok(Utf8PathBuf::from(path))
    }
}

/// Extract the archive path from a module subprocess's captured stdout.
///
/// The contract is a single line, but trailing newlines and stray blank
/// lines are tolerated; the last non-empty line wins.
fn output_path_line(stdout: &str) -> Option<&str> {
    stdout
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
}

/// Assemble the release archive and return its absolute path.
///
/// Follows the fixed release layout: `logs/` and `modules/` structural
/// directories, the application shell files, one `modules/{m}.zip` per
/// built-in module, and a `filelist.json` listing the member names in
/// construction order (a plain array, not a checksum map).
///
/// # Errors
///
/// Returns metadata and I/O errors from the root package, and
/// [`PackagerError::ModuleBuildFailed`] when any module build fails; in
/// that case no release archive is written.
pub fn package_release(layout: &AppLayout, runner: &dyn ModuleRunner) -> Result<Utf8PathBuf> {
    let metadata = PackageMetadata::load(&layout.root_metadata_path())?;
    let modules = metadata
        .framelix
        .built_in_modules
        .iter()
        .map(|name| ModuleName::try_from(name.as_str()))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let filter = PathFilter::compile(RELEASE_EXCLUDES, &[])?;
    let mut entries = ArchiveEntries::new();
    for key in [LOGS_DIR_NAME, MODULES_DIR_NAME] {
        if !filter.is_excluded(key) {
            entries.insert(key, EntrySource::Directory);
        }
    }
    for key in ROOT_FILES {
        if !filter.is_excluded(key) {
            entries.insert(*key, EntrySource::File(layout.app_root().join(key)));
        }
    }

    let mut members: Vec<String> = entries.iter().map(|(key, _)| key.clone()).collect();
    for name in &modules {
        members.push(format!("{MODULES_DIR_NAME}/{name}.zip"));
    }
    let manifest = ReleaseManifest::new(members);

    for name in &modules {
        log::debug!("packaging built-in module {name}");
        let module_archive = runner.package_module(layout, name)?;
        entries.insert(
            format!("{MODULES_DIR_NAME}/{name}.zip"),
            EntrySource::File(module_archive),
        );
    }

    let staging = tempfile::tempdir()?;
    let manifest_path = staging.path().join(MANIFEST_FILE_NAME);
    let manifest_path =
        Utf8PathBuf::try_from(manifest_path).map_err(|err| PackagerError::NonUtf8Path {
            path: err.into_path_buf(),
        })?;
    fs::write(&manifest_path, manifest.to_json()?)?;
    entries.insert(MANIFEST_FILE_NAME, EntrySource::File(manifest_path));

    let dist = layout.ensure_dist_dir()?;
    let archive_path = dist.join(format!("release-{}.zip", metadata.version));
    write_archive(&archive_path, &entries)?;

    if let Err(err) = staging.close() {
        log::warn!("failed to remove temporary release manifest: {err}");
    }

    Ok(archive_path)
}

#[cfg(test)]
#[path = "release_tests.rs"]
mod tests;
