//! Ordered archive entry maps and atomic zip writing.
//!
//! An [`ArchiveEntries`] map pairs archive-relative keys (forward-slash
//! separated, no leading slash) with either a source file or a structural
//! directory entry. Insertion order determines archive member order, which
//! keeps repeated builds of an unchanged tree byte-identical. Archives are
//! written to a `.part` staging file and renamed into place on success, so a
//! truncated build is never published as a final artifact.

use crate::error::{PackagerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashSet;
use std::fs;
use std::io;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// The source backing one archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySource {
    /// A file whose contents are copied into the archive verbatim.
    File(Utf8PathBuf),
    /// A structural directory entry with no content of its own.
    Directory,
}

/// An insertion-ordered map from archive-relative path to entry source.
///
/// Keys are unique; inserting a key that is already present is a no-op, so
/// the first insertion wins and order never shifts.
#[derive(Debug, Clone, Default)]
pub struct ArchiveEntries {
    entries: Vec<(String, EntrySource)>,
    keys: HashSet<String>,
}

impl ArchiveEntries {
    /// Create an empty entry map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning false when the key was already present.
    pub fn insert(&mut self, key: impl Into<String>, source: EntrySource) -> bool {
        let key = key.into();
        if !self.keys.insert(key.clone()) {
            return false;
        }
        self.entries.push((key, source));
        true
    }

    /// Insert structural directory entries for every ancestor of `key`.
    ///
    /// For `a/b/c.txt` this inserts `a` and `a/b`, so the archive's
    /// directory structure stays navigable even when no directory-only
    /// entry was enumerated for them.
    pub fn insert_ancestors(&mut self, key: &str) {
        let mut prefix_end = 0;
        while let Some(next) = key[prefix_end..].find('/') {
            prefix_end += next;
            self.insert(&key[..prefix_end], EntrySource::Directory);
            prefix_end += 1;
        }
    }

    /// Return true when `key` is already present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(String, EntrySource)> {
        self.entries.iter()
    }

    /// Return the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return true when the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Write `entries` as a zip archive at `destination`.
///
/// Parent directories of `destination` are created as needed and an
/// existing archive is overwritten. The archive is first written to a
/// `.part` sibling and renamed into place once complete; on failure the
/// staging file is removed.
///
/// # Errors
///
/// Returns [`PackagerError::SourceUnreadable`] when a source file cannot be
/// read, [`PackagerError::ArchiveWrite`] when the zip stream itself fails,
/// and [`PackagerError::Io`] for staging and rename failures.
pub fn write_archive(destination: &Utf8Path, entries: &ArchiveEntries) -> Result<()> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }

    let staging = Utf8PathBuf::from(format!("{destination}.part"));
    if let Err(err) = write_entries(&staging, destination, entries) {
        let _ = fs::remove_file(&staging);
        return Err(err);
    }
    fs::rename(&staging, destination)?;
    Ok(())
}

/// Per-entry zip options: Deflate, fixed DOS-epoch timestamp.
///
/// The fixed timestamp keeps archives of an unchanged tree byte-identical
/// across builds.
fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644)
}

fn write_entries(
    staging: &Utf8Path,
    destination: &Utf8Path,
    entries: &ArchiveEntries,
) -> Result<()> {
    let file = fs::File::create(staging)?;
    let mut writer = ZipWriter::new(file);

    for (key, source) in entries.iter() {
        match source {
            EntrySource::Directory => {
                writer
                    .add_directory(key.as_str(), entry_options())
                    .map_err(|source| PackagerError::ArchiveWrite {
                        destination: destination.to_owned(),
                        source,
                    })?;
            }
            EntrySource::File(path) => {
                writer
                    .start_file(key.as_str(), entry_options())
                    .map_err(|source| PackagerError::ArchiveWrite {
                        destination: destination.to_owned(),
                        source,
                    })?;
                let mut reader =
                    fs::File::open(path).map_err(|source| PackagerError::SourceUnreadable {
                        path: path.clone(),
                        source,
                    })?;
                io::copy(&mut reader, &mut writer).map_err(|source| {
                    PackagerError::SourceUnreadable {
                        path: path.clone(),
                        source,
                    }
                })?;
            }
        }
    }

    writer
        .finish()
        .map_err(|source| PackagerError::ArchiveWrite {
            destination: destination.to_owned(),
            source,
        })?;
    Ok(())
}
