//! Module and release manifest construction.
//!
//! Each package carries a `filelist.json` used downstream to detect which
//! files changed between versions. The two package kinds ship different
//! manifest shapes and consumers rely on each one: a module package embeds
//! a JSON object mapping archive-relative paths to CRC32 checksums (`null`
//! for directories), while a release package embeds a plain JSON array of
//! its top-level member names. The asymmetry is deliberate and must not be
//! unified.

use crate::archive::{ArchiveEntries, EntrySource};
use crate::error::{PackagerError, Result};
use framelix_common::checksum::Checksum;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// File name of the manifest embedded at the root of every package.
pub const MANIFEST_FILE_NAME: &str = "filelist.json";

/// The change-detection manifest of a module package.
///
/// Entries mirror the archive entry order. Files map to a CRC32 checksum of
/// their contents, directories map to `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleManifest {
    entries: Vec<(String, Option<Checksum>)>,
}

impl ModuleManifest {
    /// Build a manifest by checksumming every file entry.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::SourceUnreadable`] when a file entry cannot
    /// be read. Zero-length files are fine; the CRC32 of empty input is
    /// well-defined.
    pub fn build(entries: &ArchiveEntries) -> Result<Self> {
        let mut manifest_entries = Vec::with_capacity(entries.len());
        for (key, source) in entries.iter() {
            let checksum = match source {
                EntrySource::Directory => None,
                EntrySource::File(path) => Some(Checksum::of_file(path).map_err(|source| {
                    PackagerError::SourceUnreadable {
                        path: path.clone(),
                        source,
                    }
                })?),
            };
            manifest_entries.push((key.clone(), checksum));
        }
        Ok(Self {
            entries: manifest_entries,
        })
    }

    /// Return the manifest entries in archive order.
    #[must_use]
    pub fn entries(&self) -> &[(String, Option<Checksum>)] {
        &self.entries
    }

    /// Return the checksum recorded for `key`, if `key` is a file entry.
    #[must_use]
    pub fn checksum_of(&self, key: &str) -> Option<&Checksum> {
        self.entries
            .iter()
            .find(|(entry_key, _)| entry_key == key)
            .and_then(|(_, checksum)| checksum.as_ref())
    }

    /// Serialise the manifest as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::ManifestSerialization`] if serialisation
    /// fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Serialize for ModuleManifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, checksum) in &self.entries {
            map.serialize_entry(key, checksum)?;
        }
        map.end()
    }
}

/// The manifest of a release package: the ordered top-level member names.
///
/// Unlike [`ModuleManifest`] this is not a checksum map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReleaseManifest {
    members: Vec<String>,
}

impl ReleaseManifest {
    /// Create a release manifest from member names in construction order.
    #[must_use]
    pub fn new(members: Vec<String>) -> Self {
        Self { members }
    }

    /// Return the member names in order.
    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Serialise the manifest as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::ManifestSerialization`] if serialisation
    /// fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
