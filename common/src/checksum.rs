//! CRC32 content checksums for change detection.
//!
//! Package manifests record a checksum per file so an updater can tell which
//! files changed between versions. The checksum is a change-detection signal,
//! not an integrity guarantee, so the fast non-cryptographic CRC32 is used
//! and collisions are acceptable.

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::{self, Read};

/// A CRC32 checksum rendered as eight lowercase hex characters.
///
/// # Examples
///
/// ```
/// use framelix_common::checksum::Checksum;
///
/// let checksum = Checksum::of_bytes(b"A");
/// assert_eq!(checksum.as_str(), "d3d99e8b");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Checksum(String);

impl Checksum {
    /// Wrap a raw CRC32 value.
    #[must_use]
    pub fn from_value(value: u32) -> Self {
        Self(format!("{value:08x}"))
    }

    /// Checksum an in-memory byte slice.
    ///
    /// The empty slice checksums to `"00000000"`; zero-length input is not
    /// an error.
    #[must_use]
    pub fn of_bytes(bytes: &[u8]) -> Self {
        Self::from_value(crc32fast::hash(bytes))
    }

    /// Checksum the full contents of a reader.
    ///
    /// Reads in chunks so large files are never held in memory whole.
    ///
    /// # Errors
    ///
    /// Returns any I/O error produced by the reader.
    pub fn of_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut hasher = crc32fast::Hasher::new();
        let mut buffer = [0u8; 8192];
        loop {
            let bytes_read = reader.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }
        Ok(Self::from_value(hasher.finalize()))
    }

    /// Checksum the contents of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be opened or read.
    pub fn of_file(path: &Utf8Path) -> io::Result<Self> {
        Self::of_reader(fs::File::open(path)?)
    }

    /// Return the checksum as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
