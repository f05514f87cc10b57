//! Typed model of the `package.json` metadata file.
//!
//! Every module root and the application root carry a `package.json`
//! describing the package version and packaging options. The file is
//! deserialised once into [`PackageMetadata`] with a required `version`,
//! failing fast instead of letting a missing field surface as a null
//! somewhere downstream. Unknown keys (the usual npm fields) are ignored.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::fs;
use std::io;
use thiserror::Error;

/// File name of the package metadata document at a module or app root.
pub const METADATA_FILE_NAME: &str = "package.json";

/// Errors arising from loading or validating package metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The metadata file does not exist.
    #[error("package metadata not found at {path}")]
    NotFound {
        /// Path where the file was expected.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The metadata file exists but could not be read.
    #[error("failed to read package metadata at {path}")]
    Read {
        /// Path to the unreadable file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The metadata file is not valid JSON or is missing a required field.
    #[error("invalid package metadata at {path}: {source}")]
    Parse {
        /// Path to the invalid file.
        path: Utf8PathBuf,
        /// The underlying deserialisation error.
        #[source]
        source: serde_json::Error,
    },

    /// The `version` field is present but empty.
    #[error("package metadata at {path} has an empty version")]
    EmptyVersion {
        /// Path to the offending file.
        path: Utf8PathBuf,
    },
}

/// Release-packaging options under the `framelix.release` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReleaseMetadata {
    /// Extra exclusion patterns appended after the built-in defaults.
    ///
    /// Order is preserved; patterns are never de-duplicated.
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Framelix-specific metadata under the `framelix` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FramelixMetadata {
    /// Release-packaging options.
    #[serde(default)]
    pub release: ReleaseMetadata,

    /// Ordered list of built-in module names (application root only).
    #[serde(rename = "builtInModules", default)]
    pub built_in_modules: Vec<String>,
}

/// The consumed subset of a `package.json` metadata file.
///
/// # Examples
///
/// ```
/// use framelix_common::metadata::PackageMetadata;
///
/// let raw = r#"{
///     "version": "1.4.2",
///     "framelix": { "release": { "exclude": ["^docs/"] } }
/// }"#;
/// let metadata: PackageMetadata = serde_json::from_str(raw).expect("valid metadata");
/// assert_eq!(metadata.version, "1.4.2");
/// assert_eq!(metadata.framelix.release.exclude, vec!["^docs/".to_owned()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageMetadata {
    /// The package version, used in the produced archive filename.
    pub version: String,

    /// Framelix-specific packaging options.
    #[serde(default)]
    pub framelix: FramelixMetadata,
}

impl PackageMetadata {
    /// Load and validate the metadata file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::NotFound`] or [`MetadataError::Read`] when
    /// the file cannot be read, [`MetadataError::Parse`] when the JSON is
    /// invalid or `version` is absent, and [`MetadataError::EmptyVersion`]
    /// when `version` is present but blank.
    pub fn load(path: &Utf8Path) -> Result<Self, MetadataError> {
        let contents = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                MetadataError::NotFound {
                    path: path.to_owned(),
                    source,
                }
            } else {
                MetadataError::Read {
                    path: path.to_owned(),
                    source,
                }
            }
        })?;

        let metadata: Self =
            serde_json::from_str(&contents).map_err(|source| MetadataError::Parse {
                path: path.to_owned(),
                source,
            })?;

        if metadata.version.trim().is_empty() {
            return Err(MetadataError::EmptyVersion {
                path: path.to_owned(),
            });
        }

        Ok(metadata)
    }
}
