//! Error types for the Framelix packaging pipeline.
//!
//! This module defines semantic error variants covering the three failure
//! families of a packaging run: configuration problems (bad module names,
//! unusable metadata, malformed exclusion patterns), I/O problems (unreadable
//! sources, unwritable destinations, scan failures), and module subprocess
//! failures during a release build. Packaging is deterministic, so nothing
//! here is retried; every variant is fatal to the run that raised it.

use camino::Utf8PathBuf;
use framelix_common::metadata::MetadataError;
use framelix_common::module_name::{ModuleName, ModuleNameError};
use thiserror::Error;

/// Errors that can occur while packaging a module or a release.
#[derive(Debug, Error)]
pub enum PackagerError {
    /// The application root directory could not be resolved.
    #[error("application root {path} is not usable: {reason}")]
    AppRootNotFound {
        /// The path that was supplied.
        path: Utf8PathBuf,
        /// Description of why resolution failed.
        reason: String,
    },

    /// A filesystem path was not valid UTF-8.
    #[error("path {path:?} is not valid UTF-8")]
    NonUtf8Path {
        /// The offending path.
        path: std::path::PathBuf,
    },

    /// The named module has no directory under `modules/`.
    #[error("module {name} not found at {path}")]
    ModuleNotFound {
        /// The requested module.
        name: ModuleName,
        /// The directory that was expected to exist.
        path: Utf8PathBuf,
    },

    /// A module name failed validation.
    #[error(transparent)]
    InvalidModuleName(#[from] ModuleNameError),

    /// Package metadata could not be loaded or validated.
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// An exclusion pattern is not a valid regular expression.
    #[error("invalid exclusion pattern {pattern:?}: {reason}")]
    InvalidExclusionPattern {
        /// The pattern text as found in configuration.
        pattern: String,
        /// Description of the compile failure.
        reason: String,
    },

    /// Enumerating a source tree failed.
    #[error("failed to scan {root}")]
    ScanFailed {
        /// The tree root being enumerated.
        root: Utf8PathBuf,
        /// The underlying walk error (I/O failure or symlink cycle).
        #[source]
        source: walkdir::Error,
    },

    /// A source file could not be read while checksumming or archiving.
    #[error("source file {path} could not be read")]
    SourceUnreadable {
        /// The unreadable file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The distribution output directory is not writable.
    #[error("distribution directory {path} is not writable: {reason}")]
    DistNotWritable {
        /// The directory that failed the writability probe.
        path: Utf8PathBuf,
        /// Description of the underlying I/O error.
        reason: String,
    },

    /// Writing the archive itself failed.
    #[error("failed to write archive {destination}")]
    ArchiveWrite {
        /// The archive that was being produced.
        destination: Utf8PathBuf,
        /// The underlying zip error.
        #[source]
        source: zip::result::ZipError,
    },

    /// A module packaging subprocess failed during a release build.
    #[error("packaging module {module} failed: {reason}")]
    ModuleBuildFailed {
        /// The module whose build failed.
        module: ModuleName,
        /// The child's captured error text, or a description of the failure.
        reason: String,
    },

    /// Serialising a manifest to JSON failed.
    #[error("manifest serialization error: {0}")]
    ManifestSerialization(#[from] serde_json::Error),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`PackagerError`].
pub type Result<T> = std::result::Result<T, PackagerError>;
