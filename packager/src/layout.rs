//! Application directory layout resolution.
//!
//! All path derivation flows through one [`AppLayout`] value constructed at
//! process start from the `--app-root` option, so nothing in the pipeline
//! reads ambient global state. The layout knows where modules live, where
//! produced archives go, and where the root metadata file sits.

use crate::error::{PackagerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use framelix_common::metadata::METADATA_FILE_NAME;
use framelix_common::module_name::ModuleName;
use std::fs;

/// Directory under the app root that holds module source trees.
pub const MODULES_DIR_NAME: &str = "modules";

/// Directory under the app root that receives produced archives.
pub const DIST_DIR_NAME: &str = "dist";

/// Resolved directory layout of one application root.
#[derive(Debug, Clone)]
pub struct AppLayout {
    app_root: Utf8PathBuf,
}

impl AppLayout {
    /// Resolve the layout for `app_root`, canonicalising the path.
    ///
    /// Canonicalisation makes every derived path absolute, which matters for
    /// the module subcommand's stdout contract: the parent release process
    /// consumes the printed archive path as-is.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::AppRootNotFound`] when the directory does
    /// not exist or cannot be canonicalised.
    pub fn discover(app_root: &Utf8Path) -> Result<Self> {
        let app_root =
            app_root
                .canonicalize_utf8()
                .map_err(|err| PackagerError::AppRootNotFound {
                    path: app_root.to_owned(),
                    reason: err.to_string(),
                })?;
        Ok(Self { app_root })
    }

    /// Return the canonical application root.
    #[must_use]
    pub fn app_root(&self) -> &Utf8Path {
        &self.app_root
    }

    /// Return the modules directory.
    #[must_use]
    pub fn modules_dir(&self) -> Utf8PathBuf {
        self.app_root.join(MODULES_DIR_NAME)
    }

    /// Return the source root of one module.
    #[must_use]
    pub fn module_root(&self, name: &ModuleName) -> Utf8PathBuf {
        self.modules_dir().join(name.as_str())
    }

    /// Return the distribution output directory.
    #[must_use]
    pub fn dist_dir(&self) -> Utf8PathBuf {
        self.app_root.join(DIST_DIR_NAME)
    }

    /// Return the path of the root package metadata file.
    #[must_use]
    pub fn root_metadata_path(&self) -> Utf8PathBuf {
        self.app_root.join(METADATA_FILE_NAME)
    }

    /// Create the distribution directory and verify it is writable.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::DistNotWritable`] when the directory cannot
    /// be created or fails the write probe.
    pub fn ensure_dist_dir(&self) -> Result<Utf8PathBuf> {
        let dist = self.dist_dir();
        fs::create_dir_all(&dist).map_err(|err| PackagerError::DistNotWritable {
            path: dist.clone(),
            reason: err.to_string(),
        })?;

        // Verify writability by attempting to create a temp file
        let probe = dist.join(".framelix-packager-test");
        match fs::write(&probe, b"test") {
            Ok(()) => {
                let _ = fs::remove_file(&probe);
                Ok(dist)
            }
            Err(err) => Err(PackagerError::DistNotWritable {
                path: dist,
                reason: err.to_string(),
            }),
        }
    }
}
