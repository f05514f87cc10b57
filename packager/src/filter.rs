//! Exclusion pattern evaluation for archive-relative paths.
//!
//! Paths are tested against an ordered list of case-insensitive regular
//! expressions; the first match excludes the path. Each scope (module
//! packaging, release packaging) has its own built-in default list, and a
//! module may append its own patterns via the `framelix.release.exclude`
//! metadata key. Version-control ignore files are exempt from every pattern
//! so a packaged tree keeps its ignore rules.

use crate::error::{PackagerError, Result};
use regex::{Regex, RegexBuilder};

/// Built-in exclusion patterns for module packaging.
///
/// Matched case-insensitively against the path relative to the module root.
pub const MODULE_EXCLUDES: &[&str] = &[
    r"^\.git",
    r"^\.idea",
    r"^\.vscode",
    r"^config-editable\.php$",
    r"^(js|node_modules|scss|tests|tmp)(/|$)",
    r"^package-lock\.json$",
];

/// Built-in exclusion patterns for release packaging.
///
/// Matched case-insensitively against the path relative to the app root.
pub const RELEASE_EXCLUDES: &[&str] = &[
    r"^\.git",
    r"^\.idea",
    r"^\.vscode",
    r"^config-editable\.php$",
    r"^(dev|js|nodejs|node_modules|scss|tests|tmp)(/|$)",
    r"^package-lock\.json$",
];

/// Filename suffix that marks a version-control ignore file.
const IGNORE_FILE_SUFFIX: &str = "gitignore";

/// A single compiled exclusion pattern.
///
/// Keeps the original pattern text for diagnostics alongside the compiled
/// case-insensitive regex.
#[derive(Debug, Clone)]
pub struct ExclusionPattern {
    raw: String,
    regex: Regex,
}

impl ExclusionPattern {
    /// Compile a pattern from its configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::InvalidExclusionPattern`] when the text is
    /// not a valid regular expression. A malformed pattern is a
    /// configuration error and aborts the whole packaging run.
    pub fn compile(raw: &str) -> Result<Self> {
        let regex = RegexBuilder::new(raw)
            .case_insensitive(true)
            .build()
            .map_err(|err| PackagerError::InvalidExclusionPattern {
                pattern: raw.to_owned(),
                reason: err.to_string(),
            })?;
        Ok(Self {
            raw: raw.to_owned(),
            regex,
        })
    }

    /// Return the original pattern text.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Test the pattern against a relative path.
    #[must_use]
    pub fn is_match(&self, relative: &str) -> bool {
        self.regex.is_match(relative)
    }
}

/// An ordered set of exclusion patterns for one packaging scope.
#[derive(Debug, Clone)]
pub struct PathFilter {
    patterns: Vec<ExclusionPattern>,
}

impl PathFilter {
    /// Compile a filter from built-in defaults plus per-module overrides.
    ///
    /// Overrides are appended after the defaults in their declared order;
    /// no de-duplication takes place.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::InvalidExclusionPattern`] for the first
    /// pattern that fails to compile.
    pub fn compile(defaults: &[&str], overrides: &[String]) -> Result<Self> {
        let patterns = defaults
            .iter()
            .copied()
            .chain(overrides.iter().map(String::as_str))
            .map(ExclusionPattern::compile)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Return true when `relative` is excluded by any pattern.
    ///
    /// Patterns are tried in order and the first match wins. A
    /// version-control ignore file is never excluded, regardless of
    /// patterns.
    #[must_use]
    pub fn is_excluded(&self, relative: &str) -> bool {
        if file_name(relative).ends_with(IGNORE_FILE_SUFFIX) {
            return false;
        }
        self.patterns.iter().any(|pattern| pattern.is_match(relative))
    }
}

/// Return the final path segment of a relative path.
fn file_name(relative: &str) -> &str {
    relative.rsplit('/').next().unwrap_or(relative)
}
