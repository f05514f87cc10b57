//! Semantic wrapper for Framelix module names.
//!
//! Module names double as directory names under `modules/` and as archive
//! member names, so they are validated on construction rather than passed
//! around as raw strings.

use std::fmt;
use thiserror::Error;

/// Errors arising from module name validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModuleNameError {
    /// The supplied name was empty.
    #[error("module name must not be empty")]
    Empty,

    /// The supplied name contains a character outside the allowed set.
    #[error("module name {name:?} contains invalid character {character:?}")]
    InvalidCharacter {
        /// The rejected name.
        name: String,
        /// The first offending character.
        character: char,
    },
}

/// A validated module name.
///
/// Accepts ASCII letters, digits, `-`, and `_`. Anything else (notably path
/// separators and dots) is rejected so a name can never escape the modules
/// directory.
///
/// # Examples
///
/// ```
/// use framelix_common::module_name::ModuleName;
///
/// let name = ModuleName::try_from("FramelixDocs").expect("valid module name");
/// assert_eq!(name.as_str(), "FramelixDocs");
/// assert!(ModuleName::try_from("../escape").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleName(String);

impl ModuleName {
    /// Get the module name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for ModuleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for ModuleName {
    type Error = ModuleNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(ModuleNameError::Empty);
        }
        match value
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            Some(character) => Err(ModuleNameError::InvalidCharacter {
                name: value.to_owned(),
                character,
            }),
            None => Ok(Self(value.to_owned())),
        }
    }
}

impl TryFrom<String> for ModuleName {
    type Error = ModuleNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
