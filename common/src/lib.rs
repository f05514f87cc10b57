//! Shared domain types for the Framelix release packager.
//!
//! This crate holds the pieces of the domain model that are useful outside
//! the packaging pipeline itself: validated module names, the typed view of
//! a package metadata file, and content checksums. It performs no packaging
//! orchestration of its own.
//!
//! # Modules
//!
//! - [`checksum`] - CRC32 content checksums for change detection
//! - [`metadata`] - Typed model of the `package.json` metadata file
//! - [`module_name`] - Semantic wrapper for module names

pub mod checksum;
pub mod metadata;
pub mod module_name;
