//! Framelix release packager library.
//!
//! This crate implements the packaging pipeline that turns a module source
//! tree into a distributable `.zip` with an embedded `filelist.json`
//! change-detection manifest, and assembles the full release archive from
//! the individually packaged built-in modules. It is used by the
//! `framelix-packager` CLI binary and can be consumed programmatically for
//! testing or custom build workflows.
//!
//! # Modules
//!
//! - [`archive`] - Ordered archive entry maps and atomic zip writing
//! - [`cli`] - Command-line argument definitions
//! - [`error`] - Semantic error types for the packaging pipeline
//! - [`filter`] - Exclusion pattern evaluation for relative paths
//! - [`layout`] - Application directory layout resolution
//! - [`manifest`] - Module and release manifest construction
//! - [`module`] - Packaging of a single module
//! - [`release`] - Release assembly over per-module subprocesses
//! - [`walk`] - Deterministic source tree enumeration

pub mod archive;
pub mod cli;
pub mod error;
pub mod filter;
pub mod layout;
pub mod manifest;
pub mod module;
pub mod release;
pub mod walk;
