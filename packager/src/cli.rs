//! CLI argument definitions for the Framelix packager.
//!
//! This module defines the command-line interface using clap. Every action
//! is an explicit [`Command`] variant registered here; there is no dynamic
//! dispatch by name anywhere in the binary.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

/// Package Framelix modules and releases.
#[derive(Parser, Debug)]
#[command(name = "framelix-packager")]
#[command(version, about)]
#[command(long_about = concat!(
    "Package Framelix modules and releases.\n\n",
    "A module package is a zip of the module's filtered source tree plus a ",
    "filelist.json checksum manifest, named {module}-{version}.zip. A release ",
    "package bundles every built-in module's package together with the ",
    "application shell into release-{version}.zip.\n\n",
    "All archives are written to the dist/ directory under the application root.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Package a single module:\n",
    "    $ framelix-packager module Framelix\n\n",
    "  Package the full release:\n",
    "    $ framelix-packager release\n\n",
    "  List built-in modules and their versions:\n",
    "    $ framelix-packager list\n",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Application root directory.
    #[arg(long, value_name = "DIR", default_value = ".", global = true)]
    pub app_root: Utf8PathBuf,

    /// Suppress progress output (errors still shown).
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Package one module into dist/{module}-{version}.zip.
    ///
    /// Prints the absolute archive path as the only line on stdout, for
    /// consumption by a parent release build.
    Module {
        /// Name of the module directory under modules/.
        name: String,
    },

    /// Package the full release into dist/release-{version}.zip.
    Release,

    /// List the built-in modules declared in the root metadata.
    List {
        /// Output in JSON format for scripting.
        #[arg(long)]
        json: bool,
    },
}
