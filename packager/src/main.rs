//! Framelix packager CLI entrypoint.
//!
//! This binary packages single modules, assembles full releases, and lists
//! built-in modules. Progress messages go to stderr; stdout carries only
//! machine-consumable output (the produced archive path, or the list
//! output), so a parent process can capture it verbatim.

use clap::Parser;
use framelix_common::metadata::{METADATA_FILE_NAME, PackageMetadata};
use framelix_common::module_name::ModuleName;
use framelix_packager::cli::{Cli, Command};
use framelix_packager::error::Result;
use framelix_packager::layout::AppLayout;
use framelix_packager::module::package_module;
use framelix_packager::release::{SubprocessRunner, package_release};
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    let layout = AppLayout::discover(&cli.app_root)?;

    match &cli.command {
        Command::Module { name } => run_module(&layout, name, cli.quiet, stderr),
        Command::Release => run_release(&layout, cli.quiet, stderr),
        Command::List { json } => run_list(&layout, *json),
    }
}

/// Packages one module and prints its archive path as the single stdout line.
fn run_module(
    layout: &AppLayout,
    name: &str,
    quiet: bool,
    stderr: &mut dyn Write,
) -> Result<()> {
    let name = ModuleName::try_from(name)?;

    if !quiet {
        write_stderr_line(stderr, format!("Packaging module {name}..."));
    }

    let archive = package_module(layout, &name)?;

    if !quiet {
        write_stderr_line(stderr, format!("Module archive written to {archive}"));
    }

    println!("{archive}");
    Ok(())
}

/// Assembles the full release via one subprocess per built-in module.
fn run_release(layout: &AppLayout, quiet: bool, stderr: &mut dyn Write) -> Result<()> {
    if !quiet {
        write_stderr_line(stderr, "Packaging release...");
    }

    let archive = package_release(layout, &SubprocessRunner)?;

    if !quiet {
        write_stderr_line(stderr, format!("Release archive written to {archive}"));
    }

    println!("{archive}");
    Ok(())
}

/// Lists built-in modules with the version read from each module's metadata.
fn run_list(layout: &AppLayout, json: bool) -> Result<()> {
    let metadata = PackageMetadata::load(&layout.root_metadata_path())?;
    let rows: Vec<(String, Option<String>)> = metadata
        .framelix
        .built_in_modules
        .iter()
        .map(|name| {
            let module_metadata =
                PackageMetadata::load(&layout.modules_dir().join(name).join(METADATA_FILE_NAME));
            (name.clone(), module_metadata.ok().map(|m| m.version))
        })
        .collect();

    if json {
        let values: Vec<serde_json::Value> = rows
            .iter()
            .map(|(name, version)| {
                serde_json::json!({
                    "name": name,
                    "version": version,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
    } else {
        for (name, version) in &rows {
            println!("{name} {}", version.as_deref().unwrap_or("(missing)"));
        }
    }

    Ok(())
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format!("error: {err}"));
            1
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}
