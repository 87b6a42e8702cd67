//! Evolog CLI
//!
//! Unified command-line interface for evolution-log tooling:
//! - Aggregating branch-grammar log directories into frequency reports
//! - Filtering a frequency mapping down to the chains reachable from a seed set
//! - Patching pair-grammar reports with per-source percentages
//! - Parse-only validation of pair/triple files
//! - Line-range extraction and separator standardization of raw logs
//!
//! The core parsing/aggregation/closure logic lives in `evolog-dsl` and
//! `evolog-graph`; this crate only does file discovery, reading, writing,
//! and diagnostic presentation.

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use evolog_dsl::record::Diagnostic;
use std::fs;
use std::path::{Path, PathBuf};

mod analyze;
mod check;
mod extract;
mod filter;
mod patch;
mod standardize;

#[derive(Parser)]
#[command(name = "evolog")]
#[command(author, version, about = "Evolution-log aggregation and chain filtering")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate a directory of branch-grammar logs into a frequency report.
    Analyze(analyze::AnalyzeArgs),

    /// Filter a pair-grammar mapping to the chains reachable from a seed set.
    Filter(filter::FilterArgs),

    /// Patch a pair-grammar file with per-source percentages (triple output).
    Patch(patch::PatchArgs),

    /// Parse a pair/triple file and report diagnostics without writing output.
    Check(check::CheckArgs),

    /// Copy a 1-based inclusive line range out of each input file.
    Extract(extract::ExtractArgs),

    /// Replace `", "` and `" and "` with `"|"` in every matching file.
    Standardize(standardize::StandardizeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze(args) => analyze::run(&args),
        Commands::Filter(args) => filter::run(&args),
        Commands::Patch(args) => patch::run(&args),
        Commands::Check(args) => check::run(&args),
        Commands::Extract(args) => extract::run(&args),
        Commands::Standardize(args) => standardize::run(&args),
    }
}

/// Print accumulated parse diagnostics to stderr (they are never fatal).
pub(crate) fn report_diagnostics(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        eprintln!("{}", "No validation issues found".green());
        return;
    }
    eprintln!(
        "{}",
        format!("Found {} issues during validation:", diagnostics.len()).yellow()
    );
    for diagnostic in diagnostics {
        eprintln!("  {diagnostic}");
    }
}

/// Write `text` to `out`, or print it to stdout when no path was given.
pub(crate) fn write_or_print(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, text)
                .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))?;
            eprintln!("{}", format!("Wrote {}", path.display()).green());
        }
        None => println!("{text}"),
    }
    Ok(())
}

/// Non-recursive listing of the files in `dir` whose name ends with `suffix`,
/// sorted by path for deterministic processing.
pub(crate) fn files_with_suffix(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    use anyhow::Context;
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| format!("failed to read directory {}", dir.display()))?;
        if entry.file_type().is_file()
            && entry.file_name().to_string_lossy().ends_with(suffix)
        {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}
