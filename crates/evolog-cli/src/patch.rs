//! `evolog patch`: pair-grammar file → percentage-patched triple file.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use evolog_dsl::parse::parse_mapping;
use evolog_dsl::record::Grammar;
use evolog_graph::patch::{patch_percentages, render_patch};
use std::fs;
use std::path::PathBuf;

#[derive(Args)]
pub struct PatchArgs {
    /// Pair-grammar input file.
    pub input: PathBuf,

    /// Output path (defaults to stdout).
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &PatchArgs) -> Result<()> {
    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let (mapping, diagnostics) = parse_mapping(&text, Grammar::Pair);
    crate::report_diagnostics(&diagnostics);

    let (records, notes) = patch_percentages(&mapping);
    for note in &notes {
        eprintln!("  {note}");
    }

    if records.is_empty() {
        eprintln!("{}", "No valid records to write".yellow());
        return Ok(());
    }
    crate::write_or_print(args.out.as_deref(), &render_patch(&records))?;
    eprintln!(
        "{}",
        format!("Patched {} sources with percentages", records.len()).green()
    );
    Ok(())
}
