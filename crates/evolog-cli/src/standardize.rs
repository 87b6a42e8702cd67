//! `evolog standardize`: rewrite prose-style separators in raw logs to the
//! branch grammar's `|`.
//!
//! Raw randomizer logs write branches as `Vaporeon, Jolteon and Flareon`;
//! the aggregator wants `Vaporeon|Jolteon|Flareon`. Replaces `", "` and
//! `" and "` in place across a directory, with a dry-run mode that only
//! reports the counts.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Args)]
pub struct StandardizeArgs {
    /// Directory containing the files to rewrite (searched non-recursively).
    pub dir: PathBuf,

    /// File-name suffix selecting which files to process.
    #[arg(long, default_value = ".log")]
    pub ext: String,

    /// Report replacement counts without modifying any file.
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: &StandardizeArgs) -> Result<()> {
    let files = crate::files_with_suffix(&args.dir, &args.ext)?;
    let action = if args.dry_run { "Would replace" } else { "Replaced" };

    let mut total_commas = 0usize;
    let mut total_ands = 0usize;
    for path in &files {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let (standardized, commas, ands) = standardize_text(&text);
        if commas > 0 || ands > 0 {
            if !args.dry_run {
                fs::write(path, standardized)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }
            eprintln!(
                "{action} in {}: {commas} commas, {ands} 'and's",
                path.display()
            );
        }
        total_commas += commas;
        total_ands += ands;
    }

    eprintln!(
        "{}",
        format!(
            "Processed {} '{}' files: {total_commas} commas, {total_ands} 'and's",
            files.len(),
            args.ext
        )
        .green()
    );
    Ok(())
}

/// Replace `", "` and `" and "` with `"|"`; returns the rewritten text and
/// the per-separator replacement counts.
fn standardize_text(text: &str) -> (String, usize, usize) {
    let commas = text.matches(", ").count();
    let replaced = text.replace(", ", "|");
    let ands = replaced.matches(" and ").count();
    let replaced = replaced.replace(" and ", "|");
    (replaced, commas, ands)
}
