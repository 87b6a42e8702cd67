//! `evolog analyze`: directory of branch-grammar logs → frequency report.

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use evolog_graph::freq::compile_frequencies;
use std::fs;
use std::path::PathBuf;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Directory containing evolution log files (searched non-recursively).
    pub input: PathBuf,

    /// Output report path (defaults to stdout).
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// File-name suffix selecting which files to aggregate.
    #[arg(long, default_value = ".log")]
    pub ext: String,

    /// Output format: text|json
    #[arg(long, default_value = "text")]
    pub format: String,
}

pub fn run(args: &AnalyzeArgs) -> Result<()> {
    let files = crate::files_with_suffix(&args.input, &args.ext)?;
    if files.is_empty() {
        bail!(
            "no '{}' files found in {}",
            args.ext,
            args.input.display()
        );
    }

    let mut texts = Vec::with_capacity(files.len());
    for path in &files {
        let text =
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        texts.push(text);
    }

    let table = compile_frequencies(&texts);
    let report = table.to_report();
    let rendered = match args.format.as_str() {
        "text" => report.to_string(),
        "json" => serde_json::to_string_pretty(&report)?,
        other => bail!("unknown format '{other}' (expected text|json)"),
    };

    crate::write_or_print(args.out.as_deref(), &rendered)?;
    eprintln!(
        "{}",
        format!(
            "Aggregated {} files into {} (source, branch) entries",
            files.len(),
            table.branch_count()
        )
        .green()
    );
    Ok(())
}
