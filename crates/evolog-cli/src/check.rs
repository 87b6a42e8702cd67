//! `evolog check`: parse-only validation of pair/triple files.

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use evolog_dsl::parse::parse_mapping;
use evolog_dsl::record::Grammar;
use std::fs;
use std::path::PathBuf;

#[derive(Args)]
pub struct CheckArgs {
    /// Input file to validate.
    pub input: PathBuf,

    /// Grammar to validate against: pair|triple
    #[arg(long, default_value = "pair")]
    pub grammar: String,
}

pub fn run(args: &CheckArgs) -> Result<()> {
    let grammar = match args.grammar.as_str() {
        "pair" => Grammar::Pair,
        "triple" => Grammar::Triple,
        other => bail!("unknown grammar '{other}' (expected pair|triple)"),
    };

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let (mapping, diagnostics) = parse_mapping(&text, grammar);
    crate::report_diagnostics(&diagnostics);

    let edges: usize = mapping.values().map(Vec::len).sum();
    println!(
        "{}",
        format!("{} valid sources, {} evolutions", mapping.len(), edges).green()
    );
    Ok(())
}
