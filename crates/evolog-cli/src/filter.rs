//! `evolog filter`: mapping + seed list → reachable chains only.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use evolog_dsl::parse::parse_mapping;
use evolog_dsl::record::Grammar;
use evolog_graph::closure::{build_closure, render_filtered};
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

#[derive(Args)]
pub struct FilterArgs {
    /// Pair-grammar mapping file (e.g. an aggregated frequency report).
    #[arg(long)]
    pub mapping: PathBuf,

    /// Seed entity list: one entity per non-blank line.
    #[arg(long)]
    pub seeds: PathBuf,

    /// Output path (defaults to stdout).
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &FilterArgs) -> Result<()> {
    let seed_text = fs::read_to_string(&args.seeds)
        .with_context(|| format!("failed to read seed file {}", args.seeds.display()))?;
    let seeds: BTreeSet<String> = seed_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    let mapping_text = fs::read_to_string(&args.mapping)
        .with_context(|| format!("failed to read mapping file {}", args.mapping.display()))?;
    let (mapping, diagnostics) = parse_mapping(&mapping_text, Grammar::Pair);
    crate::report_diagnostics(&diagnostics);

    let closure = build_closure(seeds.iter().cloned(), &mapping);
    let rendered = render_filtered(&mapping, &closure);
    crate::write_or_print(args.out.as_deref(), &rendered)?;

    eprintln!("{}", format!("Found {} seed entities", seeds.len()).green());
    eprintln!(
        "{}",
        format!("Total entities in closure: {}", closure.len()).green()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn filter_writes_only_the_reachable_chains() {
        let dir = tempdir().unwrap();
        let mapping = dir.path().join("revo.txt");
        fs::write(
            &mapping,
            "Charmander -> (Charmeleon, 2)\n\
             Charmeleon -> (Charizard, 3)\n\
             Eevee -> (Vaporeon, 1)\n",
        )
        .unwrap();
        let seeds = dir.path().join("seeds.txt");
        fs::write(&seeds, "Charmander\n\n").unwrap();
        let out = dir.path().join("chains.txt");

        run(&FilterArgs {
            mapping,
            seeds,
            out: Some(out.clone()),
        })
        .unwrap();

        let text = fs::read_to_string(&out).unwrap();
        assert!(text.contains("Charmander -> (Charmeleon, 2)"));
        assert!(text.contains("Charmeleon -> (Charizard, 3)"));
        assert!(!text.contains("Eevee"));
    }

    #[test]
    fn filter_aborts_when_the_seed_file_is_missing() {
        let dir = tempdir().unwrap();
        let mapping = dir.path().join("revo.txt");
        fs::write(&mapping, "A -> (B, 1)\n").unwrap();

        let err = run(&FilterArgs {
            mapping,
            seeds: dir.path().join("absent.txt"),
            out: None,
        })
        .unwrap_err();
        assert!(err.to_string().contains("absent.txt"));
    }
}
