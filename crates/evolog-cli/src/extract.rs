//! `evolog extract`: copy a fixed 1-based inclusive line range out of each
//! input file, writing `extracted_<name>` next to the input or into
//! `--out-dir`.

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct ExtractArgs {
    /// Input files.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// First line to extract (1-based, inclusive).
    #[arg(long)]
    pub start: usize,

    /// Last line to extract (1-based, inclusive; clamped to file length).
    #[arg(long)]
    pub end: usize,

    /// Directory for the extracted files (defaults to each input's directory).
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

pub fn run(args: &ExtractArgs) -> Result<()> {
    if args.start == 0 || args.end < args.start {
        bail!("invalid line range {}..{}", args.start, args.end);
    }
    if let Some(dir) = &args.out_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    for input in &args.inputs {
        let text = fs::read_to_string(input)
            .with_context(|| format!("failed to read {}", input.display()))?;
        let extracted = extract_range(&text, args.start, args.end);
        let output = output_path(input, args.out_dir.as_deref());
        fs::write(&output, extracted)
            .with_context(|| format!("failed to write {}", output.display()))?;
        eprintln!(
            "{}",
            format!("Processed {} -> {}", input.display(), output.display()).green()
        );
    }
    Ok(())
}

/// Lines `start..=end` of `text` (1-based, end clamped), copied byte-for-byte:
/// CRLF endings and a missing final newline survive extraction.
fn extract_range(text: &str, start: usize, end: usize) -> String {
    text.split_inclusive('\n')
        .skip(start - 1)
        .take(end - start + 1)
        .collect()
}

fn output_path(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file = format!("extracted_{name}");
    match out_dir {
        Some(dir) => dir.join(file),
        None => input.with_file_name(file),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_one_based_and_inclusive() {
        let text = "a\nb\nc\nd\n";
        assert_eq!(extract_range(text, 2, 3), "b\nc\n");
        assert_eq!(extract_range(text, 1, 1), "a\n");
    }

    #[test]
    fn end_past_the_file_is_clamped() {
        assert_eq!(extract_range("a\nb\n", 2, 100), "b\n");
        assert_eq!(extract_range("a\n", 5, 10), "");
    }

    #[test]
    fn line_endings_are_copied_verbatim() {
        assert_eq!(extract_range("a\r\nb\r\nc\r\n", 1, 2), "a\r\nb\r\n");
        // A final line without a newline stays without one.
        assert_eq!(extract_range("a\nb", 1, 2), "a\nb");
        assert_eq!(extract_range("a\nb", 2, 2), "b");
    }

    #[test]
    fn extracted_name_is_prefixed() {
        assert_eq!(
            output_path(Path::new("logs/run1.log"), None),
            PathBuf::from("logs/extracted_run1.log")
        );
        assert_eq!(
            output_path(Path::new("run1.log"), Some(Path::new("out"))),
            PathBuf::from("out/extracted_run1.log")
        );
    }
}
