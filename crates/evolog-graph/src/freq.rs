//! Frequency aggregation over branch-grammar log files.
//!
//! Each input file is one observed run: a header line (always skipped,
//! whatever it says), then `source -> a|b|c` lines. Aggregation folds every
//! file into a single table counting how often each (source, branch index,
//! target) triple was observed. Addition is commutative, so the final table
//! never depends on file order.
//!
//! The table is keyed by the composite (source, branch) rather than nested
//! maps: one `BTreeMap` walk already yields the exact (source asc, branch
//! asc) order the report wants.

use evolog_dsl::parse::parse_branch_line;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Occurrence counts keyed by (source entity, branch index) → target entity.
///
/// Every stored count is ≥ 1: a key exists only because some input file
/// contained that exact (source, branch, target) observation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<(String, u32), BTreeMap<String, u64>>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observation of `source -> target` at `branch`.
    pub fn record(&mut self, source: &str, branch: u32, target: &str) {
        let slot = self
            .counts
            .entry((source.to_string(), branch))
            .or_default()
            .entry(target.to_string())
            .or_insert(0);
        *slot += 1;
    }

    /// Count for one (source, branch, target) triple; 0 if never observed.
    pub fn count(&self, source: &str, branch: u32, target: &str) -> u64 {
        self.counts
            .get(&(source.to_string(), branch))
            .and_then(|targets| targets.get(target))
            .copied()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct (source, branch) keys.
    pub fn branch_count(&self) -> usize {
        self.counts.len()
    }

    /// Flatten into report entries: sources lexicographic, branches
    /// ascending. A source with more than one branch renders per-branch
    /// pseudo-entities `{source}{branch+1}` (1-based suffix) so divergent
    /// outcomes stay distinct in the flat report; a single-branch source
    /// keeps its plain name. Targets are sorted by descending count, ties by
    /// ascending target name.
    pub fn to_report(&self) -> Report {
        let mut per_source: BTreeMap<&str, Vec<(u32, &BTreeMap<String, u64>)>> = BTreeMap::new();
        for ((source, branch), targets) in &self.counts {
            per_source
                .entry(source.as_str())
                .or_default()
                .push((*branch, targets));
        }

        let mut entries = Vec::new();
        for (source, branches) in per_source {
            let multi_branch = branches.len() > 1;
            for (branch, targets) in branches {
                let name = if multi_branch {
                    format!("{source}{}", branch + 1)
                } else {
                    source.to_string()
                };
                let mut evolutions: Vec<TargetCount> = targets
                    .iter()
                    .map(|(target, count)| TargetCount {
                        name: target.clone(),
                        count: *count,
                    })
                    .collect();
                evolutions.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
                entries.push(ReportEntry { name, evolutions });
            }
        }
        Report { entries }
    }
}

/// One target's occurrence count within a report entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetCount {
    pub name: String,
    pub count: u64,
}

/// One rendered line of the frequency report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    /// Source entity, or `{source}{branch+1}` for multi-branch sources.
    pub name: String,
    /// Targets in descending-count order (ties: ascending name).
    pub evolutions: Vec<TargetCount>,
}

/// The full frequency report, in final rendering order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub entries: Vec<ReportEntry>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, entry) in self.entries.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            let targets: Vec<String> = entry
                .evolutions
                .iter()
                .map(|t| format!("({}, {})", t.name, t.count))
                .collect();
            write!(f, "{} -> {}", entry.name, targets.join(", "))?;
        }
        Ok(())
    }
}

/// Fold branch-grammar file contents into a [`FrequencyTable`].
///
/// Per file: the first line is always a header and is skipped; blank lines
/// are skipped silently; every other line goes through the branch parser,
/// and lines that fail to parse are skipped without affecting the rest.
pub fn compile_frequencies<I, S>(file_texts: I) -> FrequencyTable
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut table = FrequencyTable::new();
    for text in file_texts {
        for line in text.as_ref().lines().skip(1) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Ok(record) = parse_branch_line(line) else {
                continue;
            };
            for (index, target) in record.branches.iter().enumerate() {
                table.record(&record.source, index as u32, target);
            }
        }
    }
    table
}

/// Render the deterministic text report for a table.
pub fn render_report(table: &FrequencyTable) -> String {
    table.to_report().to_string()
}
