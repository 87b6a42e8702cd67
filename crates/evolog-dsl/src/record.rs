//! Typed records shared by every evolog pipeline.
//!
//! Entities are opaque, case-sensitive names. There is no registry: an entity
//! exists exactly because some parsed line mentioned it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A mapping from source entity to its outgoing weighted edges.
///
/// `BTreeMap` gives deterministic, lexicographic iteration for free, which is
/// the order every renderer wants. A later line for the same source replaces
/// the earlier one (last write wins).
pub type Mapping = BTreeMap<String, Vec<Evolution>>;

/// Right-hand-side grammar selector for mapping parses.
///
/// The branch grammar is not listed here: it produces [`BranchRecord`]s for
/// the frequency aggregator and never feeds a [`Mapping`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grammar {
    /// `(target, count)` items, count a non-negative integer.
    Pair,
    /// `(target, count, percentage)` items, count positive, percentage in
    /// `[0, 100]` inclusive.
    Triple,
}

/// One weighted outgoing edge of a source entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evolution {
    pub name: String,
    pub count: u64,
    /// Present only for triple-grammar records (and patched output).
    pub percentage: Option<f64>,
}

impl Evolution {
    pub fn pair(name: impl Into<String>, count: u64) -> Self {
        Evolution {
            name: name.into(),
            count,
            percentage: None,
        }
    }

    pub fn triple(name: impl Into<String>, count: u64, percentage: f64) -> Self {
        Evolution {
            name: name.into(),
            count,
            percentage: Some(percentage),
        }
    }
}

impl fmt::Display for Evolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.percentage {
            Some(p) => write!(f, "({}, {}, {:.2})", self.name, self.count, p),
            None => write!(f, "({}, {})", self.name, self.count),
        }
    }
}

/// One parsed pair/triple-grammar line. `evolutions` is non-empty: a line
/// whose every item was dropped is a parse failure, not an empty record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedRecord {
    pub source: String,
    pub evolutions: Vec<Evolution>,
}

/// One parsed branch-grammar line. Position in `branches` is the 0-based
/// branch index; `branches` is non-empty after a successful parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRecord {
    pub source: String,
    pub branches: Vec<String>,
}

/// A non-fatal per-line problem, accumulated during a parse and surfaced to
/// the caller alongside the partial result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// 1-based line number in the input text.
    pub line: usize,
    pub reason: String,
}

impl Diagnostic {
    pub fn new(line: usize, reason: impl Into<String>) -> Self {
        Diagnostic {
            line,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {}", self.line, self.reason)
    }
}
