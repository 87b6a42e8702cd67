//! Evolog line formats (canonical dialects)
//!
//! This crate defines the line-oriented text formats used by evolution log
//! tooling and provides parsers + typed records for each grammar:
//!
//! - **Branch grammar**: `Eevee -> Vaporeon|Jolteon|Flareon` — raw per-run
//!   logs, one alternative outcome per `|`-separated slot.
//! - **Pair grammar**: `Eevee -> (Vaporeon, 12), (Jolteon, 9)` — aggregated
//!   frequency reports.
//! - **Triple grammar**: `Eevee -> (Vaporeon, 12, 57.14)` — frequency reports
//!   patched with per-source percentages.
//!
//! We intentionally keep the grammars explicit rather than auto-detecting:
//! each pipeline knows which format it consumes, and a file that mixes
//! formats should surface per-line diagnostics instead of silently parsing
//! under the wrong rules.

pub mod parse;
pub mod record;

pub use parse::{parse_branch_line, parse_mapping, parse_weighted_line, LineError};
pub use record::{BranchRecord, Diagnostic, Evolution, Grammar, Mapping, WeightedRecord};
