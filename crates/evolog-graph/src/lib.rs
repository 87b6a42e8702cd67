//! Evolution-graph computations over parsed evolog records.
//!
//! Three concerns live here, all pure transformations over in-memory
//! containers (no I/O, no shared state, single pass over their inputs):
//!
//! - [`freq`]: fold branch-grammar logs from many files into a
//!   (source, branch) → target → count table and render it as a report.
//! - [`closure`]: reachable-set computation over a single mapping from a
//!   seed set, plus the chain-filtered rendering of that mapping.
//! - [`patch`]: derive per-source percentages for a pair-grammar mapping and
//!   render it as triple-grammar lines.

pub mod closure;
pub mod freq;
pub mod patch;

pub use closure::{build_closure, filter_mapping, render_filtered};
pub use freq::{compile_frequencies, render_report, FrequencyTable, Report, ReportEntry};
pub use patch::{patch_percentages, render_patch, PatchRecord};
