//! Line parsers for the evolog grammars.
//!
//! Every grammar shares the same left-hand side: a source entity, a literal
//! `->` (whitespace around it is insignificant), then a grammar-specific
//! right-hand side. Parsing is best-effort and accumulating:
//!
//! - a line with no `->`, or an empty source, fails as [`LineError::Malformed`];
//! - an individual parenthesized item failing its numeric/non-empty
//!   constraints is dropped with a per-item diagnostic, and the record
//!   survives as long as one item remains;
//! - a line whose every item was dropped fails as [`LineError::EmptyRecord`].
//!
//! No failure is ever fatal: mapping parses return a partial [`Mapping`] plus
//! the full diagnostic list, and an input with zero valid records is a
//! successful empty result.

use nom::{
    bytes::complete::take_while1,
    character::complete::{char as pchar, digit1, multispace0},
    combinator::{all_consuming, opt, recognize},
    sequence::{preceded, tuple},
    IResult,
};
use thiserror::Error;

use crate::record::{BranchRecord, Diagnostic, Evolution, Grammar, Mapping, WeightedRecord};

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LineError {
    /// No `->` separator, or the source entity trims to empty.
    #[error("malformed line ({0})")]
    Malformed(&'static str),
    /// Every right-hand-side item was invalid, or the list was empty.
    #[error("no valid entries on right-hand side")]
    EmptyRecord,
}

// ============================================================================
// Shared left-hand side
// ============================================================================

/// Split a line at the first `->` into (trimmed source, trimmed right-hand side).
pub fn split_arrow(line: &str) -> Result<(&str, &str), LineError> {
    let (lhs, rhs) = line
        .split_once("->")
        .ok_or(LineError::Malformed("no '->' separator"))?;
    let source = lhs.trim();
    if source.is_empty() {
        return Err(LineError::Malformed("empty source entity"));
    }
    Ok((source, rhs.trim()))
}

// ============================================================================
// Item grammars (nom)
// ============================================================================

/// `\d+(\.\d+)?` — unsigned decimal. Signs are deliberately rejected: a
/// negative count or percentage must read as an invalid item, not a number.
fn decimal_number(input: &str) -> IResult<&str, &str> {
    recognize(tuple((digit1, opt(preceded(pchar('.'), digit1)))))(input)
}

/// Target-entity text: anything up to the field separator. May contain
/// spaces (`Mr. Mime`, `Porygon 2`); trimmed and checked non-empty later.
fn item_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c != ',')(input)
}

/// Body of a `(target, count)` item, parens already stripped.
fn pair_body(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, name) = item_name(input)?;
    let (input, _) = pchar(',')(input)?;
    let (input, _) = multispace0(input)?;
    let (input, count) = digit1(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, (name, count)))
}

/// Body of a `(target, count, percentage)` item, parens already stripped.
fn triple_body(input: &str) -> IResult<&str, (&str, &str, &str)> {
    let (input, name) = item_name(input)?;
    let (input, _) = pchar(',')(input)?;
    let (input, _) = multispace0(input)?;
    let (input, count) = digit1(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = pchar(',')(input)?;
    let (input, _) = multispace0(input)?;
    let (input, percentage) = decimal_number(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, (name, count, percentage)))
}

/// Extract the contents of every `(...)` span on a right-hand side.
///
/// Matches the tolerant findall-style behavior the formats have always had:
/// text between items (separating commas, stray words) is ignored, and an
/// unclosed trailing paren ends the scan.
fn paren_items(rhs: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut rest = rhs;
    while let Some(open) = rest.find('(') {
        let after = &rest[open + 1..];
        match after.find(')') {
            Some(close) => {
                items.push(&after[..close]);
                rest = &after[close + 1..];
            }
            None => break,
        }
    }
    items
}

fn parse_pair_item(item: &str) -> Result<Evolution, String> {
    let (_, (name, count)) =
        all_consuming(pair_body)(item).map_err(|_| format!("invalid pair item '({item})'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty target entity in '({item})'"));
    }
    let count: u64 = count
        .parse()
        .map_err(|_| format!("invalid count in '({item})'"))?;
    Ok(Evolution::pair(name, count))
}

fn parse_triple_item(item: &str) -> Result<Evolution, String> {
    let (_, (name, count, percentage)) =
        all_consuming(triple_body)(item).map_err(|_| format!("invalid triple item '({item})'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty target entity in '({item})'"));
    }
    let count: u64 = count
        .parse()
        .map_err(|_| format!("invalid count in '({item})'"))?;
    if count == 0 {
        return Err(format!("invalid count 0 for '{name}'"));
    }
    let percentage: f64 = percentage
        .parse()
        .map_err(|_| format!("invalid percentage in '({item})'"))?;
    if !(0.0..=100.0).contains(&percentage) {
        return Err(format!("invalid percentage {percentage} for '{name}'"));
    }
    Ok(Evolution::triple(name, count, percentage))
}

// ============================================================================
// Line parsers
// ============================================================================

/// Parse one pair/triple-grammar line.
///
/// Invalid items are dropped individually, each with a diagnostic tagged
/// `line_no`; the record survives if at least one item remains.
pub fn parse_weighted_line(
    line: &str,
    grammar: Grammar,
    line_no: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<WeightedRecord, LineError> {
    let (source, rhs) = split_arrow(line)?;
    let mut evolutions = Vec::new();
    for item in paren_items(rhs) {
        let parsed = match grammar {
            Grammar::Pair => parse_pair_item(item),
            Grammar::Triple => parse_triple_item(item),
        };
        match parsed {
            Ok(evolution) => evolutions.push(evolution),
            Err(reason) => diagnostics.push(Diagnostic::new(
                line_no,
                format!("skipped evolution for {source} ({reason})"),
            )),
        }
    }
    if evolutions.is_empty() {
        return Err(LineError::EmptyRecord);
    }
    Ok(WeightedRecord {
        source: source.to_string(),
        evolutions,
    })
}

/// Parse one branch-grammar line: `source -> a|b|c`.
///
/// Empty targets are dropped; the branch index of a surviving target is its
/// position among the survivors. This parser keeps no diagnostics — the
/// aggregation pipeline it feeds is deliberately looser than the
/// validation-oriented mapping parses.
pub fn parse_branch_line(line: &str) -> Result<BranchRecord, LineError> {
    let (source, rhs) = split_arrow(line)?;
    let branches: Vec<String> = rhs
        .split('|')
        .map(str::trim)
        .filter(|target| !target.is_empty())
        .map(str::to_string)
        .collect();
    if branches.is_empty() {
        return Err(LineError::EmptyRecord);
    }
    Ok(BranchRecord {
        source: source.to_string(),
        branches,
    })
}

// ============================================================================
// Whole-file mapping parse
// ============================================================================

/// Parse a whole pair/triple-grammar file into a [`Mapping`].
///
/// Every line is examined (there is no header convention in these files).
/// Blank and failed lines are recorded as diagnostics and skipped; a later
/// line for a source already seen replaces it. Zero valid records is a
/// successful empty mapping, never an error.
pub fn parse_mapping(text: &str, grammar: Grammar) -> (Mapping, Vec<Diagnostic>) {
    let mut mapping = Mapping::new();
    let mut diagnostics = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            diagnostics.push(Diagnostic::new(line_no, "skipped (empty)"));
            continue;
        }
        match parse_weighted_line(line, grammar, line_no, &mut diagnostics) {
            Ok(record) => {
                mapping.insert(record.source, record.evolutions);
            }
            Err(LineError::Malformed(reason)) => {
                diagnostics.push(Diagnostic::new(line_no, format!("skipped ({reason}): {line}")));
            }
            Err(LineError::EmptyRecord) => {
                diagnostics.push(Diagnostic::new(
                    line_no,
                    format!("no valid evolution entries: {line}"),
                ));
            }
        }
    }
    (mapping, diagnostics)
}
