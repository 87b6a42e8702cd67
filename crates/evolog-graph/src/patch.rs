//! Percentage patching: derive per-source percentages for a pair-grammar
//! mapping and render it back out as triple-grammar lines.
//!
//! Each surviving evolution's percentage is its share of the source's total
//! count, rounded to two decimals. The rendered output re-parses under the
//! triple grammar, which is what downstream validation consumes.

use evolog_dsl::record::{Evolution, Mapping};

/// One patched source: every evolution carries `percentage: Some(_)` and a
/// positive count.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchRecord {
    pub source: String,
    pub evolutions: Vec<Evolution>,
}

/// Attach percentages to a pair-grammar mapping.
///
/// Zero-count evolutions are dropped (a zero share is unrepresentable under
/// the triple grammar's positive-count rule), and a source whose surviving
/// total is zero is skipped entirely; both cases produce a note. Records come
/// back in source order with evolutions sorted by target name.
pub fn patch_percentages(mapping: &Mapping) -> (Vec<PatchRecord>, Vec<String>) {
    let mut records = Vec::new();
    let mut notes = Vec::new();

    for (source, evolutions) in mapping {
        let mut survivors: Vec<&Evolution> = Vec::new();
        for evolution in evolutions {
            if evolution.count == 0 {
                notes.push(format!(
                    "skipped evolution for {source} -> {} (non-positive count)",
                    evolution.name
                ));
            } else {
                survivors.push(evolution);
            }
        }
        let total: u64 = survivors.iter().map(|e| e.count).sum();
        if total == 0 {
            notes.push(format!("skipped {source} (total count is zero)"));
            continue;
        }
        let mut patched: Vec<Evolution> = survivors
            .into_iter()
            .map(|e| {
                let share = e.count as f64 / total as f64 * 100.0;
                Evolution::triple(e.name.clone(), e.count, round2(share))
            })
            .collect();
        patched.sort_by(|a, b| a.name.cmp(&b.name));
        records.push(PatchRecord {
            source: source.clone(),
            evolutions: patched,
        });
    }
    (records, notes)
}

/// Render patched records as triple-grammar lines, one source per line.
pub fn render_patch(records: &[PatchRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len());
    for record in records {
        let items: Vec<String> = record.evolutions.iter().map(|e| e.to_string()).collect();
        lines.push(format!("{} -> {}", record.source, items.join(", ")));
    }
    lines.join("\n")
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use evolog_dsl::parse::parse_mapping;
    use evolog_dsl::record::Grammar;

    fn pair_mapping(text: &str) -> Mapping {
        let (mapping, diags) = parse_mapping(text, Grammar::Pair);
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
        mapping
    }

    #[test]
    fn percentages_are_shares_of_the_source_total() {
        let mapping = pair_mapping("Eevee -> (Vaporeon, 3), (Jolteon, 1)\n");
        let (records, notes) = patch_percentages(&mapping);
        assert!(notes.is_empty());
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].evolutions,
            vec![
                Evolution::triple("Jolteon", 1, 25.0),
                Evolution::triple("Vaporeon", 3, 75.0),
            ]
        );
    }

    #[test]
    fn thirds_round_to_two_decimals() {
        let mapping = pair_mapping("A -> (B, 1), (C, 1), (D, 1)\n");
        let (records, _) = patch_percentages(&mapping);
        for evolution in &records[0].evolutions {
            assert_eq!(evolution.percentage, Some(33.33));
        }
    }

    #[test]
    fn zero_counts_are_dropped_with_a_note() {
        let mapping = pair_mapping("A -> (B, 0), (C, 2)\n");
        let (records, notes) = patch_percentages(&mapping);
        assert_eq!(records[0].evolutions, vec![Evolution::triple("C", 2, 100.0)]);
        assert_eq!(notes.len(), 1);
        assert!(notes[0].contains("A -> B"));
    }

    #[test]
    fn all_zero_source_is_skipped_entirely() {
        let mapping = pair_mapping("A -> (B, 0)\nX -> (Y, 1)\n");
        let (records, notes) = patch_percentages(&mapping);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].source, "X");
        assert_eq!(notes.len(), 2);
    }

    #[test]
    fn rendered_patch_reparses_under_the_triple_grammar() {
        let mapping = pair_mapping("Eevee -> (Vaporeon, 3), (Jolteon, 1)\nPichu -> (Pikachu, 4)\n");
        let (records, _) = patch_percentages(&mapping);
        let rendered = render_patch(&records);
        assert_eq!(
            rendered,
            "Eevee -> (Jolteon, 1, 25.00), (Vaporeon, 3, 75.00)\n\
             Pichu -> (Pikachu, 4, 100.00)"
        );
        let (reparsed, diags) = parse_mapping(&rendered, Grammar::Triple);
        assert!(diags.is_empty());
        assert_eq!(reparsed.len(), 2);
        assert_eq!(reparsed["Eevee"][1], Evolution::triple("Vaporeon", 3, 75.0));
    }
}
