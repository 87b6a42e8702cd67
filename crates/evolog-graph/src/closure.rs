//! Reachability closure over a single parsed mapping, plus the chain-filtered
//! rendering of that mapping.
//!
//! The closure is a plain worklist BFS: explicit queue + visited set, no
//! recursion, each entity expanded at most once. Only the final set is
//! observable, so traversal order is deliberately unconstrained.

use evolog_dsl::record::Mapping;
use std::collections::{BTreeSet, HashSet, VecDeque};

/// Header prepended to filtered output, followed by one blank line.
const FILTERED_HEADER: &str = "# Filtered evolution chains\n# source -> (target, count), ...";

/// Compute the set of entities reachable from `seeds` via forward edges of
/// `mapping`.
///
/// Seeds are always members of the result, whether or not they appear in the
/// mapping; an entity absent as a source key simply has no outgoing edges.
/// Idempotent: re-running on its own output (or the same inputs) yields the
/// identical set.
pub fn build_closure<I, S>(seeds: I, mapping: &Mapping) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut closure: BTreeSet<String> = seeds.into_iter().map(Into::into).collect();
    let mut worklist: VecDeque<String> = closure.iter().cloned().collect();
    let mut expanded: HashSet<String> = HashSet::new();

    while let Some(current) = worklist.pop_front() {
        if !expanded.insert(current.clone()) {
            continue;
        }
        let Some(evolutions) = mapping.get(&current) else {
            continue;
        };
        for evolution in evolutions {
            if closure.insert(evolution.name.clone()) {
                worklist.push_back(evolution.name.clone());
            }
        }
    }
    closure
}

/// Keep only the entries whose **source** is in the closure.
///
/// Targets are not filtered: an edge to an entity outside the closure was
/// still reached as a single hop, and dropping it would hide structure.
pub fn filter_mapping(mapping: &Mapping, closure: &BTreeSet<String>) -> Mapping {
    mapping
        .iter()
        .filter(|(source, _)| closure.contains(*source))
        .map(|(source, evolutions)| (source.clone(), evolutions.clone()))
        .collect()
}

/// Render the chain-filtered mapping: fixed header comment, blank line, then
/// one `source -> (target, count), ...` line per retained source, in
/// lexicographic source order.
pub fn render_filtered(mapping: &Mapping, closure: &BTreeSet<String>) -> String {
    let mut out = String::from(FILTERED_HEADER);
    out.push('\n');
    for (source, evolutions) in mapping {
        if !closure.contains(source) {
            continue;
        }
        let targets: Vec<String> = evolutions.iter().map(|e| e.to_string()).collect();
        out.push('\n');
        out.push_str(&format!("{source} -> {}", targets.join(", ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use evolog_dsl::record::Evolution;

    fn mapping(entries: &[(&str, &[&str])]) -> Mapping {
        entries
            .iter()
            .map(|(source, targets)| {
                (
                    source.to_string(),
                    targets.iter().map(|t| Evolution::pair(*t, 1)).collect(),
                )
            })
            .collect()
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn chain_is_followed_to_its_end() {
        let m = mapping(&[("A", &["B"]), ("B", &["C"]), ("C", &[])]);
        // "C -> ()" never parses, so model it absent entirely.
        let m: Mapping = m.into_iter().filter(|(_, e)| !e.is_empty()).collect();
        assert_eq!(build_closure(["A".to_string()], &m), set(&["A", "B", "C"]));
    }

    #[test]
    fn seeds_are_members_even_when_unmapped() {
        let m = mapping(&[("A", &["B"])]);
        assert_eq!(
            build_closure(["Zygarde".to_string()], &m),
            set(&["Zygarde"])
        );
    }

    #[test]
    fn cycles_terminate() {
        let m = mapping(&[("A", &["B"]), ("B", &["A", "C"]), ("C", &["C"])]);
        assert_eq!(build_closure(["A".to_string()], &m), set(&["A", "B", "C"]));
    }

    #[test]
    fn closure_is_idempotent() {
        let m = mapping(&[("A", &["B", "C"]), ("C", &["D"])]);
        let first = build_closure(["A".to_string()], &m);
        let second = build_closure(first.iter().cloned(), &m);
        assert_eq!(first, second);
    }

    #[test]
    fn multiple_seeds_union_their_chains() {
        let m = mapping(&[("A", &["B"]), ("X", &["Y"]), ("Q", &["R"])]);
        assert_eq!(
            build_closure(["A".to_string(), "X".to_string()], &m),
            set(&["A", "B", "X", "Y"])
        );
    }

    #[test]
    fn filter_keeps_sources_in_closure_and_all_their_targets() {
        let m = mapping(&[("A", &["B"]), ("B", &["C"]), ("Z", &["W"])]);
        let filtered = filter_mapping(&m, &set(&["A", "B"]));
        assert_eq!(filtered.len(), 2);
        assert!(filtered.contains_key("A"));
        assert!(filtered.contains_key("B"));
        // B's edge to C is kept even though C is outside the closure.
        assert_eq!(filtered["B"][0].name, "C");
    }

    #[test]
    fn rendered_output_lists_only_closure_sources() {
        let m = mapping(&[("A", &["B"]), ("B", &["C"]), ("Z", &["W"])]);
        let text = render_filtered(&m, &set(&["A", "B"]));
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with('#'));
        assert!(lines.next().unwrap().starts_with('#'));
        assert_eq!(lines.next().unwrap(), "");
        assert_eq!(lines.next().unwrap(), "A -> (B, 1)");
        assert_eq!(lines.next().unwrap(), "B -> (C, 1)");
        assert_eq!(lines.next(), None);
    }
}
