use evolog_dsl::record::{Evolution, Mapping};
use evolog_graph::closure::build_closure;
use evolog_graph::freq::compile_frequencies;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn entity() -> impl Strategy<Value = String> {
    // A small alphabet so random graphs actually share nodes.
    proptest::string::string_regex("[A-E][0-3]").unwrap()
}

fn mapping() -> impl Strategy<Value = Mapping> {
    proptest::collection::btree_map(
        entity(),
        proptest::collection::vec(entity(), 1..4)
            .prop_map(|targets| targets.into_iter().map(|t| Evolution::pair(t, 1)).collect()),
        0..8,
    )
}

fn seeds() -> impl Strategy<Value = BTreeSet<String>> {
    proptest::collection::btree_set(entity(), 0..4)
}

fn branch_log() -> impl Strategy<Value = String> {
    let line = (entity(), proptest::collection::vec(entity(), 1..4))
        .prop_map(|(source, targets)| format!("{source} -> {}", targets.join("|")));
    proptest::collection::vec(line, 0..10).prop_map(|lines| {
        let mut text = String::from("--header--");
        for line in lines {
            text.push('\n');
            text.push_str(&line);
        }
        text
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn closure_contains_seeds(m in mapping(), s in seeds()) {
        let closure = build_closure(s.iter().cloned(), &m);
        prop_assert!(s.is_subset(&closure));
    }

    #[test]
    fn closure_is_a_fixed_point(m in mapping(), s in seeds()) {
        let once = build_closure(s.iter().cloned(), &m);
        let twice = build_closure(once.iter().cloned(), &m);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn closure_members_have_all_targets_present(m in mapping(), s in seeds()) {
        let closure = build_closure(s.iter().cloned(), &m);
        for member in &closure {
            if let Some(evolutions) = m.get(member) {
                for evolution in evolutions {
                    prop_assert!(closure.contains(&evolution.name));
                }
            }
        }
    }

    #[test]
    fn aggregation_is_commutative_over_files(files in proptest::collection::vec(branch_log(), 0..5)) {
        let forward = compile_frequencies(&files);
        let reversed: Vec<String> = files.iter().rev().cloned().collect();
        prop_assert_eq!(forward, compile_frequencies(&reversed));
    }
}
