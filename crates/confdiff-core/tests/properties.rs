mod common;

use std::collections::BTreeSet;

use common::arb_mapping;
use confdiff_core::{DiffNode, DiffOptions, KeyOrder, Mapping, NodeState};
use proptest::prelude::*;

fn assert_key_union(nodes: &[DiffNode], before: &Mapping, after: &Mapping) {
    let keys: Vec<&str> = nodes.iter().map(DiffNode::key).collect();
    let unique: BTreeSet<&str> = keys.iter().copied().collect();
    assert_eq!(keys.len(), unique.len(), "duplicate keys in {keys:?}");

    let expected: BTreeSet<&str> = before.keys().chain(after.keys()).collect();
    assert_eq!(unique, expected);

    for node in nodes {
        if let DiffNode::Nested { key, children } = node {
            let lhs = before.get(key).and_then(|v| v.as_mapping()).expect("nested before mapping");
            let rhs = after.get(key).and_then(|v| v.as_mapping()).expect("nested after mapping");
            assert_key_union(children, lhs, rhs);
        }
    }
}

fn all_unchanged(nodes: &[DiffNode]) -> bool {
    nodes.iter().all(|node| match node {
        DiffNode::Nested { children, .. } => all_unchanged(children),
        other => other.state() == NodeState::Unchanged,
    })
}

#[test]
fn flat_documents_example() {
    let before: Mapping = [("a", 1.into()), ("b", 2.into())].into_iter().collect();
    let after: Mapping = [("a", 1.into()), ("b", 3.into()), ("c", 4.into())].into_iter().collect();
    let diff = before.diff(&after, &DiffOptions::default());
    assert_eq!(
        diff.nodes(),
        [
            DiffNode::unchanged("a", 1.into()),
            DiffNode::changed("b", 2.into(), 3.into()),
            DiffNode::added("c", 4.into()),
        ]
    );
}

#[test]
fn unsorted_before_document_keeps_its_order() {
    let before: Mapping = [("zeta", 1.into()), ("alpha", 1.into())].into_iter().collect();
    let after: Mapping =
        [("mid", 1.into()), ("alpha", 2.into()), ("beta", 1.into())].into_iter().collect();
    let diff = before.diff(&after, &DiffOptions::default());
    let keys: Vec<&str> = diff.iter().map(DiffNode::key).collect();
    assert_eq!(keys, ["zeta", "alpha", "mid", "beta"]);
}

proptest! {
    #[test]
    fn keys_are_the_union_of_both_documents(before in arb_mapping(), after in arb_mapping()) {
        let diff = before.diff(&after, &DiffOptions::default());
        assert_key_union(diff.nodes(), &before, &after);
    }

    #[test]
    fn before_keys_come_first_in_document_order(before in arb_mapping(), after in arb_mapping()) {
        let diff = before.diff(&after, &DiffOptions::default());
        let keys: Vec<&str> = diff.iter().map(DiffNode::key).collect();
        let mut expected: Vec<&str> = before.keys().collect();
        expected.extend(after.keys().filter(|key| !before.contains_key(key)));
        prop_assert_eq!(keys, expected);
    }

    #[test]
    fn self_comparison_is_all_unchanged(doc in arb_mapping()) {
        let diff = doc.diff(&doc, &DiffOptions::default());
        prop_assert!(all_unchanged(diff.nodes()));
        prop_assert!(!diff.has_changes());
    }

    #[test]
    fn swapping_documents_swaps_added_and_deleted(before in arb_mapping(), after in arb_mapping()) {
        let options = DiffOptions::default().with_key_order(KeyOrder::Sorted);
        let forward = before.diff(&after, &options);
        let backward = after.diff(&before, &options);
        prop_assert_eq!(forward.reverse(), backward);
    }

    #[test]
    fn reverse_is_an_involution(before in arb_mapping(), after in arb_mapping()) {
        let diff = before.diff(&after, &DiffOptions::default());
        prop_assert_eq!(diff.reverse().reverse(), diff);
    }

    #[test]
    fn has_changes_matches_document_equality(before in arb_mapping(), after in arb_mapping()) {
        let diff = before.diff(&after, &DiffOptions::default());
        prop_assert_eq!(diff.has_changes(), before != after);
    }
}
