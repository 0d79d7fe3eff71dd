use super::{primitives, DiffNode};
use crate::{DiffOptions, KeyOrder, Mapping, Value};

/// Compares two mappings key by key.
///
/// Before-document keys come first in their original order, then keys only
/// present in the after-document. Only a key holding a mapping on both sides
/// is descended into; every other pairing is compared as a whole value.
pub(super) fn diff_mappings(
    before: &Mapping,
    after: &Mapping,
    options: &DiffOptions,
) -> Vec<DiffNode> {
    let mut nodes = Vec::with_capacity(before.len().max(after.len()));

    for (key, value) in before.iter() {
        let node = match (value, after.get(key)) {
            (Value::Map(lhs), Some(Value::Map(rhs))) => {
                DiffNode::Nested { key: key.to_owned(), children: diff_mappings(lhs, rhs, options) }
            }
            (lhs, Some(rhs)) => primitives::diff_values(key, lhs, rhs),
            (lhs, None) => DiffNode::Deleted { key: key.to_owned(), value: lhs.clone() },
        };
        nodes.push(node);
    }

    for (key, value) in after.iter() {
        if before.contains_key(key) {
            continue;
        }
        nodes.push(DiffNode::Added { key: key.to_owned(), value: value.clone() });
    }

    if options.key_order() == KeyOrder::Sorted {
        nodes.sort_by(|a, b| a.key().cmp(b.key()));
    }

    nodes
}
