use super::DiffNode;
use crate::Value;

/// Classifies a key present on both sides whose values are compared whole.
///
/// A mapping facing a scalar lands here too and always yields `Changed`.
pub(super) fn diff_values(key: &str, before: &Value, after: &Value) -> DiffNode {
    if before == after {
        DiffNode::Unchanged { key: key.to_owned(), value: before.clone() }
    } else {
        DiffNode::Changed {
            key: key.to_owned(),
            old_value: before.clone(),
            new_value: after.clone(),
        }
    }
}
