//! Applying a diff tree to a document.
//!
//! Application is strict: every deleted, changed, and unchanged value must
//! match the target exactly and added keys must be absent, so a diff only
//! applies to the document it was computed from.

use std::fmt;

use crate::{diff::Path, Diff, DiffNode, Mapping, Value};

/// Errors that can occur while applying a diff.
///
/// ```
/// # use confdiff_core::{DiffOptions, InputFormat, Mapping};
/// let base = Mapping::parse("{\"a\":1}", InputFormat::Json)?;
/// let target = Mapping::parse("{\"a\":2}", InputFormat::Json)?;
/// let diff = base.diff(&target, &DiffOptions::default());
/// let other = Mapping::parse("{\"a\":5}", InputFormat::Json)?;
/// let err = diff.apply(&other).unwrap_err();
/// assert_eq!(err.to_string(), "invalid patch at a: expected 1, found 5");
/// # Ok::<(), confdiff_core::ParseError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchError {
    message: String,
}

impl PatchError {
    fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    fn mismatch(path: &Path, expected: &Value, found: Option<&Value>) -> Self {
        match found {
            Some(found) => {
                Self::new(format!("invalid patch at {path}: expected {expected}, found {found}"))
            }
            None => {
                Self::new(format!("invalid patch at {path}: expected {expected}, found nothing"))
            }
        }
    }
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for PatchError {}

impl Diff {
    /// Applies the diff to `target`, returning the patched document.
    ///
    /// ```
    /// # use confdiff_core::{DiffOptions, InputFormat, Mapping};
    /// let base = Mapping::parse("{\"a\":1,\"b\":{\"c\":true}}", InputFormat::Json)?;
    /// let target = Mapping::parse("{\"b\":{\"c\":false},\"d\":[1]}", InputFormat::Json)?;
    /// let diff = base.diff(&target, &DiffOptions::default());
    /// assert_eq!(diff.apply(&base)?, target);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn apply(&self, target: &Mapping) -> Result<Mapping, PatchError> {
        apply_nodes(self.nodes(), target, &mut Path::new())
    }
}

fn apply_nodes(
    nodes: &[DiffNode],
    target: &Mapping,
    path: &mut Path,
) -> Result<Mapping, PatchError> {
    let mut result = target.clone();
    for node in nodes {
        path.push(node.key());
        apply_node(node, &mut result, path)?;
        path.pop();
    }
    Ok(result)
}

fn apply_node(node: &DiffNode, result: &mut Mapping, path: &mut Path) -> Result<(), PatchError> {
    match node {
        DiffNode::Nested { key, children } => {
            let patched = match result.get(key) {
                Some(Value::Map(inner)) => apply_nodes(children, inner, path)?,
                Some(other) => {
                    return Err(PatchError::new(format!(
                        "invalid patch at {path}: expected mapping, found {}",
                        other.kind()
                    )));
                }
                None => {
                    return Err(PatchError::new(format!(
                        "invalid patch at {path}: expected mapping, found nothing"
                    )));
                }
            };
            result.insert(key.clone(), Value::Map(patched));
        }
        DiffNode::Unchanged { key, value } => {
            expect_value(result, key, value, path)?;
        }
        DiffNode::Changed { key, old_value, new_value } => {
            expect_value(result, key, old_value, path)?;
            result.insert(key.clone(), new_value.clone());
        }
        DiffNode::Added { key, value } => {
            if let Some(existing) = result.get(key) {
                return Err(PatchError::new(format!(
                    "invalid patch at {path}: key already exists with value {existing}"
                )));
            }
            result.insert(key.clone(), value.clone());
        }
        DiffNode::Deleted { key, value } => {
            expect_value(result, key, value, path)?;
            result.remove(key);
        }
    }
    Ok(())
}

fn expect_value(
    result: &Mapping,
    key: &str,
    expected: &Value,
    path: &Path,
) -> Result<(), PatchError> {
    match result.get(key) {
        Some(found) if found == expected => Ok(()),
        found => Err(PatchError::mismatch(path, expected, found)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DiffOptions, InputFormat};

    fn json(text: &str) -> Mapping {
        Mapping::parse(text, InputFormat::Json).unwrap()
    }

    #[test]
    fn apply_restores_nested_target() {
        let base = json("{\"a\":{\"b\":1,\"c\":2},\"d\":3}");
        let target = json("{\"a\":{\"b\":1,\"e\":{\"f\":null}},\"g\":\"x\"}");
        let diff = base.diff(&target, &DiffOptions::default());
        assert_eq!(diff.apply(&base).unwrap(), target);
    }

    #[test]
    fn reversed_diff_applies_to_target() {
        let base = json("{\"a\":1,\"b\":{\"c\":2}}");
        let target = json("{\"b\":{\"c\":3},\"d\":4}");
        let diff = base.diff(&target, &DiffOptions::default());
        assert_eq!(diff.reverse().apply(&target).unwrap(), base);
    }

    #[test]
    fn added_key_must_be_absent() {
        let diff = Diff::from_nodes(vec![DiffNode::added("a", 1.into())]);
        let err = diff.apply(&json("{\"a\":2}")).unwrap_err();
        assert_eq!(err.to_string(), "invalid patch at a: key already exists with value 2");
    }

    #[test]
    fn deleted_key_must_be_present() {
        let diff = Diff::from_nodes(vec![DiffNode::nested(
            "a",
            vec![DiffNode::deleted("b", "x".into())],
        )]);
        let err = diff.apply(&json("{\"a\":{}}")).unwrap_err();
        assert_eq!(err.to_string(), "invalid patch at a.b: expected x, found nothing");
    }

    #[test]
    fn nested_node_requires_mapping() {
        let diff = Diff::from_nodes(vec![DiffNode::nested("a", vec![])]);
        let err = diff.apply(&json("{\"a\":[1]}")).unwrap_err();
        assert_eq!(err.to_string(), "invalid patch at a: expected mapping, found list");
    }

    #[test]
    fn empty_diff_is_identity() {
        let doc = json("{\"a\":1}");
        assert_eq!(Diff::empty().apply(&doc).unwrap(), doc);
    }
}
