use crate::{diff::Path, Diff, DiffNode, Value};

const COMPLEX_VALUE: &str = "[complex value]";

pub(super) fn render(diff: &Diff) -> String {
    let lines: Vec<String> =
        diff.changes().into_iter().filter_map(|(path, node)| render_node(&path, node)).collect();
    lines.join("\n")
}

fn render_node(path: &Path, node: &DiffNode) -> Option<String> {
    match node {
        DiffNode::Nested { .. } | DiffNode::Unchanged { .. } => None,
        DiffNode::Changed { old_value, new_value, .. } => Some(format!(
            "Property '{path}' was changed from {} to {}",
            repr(old_value),
            repr(new_value)
        )),
        DiffNode::Added { value, .. } => {
            Some(format!("Property '{path}' was added with value: {}", repr(value)))
        }
        DiffNode::Deleted { .. } => Some(format!("Property '{path}' was deleted")),
    }
}

fn repr(value: &Value) -> String {
    match value {
        Value::Map(_) | Value::List(_) => COMPLEX_VALUE.to_owned(),
        Value::String(s) => format!("'{s}'"),
        other => other.to_string(),
    }
}
