use super::RenderConfig;
use crate::{diff::compare, Diff, DiffNode, DiffOptions, Value};

const MARKER_ADDED: &str = "+ ";
const MARKER_DELETED: &str = "- ";
const MARKER_NONE: &str = "  ";
const MARKER_WIDTH: usize = 2;

pub(super) fn render(diff: &Diff, config: &RenderConfig) -> String {
    let mut lines = Vec::new();
    render_nodes(diff.nodes(), 0, config.indent(), &mut lines);
    if lines.is_empty() {
        return "{\n}".to_owned();
    }
    format!("{{\n{}\n}}", lines.join("\n"))
}

fn render_nodes(nodes: &[DiffNode], depth: usize, indent: usize, out: &mut Vec<String>) {
    for node in nodes {
        match node {
            DiffNode::Nested { key, children } => {
                out.push(format!("{}{MARKER_NONE}{key}: {{", marker_prefix(depth, indent)));
                render_nodes(children, depth + 1, indent, out);
                out.push(format!("{}}}", closing_prefix(depth, indent)));
            }
            DiffNode::Unchanged { key, value } => {
                render_entry(key, value, MARKER_NONE, depth, indent, out);
            }
            DiffNode::Changed { key, old_value, new_value } => {
                render_entry(key, old_value, MARKER_DELETED, depth, indent, out);
                render_entry(key, new_value, MARKER_ADDED, depth, indent, out);
            }
            DiffNode::Added { key, value } => {
                render_entry(key, value, MARKER_ADDED, depth, indent, out);
            }
            DiffNode::Deleted { key, value } => {
                render_entry(key, value, MARKER_DELETED, depth, indent, out);
            }
        }
    }
}

/// Mapping values are expanded by diffing them against themselves, which
/// yields an all-unchanged subtree.
fn render_entry(
    key: &str,
    value: &Value,
    marker: &str,
    depth: usize,
    indent: usize,
    out: &mut Vec<String>,
) {
    let prefix = marker_prefix(depth, indent);
    match value {
        Value::Map(mapping) => {
            out.push(format!("{prefix}{marker}{key}: {{"));
            let expanded = compare(mapping, mapping, &DiffOptions::default());
            render_nodes(expanded.nodes(), depth + 1, indent, out);
            out.push(format!("{}}}", closing_prefix(depth, indent)));
        }
        _ => out.push(format!("{prefix}{marker}{key}: {value}")),
    }
}

fn marker_prefix(depth: usize, indent: usize) -> String {
    " ".repeat(indent * depth + indent - MARKER_WIDTH)
}

fn closing_prefix(depth: usize, indent: usize) -> String {
    " ".repeat(indent * (depth + 1))
}
