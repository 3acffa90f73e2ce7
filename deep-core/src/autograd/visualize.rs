//! Text and Graphviz renderings of the backward graph.

use std::collections::HashSet;
use std::fmt::Write;

use crate::autograd::GraphNode;
use crate::tensor::Tensor;

/// Renders the backward graph of `root` as an indented tree.
///
/// The first line is the root node's kind. Every predecessor reached at depth `level`
/// is printed as `"====" * level` followed by `"{level}: {kind}"`, depth first and in
/// slot order. Empty slots are skipped, and a node shared by several consumers is
/// printed once per path that reaches it.
///
/// Returns `None` if `root` was not produced by a recorded operation.
pub fn render_graph(root: &Tensor) -> Option<String> {
    let node = GraphNode::root(root)?;
    let mut out = String::new();
    out.push_str(node.name());
    out.push('\n');
    render_next(&node, 1, &mut out);
    Some(out)
}

fn render_next(node: &GraphNode, level: usize, out: &mut String) {
    for next in node.next_functions().into_iter().flatten() {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{}{}: {}", "====".repeat(level), level, next.name());
        render_next(&next, level + 1, out);
    }
}

/// Prints the backward graph of `root` to stdout.
pub fn print_graph(root: &Tensor) {
    println!("Start visualizing...");
    match render_graph(root) {
        Some(tree) => print!("{}", tree),
        None => println!("Tensor has no grad_fn; nothing to visualize."),
    }
    println!("End of visualization.");
}

/// Number of distinct nodes reachable from the root, the root included.
///
/// Returns 0 if `root` has no `grad_fn`.
pub fn count_nodes(root: &Tensor) -> usize {
    let Some(node) = GraphNode::root(root) else {
        return 0;
    };
    let mut seen = HashSet::new();
    let mut stack = vec![node];
    while let Some(node) = stack.pop() {
        if seen.insert(node.id()) {
            stack.extend(node.next_functions().into_iter().flatten());
        }
    }
    seen.len()
}

/// Graphviz DOT export of the backward graph of `root`.
///
/// One vertex per distinct node; edges point from a predecessor to the node that
/// consumes it. Returns `None` if `root` has no `grad_fn`.
pub fn to_dot(root: &Tensor) -> Option<String> {
    let node = GraphNode::root(root)?;
    let mut dot = String::from("digraph backward {\n");
    dot.push_str("  rankdir=BT;\n");
    dot.push_str("  node [shape=box, fontname=\"monospace\"];\n");

    let mut seen = HashSet::new();
    let mut stack = vec![node];
    while let Some(node) = stack.pop() {
        if !seen.insert(node.id()) {
            continue;
        }
        let label = match node.variable() {
            Some(tensor) => format!("{}\\n{:?}", node.name(), tensor.shape()),
            None => node.name().to_string(),
        };
        let fill = if node.variable().is_some() {
            "lightblue"
        } else {
            "lightgrey"
        };
        let _ = writeln!(
            dot,
            "  n{} [label=\"{}\", style=filled, fillcolor={}];",
            node.id(),
            label,
            fill
        );
        for next in node.next_functions().into_iter().flatten() {
            let _ = writeln!(dot, "  n{} -> n{};", next.id(), node.id());
            stack.push(next);
        }
    }
    dot.push_str("}\n");
    Some(dot)
}

#[cfg(test)]
#[path = "visualize_test.rs"]
mod tests;
