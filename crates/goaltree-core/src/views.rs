//! Text rendering of goals for the CLI.

use crate::goal::{GoalId, GoalTree};

pub const DEFAULT_INDENT: usize = 4;

/// Indented rendering of a goal and its subtree. Done goals get an `(X)`
/// suffix; auto goals additionally get `(auto)`.
pub fn pretty(tree: &GoalTree, id: GoalId, indent: usize) -> String {
    let mut out = String::new();
    write_goal(tree, id, 0, indent, &mut out);
    out
}

/// Completion percentage as printed by `--progress`: `100%` for done goals
/// (auto goals with no children are vacuously done), `0%` for explicit
/// not-done goals, otherwise the share of immediate children that are done.
pub fn progress(tree: &GoalTree, id: GoalId) -> String {
    if tree.is_auto(id) {
        let children = tree.children(id);
        if children.is_empty() {
            return "100%".to_string();
        }
        let done = children
            .iter()
            .filter(|child| tree.effective_done(**child))
            .count();
        format!("{:.0}%", done as f64 / children.len() as f64 * 100.0)
    } else if tree.effective_done(id) {
        "100%".to_string()
    } else {
        "0%".to_string()
    }
}

fn write_goal(tree: &GoalTree, id: GoalId, depth: usize, indent: usize, out: &mut String) {
    out.push_str(&" ".repeat(depth * indent));
    out.push_str(tree.title(id));
    if tree.effective_done(id) {
        out.push_str(" (X)");
    }
    if tree.is_auto(id) {
        out.push_str(" (auto)");
    }
    out.push('\n');
    for child in tree.children(id) {
        write_goal(tree, *child, depth + 1, indent, out);
    }
}
