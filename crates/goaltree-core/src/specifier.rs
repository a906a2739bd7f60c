//! Dotted-path addressing of goals.
//!
//! A specifier like `house.kitchen.0` walks the tree one segment at a time.
//! A segment that parses as an integer addresses a zero-based position in
//! the current level; any other segment matches a title exactly. The two
//! rules are mutually exclusive, which is why integer titles are rejected.

use log::debug;
use thiserror::Error;

use crate::goal::{Completion, GoalId, GoalTree};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpecifierError {
    #[error("index {index} out of range ({len} goals at this level)")]
    IndexOutOfRange { index: i64, len: usize },
    #[error("invalid title {title:?}: a goal title must be non-empty and must not be an integer")]
    InvalidTitle { title: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Title(String),
    Index(i64),
}

pub fn parse_specifier(specifier: &str) -> Vec<Segment> {
    specifier
        .split('.')
        .map(|part| match part.parse::<i64>() {
            Ok(index) => Segment::Index(index),
            Err(_) => Segment::Title(part.to_string()),
        })
        .collect()
}

/// Creates goals along `specifier`, returning true when at least one goal
/// was created. Goals created along the way start as explicit not-done;
/// every level that gains or already holds a deeper level is forced into
/// auto mode.
pub fn create(tree: &mut GoalTree, specifier: &str) -> Result<bool, SpecifierError> {
    let segments = parse_specifier(specifier);

    // Syntactic checks before any mutation: a leaf must be created by
    // title, and an empty title could never be addressed again.
    for (position, segment) in segments.iter().enumerate() {
        match segment {
            Segment::Index(index) if position + 1 == segments.len() => {
                return Err(SpecifierError::InvalidTitle {
                    title: index.to_string(),
                });
            }
            Segment::Title(title) if title.is_empty() => {
                return Err(SpecifierError::InvalidTitle {
                    title: title.clone(),
                });
            }
            _ => {}
        }
    }

    let mut parent: Option<GoalId> = None;
    let mut created = false;

    for (position, segment) in segments.iter().enumerate() {
        let last = position + 1 == segments.len();
        let current = match segment {
            Segment::Index(index) => {
                let id = resolve_index(tree, parent, *index)?;
                // Descending past an existing goal means it definitely has
                // children, so its parent is promoted to auto mode.
                if let Some(parent_id) = parent {
                    tree.set_completion(parent_id, Completion::Auto);
                }
                id
            }
            Segment::Title(title) => match child_by_title(tree, parent, title) {
                Some(id) => {
                    if !last {
                        if let Some(parent_id) = parent {
                            tree.set_completion(parent_id, Completion::Auto);
                        }
                    }
                    id
                }
                None => {
                    if let Some(parent_id) = parent {
                        tree.set_completion(parent_id, Completion::Auto);
                    }
                    created = true;
                    tree.add_goal(parent, title.clone(), Completion::Explicit(false))
                }
            },
        };
        parent = Some(current);
    }

    debug!("create {specifier:?}: created={created}");
    Ok(created)
}

/// Resolves `specifier` to a goal, or `None` when a title segment has no
/// match. An out-of-range index segment is an error, not a miss.
pub fn find(tree: &GoalTree, specifier: &str) -> Result<Option<GoalId>, SpecifierError> {
    let mut current: Option<GoalId> = None;
    for segment in parse_specifier(specifier) {
        let next = match segment {
            Segment::Index(index) => Some(resolve_index(tree, current, index)?),
            Segment::Title(title) => child_by_title(tree, current, &title),
        };
        match next {
            Some(id) => current = Some(id),
            None => return Ok(None),
        }
    }
    Ok(current)
}

/// Deletes the goal addressed by `specifier` together with its subtree,
/// returning true when something was removed. A parent left childless is
/// reset to explicit not-done rather than staying auto, which would make it
/// vacuously complete.
pub fn delete(tree: &mut GoalTree, specifier: &str) -> Result<bool, SpecifierError> {
    let segments = parse_specifier(specifier);
    let mut parent: Option<GoalId> = None;

    for (position, segment) in segments.iter().enumerate() {
        let next = match segment {
            Segment::Index(index) => Some(resolve_index(tree, parent, *index)?),
            Segment::Title(title) => child_by_title(tree, parent, title),
        };
        let Some(id) = next else {
            return Ok(false);
        };

        if position + 1 == segments.len() {
            let removed_parent = tree.remove(id);
            if let Some(parent_id) = removed_parent {
                if tree.children(parent_id).is_empty() {
                    tree.set_completion(parent_id, Completion::Explicit(false));
                }
            }
            debug!("deleted {specifier:?}");
            return Ok(true);
        }
        parent = Some(id);
    }

    Ok(false)
}

fn resolve_index(
    tree: &GoalTree,
    parent: Option<GoalId>,
    index: i64,
) -> Result<GoalId, SpecifierError> {
    let siblings = tree.siblings(parent);
    usize::try_from(index)
        .ok()
        .and_then(|idx| siblings.get(idx).copied())
        .ok_or(SpecifierError::IndexOutOfRange {
            index,
            len: siblings.len(),
        })
}

fn child_by_title(tree: &GoalTree, parent: Option<GoalId>, title: &str) -> Option<GoalId> {
    tree.siblings(parent)
        .iter()
        .copied()
        .find(|id| tree.title(*id) == title)
}
