use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Handle to a goal slot inside a [`GoalTree`].
///
/// A handle stays valid until the goal it names is removed; removal frees the
/// slot for reuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GoalId(usize);

/// A goal's own completion mode as stored. The user-facing value is
/// [`GoalTree::effective_done`], which resolves `Auto` against the children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Explicit(bool),
    Auto,
}

impl Serialize for Completion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Completion::Explicit(done) => serializer.serialize_bool(*done),
            Completion::Auto => serializer.serialize_str("auto"),
        }
    }
}

impl<'de> Deserialize<'de> for Completion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CompletionVisitor;

        impl Visitor<'_> for CompletionVisitor {
            type Value = Completion;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a boolean or the string \"auto\"")
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<Completion, E> {
                Ok(Completion::Explicit(value))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Completion, E> {
                if value == "auto" {
                    Ok(Completion::Auto)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(value), &self))
                }
            }
        }

        deserializer.deserialize_any(CompletionVisitor)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GoalError {
    #[error("goal is in auto mode; its completion derives from its children")]
    AutoModeViolation,
}

#[derive(Debug)]
struct GoalNode {
    title: String,
    completion: Completion,
    auto_done: bool,
    parent: Option<GoalId>,
    children: Vec<GoalId>,
}

/// Arena of goal nodes plus the ordered list of top-level goals.
///
/// All mutation of a goal's child sequence goes through methods here, and
/// every mutating method re-resolves the derived auto-done values up to the
/// root before returning.
#[derive(Debug, Default)]
pub struct GoalTree {
    slots: Vec<Option<GoalNode>>,
    roots: Vec<GoalId>,
    free: Vec<usize>,
}

impl GoalTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ordered top-level goals.
    pub fn roots(&self) -> &[GoalId] {
        &self.roots
    }

    /// Ordered children of `parent`, or the root list when `parent` is none.
    pub fn siblings(&self, parent: Option<GoalId>) -> &[GoalId] {
        match parent {
            Some(id) => &self.node(id).children,
            None => &self.roots,
        }
    }

    pub fn title(&self, id: GoalId) -> &str {
        &self.node(id).title
    }

    pub fn completion(&self, id: GoalId) -> Completion {
        self.node(id).completion
    }

    pub fn is_auto(&self, id: GoalId) -> bool {
        matches!(self.node(id).completion, Completion::Auto)
    }

    pub fn parent(&self, id: GoalId) -> Option<GoalId> {
        self.node(id).parent
    }

    pub fn children(&self, id: GoalId) -> &[GoalId] {
        &self.node(id).children
    }

    /// Resolved completion value: the explicit flag, or for auto goals the
    /// AND over all children (vacuously true with no children).
    pub fn effective_done(&self, id: GoalId) -> bool {
        let node = self.node(id);
        match node.completion {
            Completion::Explicit(done) => done,
            Completion::Auto => node.auto_done,
        }
    }

    /// Appends a goal under `parent` (or to the root list) and re-resolves
    /// derived state from the new goal upward.
    pub fn add_goal(
        &mut self,
        parent: Option<GoalId>,
        title: impl Into<String>,
        completion: Completion,
    ) -> GoalId {
        let id = self.alloc(GoalNode {
            title: title.into(),
            completion,
            auto_done: true,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(parent_id) => self.node_mut(parent_id).children.push(id),
            None => self.roots.push(id),
        }
        self.resolve_from(id);
        id
    }

    /// Sets the goal's own completion mode and re-resolves upward.
    pub fn set_completion(&mut self, id: GoalId, completion: Completion) {
        self.node_mut(id).completion = completion;
        self.resolve_from(id);
    }

    /// Sets an explicit done flag; refused for goals in auto mode.
    pub fn set_explicit(&mut self, id: GoalId, done: bool) -> Result<(), GoalError> {
        if self.is_auto(id) {
            return Err(GoalError::AutoModeViolation);
        }
        self.set_completion(id, Completion::Explicit(done));
        Ok(())
    }

    /// Detaches `id` from its containing list and frees the whole subtree.
    /// Returns the former parent so callers can apply post-removal rules.
    pub fn remove(&mut self, id: GoalId) -> Option<GoalId> {
        let parent = self.node(id).parent;
        match parent {
            Some(parent_id) => self.node_mut(parent_id).children.retain(|child| *child != id),
            None => self.roots.retain(|root| *root != id),
        }
        self.release(id);
        if let Some(parent_id) = parent {
            self.resolve_from(parent_id);
        }
        parent
    }

    /// Walks from `start` to the root, recomputing the derived value of every
    /// auto goal along the way. The walk itself is unconditional; only the
    /// local recomputation depends on the mode.
    fn resolve_from(&mut self, start: GoalId) {
        let mut cursor = Some(start);
        while let Some(id) = cursor {
            if self.is_auto(id) {
                let done = self
                    .node(id)
                    .children
                    .iter()
                    .all(|child| self.effective_done(*child));
                self.node_mut(id).auto_done = done;
            }
            cursor = self.node(id).parent;
        }
    }

    fn alloc(&mut self, node: GoalNode) -> GoalId {
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                GoalId(slot)
            }
            None => {
                self.slots.push(Some(node));
                GoalId(self.slots.len() - 1)
            }
        }
    }

    fn release(&mut self, id: GoalId) {
        let node = self.slots[id.0].take().expect("live goal id");
        for child in node.children {
            self.release(child);
        }
        self.free.push(id.0);
    }

    fn node(&self, id: GoalId) -> &GoalNode {
        self.slots[id.0].as_ref().expect("live goal id")
    }

    fn node_mut(&mut self, id: GoalId) -> &mut GoalNode {
        self.slots[id.0].as_mut().expect("live goal id")
    }
}
