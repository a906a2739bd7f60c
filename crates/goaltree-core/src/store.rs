//! Loads and saves the persisted goal document.
//!
//! The on-disk form is a JSON array of nested goal records. The `done`
//! field stores the goal's own mode (`true`, `false`, or `"auto"`), never
//! the derived value; auto values are recomputed while the tree is rebuilt.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::goal::{Completion, GoalId, GoalTree};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not access goal file: {0}")]
    Io(#[from] std::io::Error),
    #[error("goal file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalRecord {
    pub title: String,
    pub done: Completion,
    #[serde(default)]
    pub children: Vec<GoalRecord>,
}

pub fn to_records(tree: &GoalTree) -> Vec<GoalRecord> {
    tree.roots()
        .iter()
        .map(|root| record_from(tree, *root))
        .collect()
}

pub fn from_records(records: &[GoalRecord]) -> GoalTree {
    let mut tree = GoalTree::new();
    for record in records {
        insert_record(&mut tree, None, record);
    }
    tree
}

pub fn load(path: &Path) -> Result<GoalTree, StoreError> {
    let text = fs::read_to_string(path)?;
    let records: Vec<GoalRecord> = serde_json::from_str(&text)?;
    debug!("loaded {} root goals from {}", records.len(), path.display());
    Ok(from_records(&records))
}

/// Load for the create path: a missing or unreadable document is an empty
/// one. A document that exists but does not parse is still an error, so a
/// caller never overwrites data it could not read.
pub fn load_or_empty(path: &Path) -> Result<GoalTree, StoreError> {
    match load(path) {
        Ok(tree) => Ok(tree),
        Err(StoreError::Io(err)) => {
            debug!("treating {} as empty: {err}", path.display());
            Ok(GoalTree::new())
        }
        Err(err) => Err(err),
    }
}

/// Writes the document via a sibling temp file and a rename, so a failed
/// write leaves the previous file intact.
pub fn save(path: &Path, tree: &GoalTree) -> Result<(), StoreError> {
    let records = to_records(tree);
    let text = serde_json::to_string_pretty(&records)?;
    let tmp = temp_path(path);
    fs::write(&tmp, &text)?;
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(StoreError::Io(err));
    }
    debug!("wrote {} root goals to {}", records.len(), path.display());
    Ok(())
}

fn record_from(tree: &GoalTree, id: GoalId) -> GoalRecord {
    GoalRecord {
        title: tree.title(id).to_string(),
        done: tree.completion(id),
        children: tree
            .children(id)
            .iter()
            .map(|child| record_from(tree, *child))
            .collect(),
    }
}

fn insert_record(tree: &mut GoalTree, parent: Option<GoalId>, record: &GoalRecord) {
    let id = tree.add_goal(parent, record.title.clone(), record.done);
    for child in &record.children {
        insert_record(tree, Some(id), child);
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| OsString::from("goals"));
    name.push(".tmp");
    path.with_file_name(name)
}
