//! Optional TOML configuration.
//!
//! A project `.goaltree.toml` is found by walking ancestors of the working
//! directory; a global `config.toml` lives under `$GOALTREE_HOME` (default
//! `~/.goaltree`). Project values win field by field. Config files that are
//! missing or malformed are treated as absent.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const PROJECT_CONFIG_NAME: &str = ".goaltree.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoaltreeConfig {
    /// Goal document used when no filename is given on the command line.
    pub default_file: Option<String>,
    /// Spaces per nesting level in pretty output.
    pub indent: Option<usize>,
}

pub fn config_path(dir: &Path) -> PathBuf {
    dir.join(PROJECT_CONFIG_NAME)
}

pub fn resolve_user_home_dir() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        let trimmed = home.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    if let Ok(profile) = std::env::var("USERPROFILE") {
        let trimmed = profile.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    None
}

pub fn resolve_goaltree_home_dir() -> Option<PathBuf> {
    if let Ok(value) = std::env::var("GOALTREE_HOME") {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    resolve_user_home_dir().map(|home| home.join(".goaltree"))
}

pub fn global_config_path() -> Option<PathBuf> {
    resolve_goaltree_home_dir().map(|home| home.join("config.toml"))
}

pub fn find_project_config(start: &Path) -> Option<PathBuf> {
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
    start
        .ancestors()
        .map(config_path)
        .find(|path| path.is_file())
}

pub fn load_config(path: &Path) -> Option<GoaltreeConfig> {
    let text = fs::read_to_string(path).ok()?;
    toml::from_str(&text).ok()
}

pub fn load_global_config() -> Option<GoaltreeConfig> {
    let path = global_config_path()?;
    if !path.is_file() {
        return None;
    }
    load_config(&path)
}

/// Effective config for a working directory: project over global, field by
/// field, with unset fields left to the caller's defaults.
pub fn resolve_config(cwd: &Path) -> GoaltreeConfig {
    let project = find_project_config(cwd)
        .and_then(|path| load_config(&path))
        .unwrap_or_default();
    let global = load_global_config().unwrap_or_default();
    GoaltreeConfig {
        default_file: project.default_file.or(global.default_file),
        indent: project.indent.or(global.indent),
    }
}

pub fn write_config(dir: &Path, config: &GoaltreeConfig) -> Result<PathBuf, ConfigError> {
    let path = config_path(dir);
    let body = toml::to_string_pretty(config)?;
    fs::write(&path, body)?;
    Ok(path)
}
