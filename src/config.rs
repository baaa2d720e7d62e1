use crate::{Position, Size};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Editor settings. Every field has a default, so a config file only needs
/// the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of retained history snapshots
    pub history_depth: usize,

    /// Distance under which drag-time helper lines appear and snap
    pub snap_threshold: f64,

    /// Quiet period after a drag ends before it is committed to history
    pub drag_commit_delay_ms: u64,

    pub allow_self_loops: bool,

    /// Refuse a second edge with the same endpoints and handles
    pub reject_duplicate_edges: bool,

    /// Delete a group's children along with it
    pub cascade_group_delete: bool,

    /// Where palette nodes land when no position is given
    pub default_node_position: Position,

    pub group_default_size: Size,

    pub export_file_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_depth: 50,
            snap_threshold: 15.0,
            drag_commit_delay_ms: 300,
            allow_self_loops: true,
            reject_duplicate_edges: false,
            cascade_group_delete: false,
            default_node_position: Position::new(300.0, 200.0),
            group_default_size: Size::new(400.0, 300.0),
            export_file_name: "next-server-diagram.json".to_string(),
        }
    }
}

/// Errors in configuration content
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("history_depth must be at least 1")]
    ZeroHistoryDepth,

    #[error("snap_threshold must be a non-negative number, got {0}")]
    InvalidThreshold(f64),

    #[error("export_file_name must not be empty")]
    EmptyFileName,
}

impl EditorConfig {
    /// Parse a configuration from JSON text
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_depth == 0 {
            return Err(ConfigError::ZeroHistoryDepth);
        }
        if !(self.snap_threshold >= 0.0) {
            return Err(ConfigError::InvalidThreshold(self.snap_threshold));
        }
        if self.export_file_name.trim().is_empty() {
            return Err(ConfigError::EmptyFileName);
        }
        Ok(())
    }

    pub fn drag_commit_delay(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.drag_commit_delay_ms as i64)
    }
}
