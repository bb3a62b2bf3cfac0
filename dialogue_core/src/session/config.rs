//! Session configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::resolver::DEFAULT_APPEND_SEPARATOR;

/// Errors raised while reading a session configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid session config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Configuration for a dialogue session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Node that `begin` starts at.
    pub start_node_id: String,

    /// Line shown when the current node is not in the graph.
    pub missing_node_line: String,

    /// Placed before each appended line.
    pub append_separator: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            start_node_id: "start".to_string(),
            missing_node_line: "Node not found!".to_string(),
            append_separator: DEFAULT_APPEND_SEPARATOR.to_string(),
        }
    }
}

impl SessionConfig {
    /// Parse a configuration from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read a configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Set the start node.
    pub fn with_start_node(mut self, node_id: impl Into<String>) -> Self {
        self.start_node_id = node_id.into();
        self
    }
}
