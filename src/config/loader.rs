//! Configuration loading from disk.
//!
//! Two documents are read at startup: the optional TOML server settings and
//! the JSON route tree.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::routing::tree::RouteTree;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("file does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error reading {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("error decoding the route tree: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn read(path: &Path) -> Result<Vec<u8>, ConfigError> {
    fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
        _ => ConfigError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Load and validate server settings from a TOML file.
pub fn load_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    let bytes = read(path)?;
    let content = String::from_utf8_lossy(&bytes);
    let config: ServerConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load the route tree document at `path`.
pub fn load_route_tree(path: &Path) -> Result<RouteTree, ConfigError> {
    let bytes = read(path)?;
    let tree = parse_route_tree(&bytes)?;
    tracing::debug!(path = %path.display(), segments = tree.len(), "Route tree decoded");
    Ok(tree)
}

/// Decode a route tree from JSON bytes. A `null` document is an empty tree.
pub fn parse_route_tree(bytes: &[u8]) -> Result<RouteTree, ConfigError> {
    let tree: Option<RouteTree> = serde_json::from_slice(bytes)?;
    Ok(tree.unwrap_or_default())
}
