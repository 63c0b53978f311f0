//! Error types shared by the manifest resolver, the configuration loader and the CLI.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::AssetKind;

/// Failures raised while loading or querying a Vite manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
  /// The manifest file could not be read from disk.
  #[error("failed to read Vite manifest at {path}")]
  Read {
    /// Location that was read.
    path: PathBuf,
    /// Underlying I/O failure.
    #[source]
    source: std::io::Error,
  },

  /// The manifest file is not valid manifest JSON.
  #[error("failed to parse Vite manifest JSON")]
  Parse(#[from] serde_json::Error),

  /// No manifest entry exists for the requested asset.
  #[error("Vite manifest has no {kind} entry for '{name}' (tried: {})", .tried.join(", "))]
  MissingEntry {
    /// Requested logical asset name.
    name: String,
    /// Requested asset kind.
    kind: AssetKind,
    /// Manifest keys that were looked up, in lookup order.
    tried: Vec<String>,
  },
}

/// Failures raised while parsing user supplied values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
  /// The asset kind is not one of `javascript`, `typescript` or `virtual`.
  #[error("unknown asset kind '{0}' (expected javascript, typescript or virtual)")]
  UnknownAssetKind(String),

  /// An entrypoint argument had an empty name.
  #[error("entrypoint '{0}' has an empty name")]
  EmptyEntrypoint(String),
}

/// Failures raised while loading a configuration file explicitly.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// The configuration file could not be read.
  #[error("failed to read configuration at {path}")]
  Read {
    /// Location that was read.
    path: PathBuf,
    /// Underlying I/O failure.
    #[source]
    source: std::io::Error,
  },

  /// The configuration file is not valid JSON for [`crate::config::ViteConfig`].
  #[error("failed to parse configuration at {path}")]
  Parse {
    /// Location that was parsed.
    path: PathBuf,
    /// Underlying JSON failure.
    #[source]
    source: serde_json::Error,
  },
}
