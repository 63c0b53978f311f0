//! Loading the `manifest.json` written by `vite build`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ManifestError;

/// Deserialised representation of a Vite build manifest.
///
/// Keys are source paths relative to the Vite root, or virtual module ids such as
/// `vite/legacy-polyfills-legacy`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ViteManifest {
  entries: BTreeMap<String, ManifestChunk>,
}

/// A single chunk recorded in the manifest.
///
/// Only the output file is needed to build URLs; the remaining chunk fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestChunk {
  /// Output file, relative to the build output directory.
  pub file: String,
}

impl ViteManifest {
  /// Parse a manifest from its JSON text.
  pub fn from_json(json: &str) -> Result<Self, ManifestError> {
    Ok(serde_json::from_str(json)?)
  }

  /// Look up a chunk by its exact manifest key.
  pub fn get(&self, key: &str) -> Option<&ManifestChunk> {
    self.entries.get(key)
  }

  /// Manifest keys in lexicographic order.
  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.entries.keys().map(String::as_str)
  }

  /// Number of chunks in the manifest.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Whether the manifest holds no chunks.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// First manifest key naming the legacy polyfill chunk, if the legacy plugin ran.
  pub fn find_legacy_polyfill(&self) -> Option<&str> {
    self.keys().find(|key| key.contains("legacy-polyfills"))
  }
}

/// Load a Vite manifest from disk.
pub fn load_manifest(path: &Path) -> Result<ViteManifest, ManifestError> {
  let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
    path: path.to_path_buf(),
    source,
  })?;
  ViteManifest::from_json(&content)
}
