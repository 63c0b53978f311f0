//! Project configuration loader describing where Vite writes its build output.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

const DEFAULT_CONFIG_FILE: &str = "config/vite.json";
const MANIFEST_FILE: &str = "manifest.json";
const VITE_METADATA_DIR: &str = ".vite";

/// Discoverable configuration mirroring the keys of a `config/vite.json` file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViteConfig {
  /// Directory served as the web root.
  pub public_dir: String,
  /// Directory inside `public_dir` that Vite builds into.
  pub public_output_dir: String,
  /// Directory holding entrypoints, relative to the Vite root; prefixes manifest keys.
  pub entrypoints_dir: String,
  /// Optional host prepended to every resolved asset URL.
  pub asset_host: Option<String>,
  /// Host of the Vite dev server.
  pub host: String,
  /// Port of the Vite dev server.
  pub port: u16,
  /// How long to wait when probing the dev server.
  pub dev_server_connect_timeout_ms: u64,
}

impl Default for ViteConfig {
  fn default() -> Self {
    Self {
      public_dir: "public".into(),
      public_output_dir: "vite".into(),
      entrypoints_dir: "entrypoints".into(),
      asset_host: None,
      host: "localhost".into(),
      port: 3036,
      dev_server_connect_timeout_ms: 10,
    }
  }
}

impl ViteConfig {
  /// Attempt to load configuration from `config/vite.json` under the project root.
  ///
  /// A missing or malformed file yields the defaults so callers can keep rendering with the
  /// conventional layout.
  pub fn discover(root: &Path) -> Self {
    let candidate = root.join(DEFAULT_CONFIG_FILE);
    match Self::from_path(&candidate) {
      Some(config) => config,
      None => {
        tracing::debug!(path = %candidate.display(), "using default Vite configuration");
        Self::default()
      }
    }
  }

  /// Read configuration from a specific JSON file.
  pub fn from_path(path: &Path) -> Option<Self> {
    match Self::load(path) {
      Ok(config) => Some(config),
      Err(ConfigError::Parse { path, source }) => {
        tracing::warn!(path = %path.display(), error = %source, "ignoring malformed Vite configuration");
        None
      }
      Err(ConfigError::Read { .. }) => None,
    }
  }

  /// Read configuration from a specific JSON file, reporting why it could not be used.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Directory Vite builds into, relative to the project root.
  pub fn output_dir(&self, root: &Path) -> PathBuf {
    root.join(&self.public_dir).join(&self.public_output_dir)
  }

  /// Location of the build manifest.
  ///
  /// Vite 5 and later write `.vite/manifest.json` inside the output directory; older releases
  /// write `manifest.json` directly. The newer location wins when both exist.
  pub fn manifest_path(&self, root: &Path) -> PathBuf {
    let output_dir = self.output_dir(root);
    let modern = output_dir.join(VITE_METADATA_DIR).join(MANIFEST_FILE);
    if modern.exists() {
      modern
    } else {
      output_dir.join(MANIFEST_FILE)
    }
  }

  /// Timeout used when probing the dev server, never shorter than one millisecond.
  pub fn dev_server_connect_timeout(&self) -> Duration {
    Duration::from_millis(self.dev_server_connect_timeout_ms.max(1))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn discover_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    assert_eq!(ViteConfig::discover(dir.path()), ViteConfig::default());
  }

  #[test]
  fn discover_reads_camel_case_keys() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("config")).unwrap();
    fs::write(
      dir.path().join(DEFAULT_CONFIG_FILE),
      r#"{ "publicOutputDir": "assets-vite", "assetHost": "https://cdn.example.com", "port": 5173 }"#,
    )
    .unwrap();

    let config = ViteConfig::discover(dir.path());
    assert_eq!(config.public_output_dir, "assets-vite");
    assert_eq!(config.asset_host.as_deref(), Some("https://cdn.example.com"));
    assert_eq!(config.port, 5173);
    assert_eq!(config.public_dir, "public");
  }

  #[test]
  fn malformed_file_is_ignored_by_discover_but_reported_by_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vite.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(ViteConfig::from_path(&path).is_none());
    assert!(matches!(
      ViteConfig::load(&path),
      Err(ConfigError::Parse { .. })
    ));
  }

  #[test]
  fn zero_connect_timeout_is_clamped() {
    let config = ViteConfig {
      dev_server_connect_timeout_ms: 0,
      ..ViteConfig::default()
    };
    assert_eq!(config.dev_server_connect_timeout(), Duration::from_millis(1));
  }

  #[test]
  fn prefers_vite_metadata_manifest() {
    let dir = tempdir().unwrap();
    let config = ViteConfig::default();
    let output_dir = config.output_dir(dir.path());

    assert_eq!(
      config.manifest_path(dir.path()),
      output_dir.join("manifest.json")
    );

    fs::create_dir_all(output_dir.join(".vite")).unwrap();
    fs::write(output_dir.join(".vite/manifest.json"), "{}").unwrap();
    assert_eq!(
      config.manifest_path(dir.path()),
      output_dir.join(".vite").join("manifest.json")
    );
  }
}
