//! Resolve logical asset names to public URLs through a [`ViteManifest`].

use std::path::Path;

use crate::config::ViteConfig;
use crate::error::ManifestError;
use crate::manifest::AssetPathResolver;
use crate::manifest::vite::ViteManifest;
use crate::models::AssetKind;

/// [`AssetPathResolver`] backed by a loaded Vite manifest.
#[derive(Debug, Clone)]
pub struct ManifestResolver {
  manifest: ViteManifest,
  config: ViteConfig,
}

impl ManifestResolver {
  /// Create a resolver for an already loaded manifest.
  pub fn new(manifest: ViteManifest, config: ViteConfig) -> Self {
    Self { manifest, config }
  }

  /// Underlying manifest.
  pub fn manifest(&self) -> &ViteManifest {
    &self.manifest
  }

  /// Manifest keys looked up for `name`, in priority order.
  pub fn candidate_keys(&self, name: &str, kind: AssetKind) -> Vec<String> {
    let name = with_extension(name.trim_start_matches('/'), kind);
    let mut keys = Vec::new();

    let entrypoints_dir = self.config.entrypoints_dir.trim_matches('/');
    if !entrypoints_dir.is_empty() {
      keys.push(format!("{entrypoints_dir}/{name}"));
    }
    push_unique(&mut keys, name.clone());

    if kind == AssetKind::Virtual {
      let suffix = format!("/{name}");
      let virtual_keys: Vec<String> = self
        .manifest
        .keys()
        .filter(|key| key.ends_with(&suffix))
        .map(str::to_string)
        .collect();
      for key in virtual_keys {
        push_unique(&mut keys, key);
      }
    }

    keys
  }

  fn public_url(&self, file: &str) -> String {
    let host = self
      .config
      .asset_host
      .as_deref()
      .unwrap_or_default()
      .trim_end_matches('/');
    let segments: Vec<&str> = [self.config.public_output_dir.as_str(), file]
      .into_iter()
      .map(|segment| segment.trim_matches('/'))
      .filter(|segment| !segment.is_empty())
      .collect();
    format!("{host}/{}", segments.join("/")).replace('\\', "/")
  }
}

impl AssetPathResolver for ManifestResolver {
  type Error = ManifestError;

  fn resolve(&self, name: &str, kind: AssetKind) -> Result<String, Self::Error> {
    let tried = self.candidate_keys(name, kind);
    let chunk = tried.iter().find_map(|key| self.manifest.get(key));

    match chunk {
      Some(chunk) => {
        let url = self.public_url(&chunk.file);
        tracing::debug!(name, %kind, %url, "resolved asset from Vite manifest");
        Ok(url)
      }
      None => Err(ManifestError::MissingEntry {
        name: name.to_string(),
        kind,
        tried,
      }),
    }
  }
}

fn with_extension(name: &str, kind: AssetKind) -> String {
  match kind.extension() {
    Some(extension) if Path::new(name).extension().is_none() => format!("{name}.{extension}"),
    _ => name.to_string(),
  }
}

fn push_unique(keys: &mut Vec<String>, key: String) {
  if !keys.contains(&key) {
    keys.push(key);
  }
}
