//! Asset path resolution against the bundler's build manifest.

mod resolver;
mod vite;

use crate::models::AssetKind;

pub use resolver::ManifestResolver;
pub use vite::{ManifestChunk, ViteManifest, load_manifest};

/// Maps a logical asset name and kind to the URL the browser should load.
///
/// Implementations fail when the manifest has no entry for the name. Renderers return that
/// error untouched.
pub trait AssetPathResolver {
  /// Error raised when an asset cannot be resolved.
  type Error;

  /// Resolve `name` of the given `kind` to a public URL.
  fn resolve(&self, name: &str, kind: AssetKind) -> Result<String, Self::Error>;
}

impl<R: AssetPathResolver + ?Sized> AssetPathResolver for &R {
  type Error = R::Error;

  fn resolve(&self, name: &str, kind: AssetKind) -> Result<String, Self::Error> {
    (**self).resolve(name, kind)
  }
}
