//! Inputs accepted by the legacy tag renderer.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ParseError;

/// Kind of asset requested from the manifest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
  /// JavaScript entrypoint (`.js`).
  #[default]
  Javascript,
  /// TypeScript entrypoint (`.ts`).
  Typescript,
  /// Manifest entry with no source file behind it, such as the legacy polyfill chunk.
  Virtual,
}

impl AssetKind {
  /// File extension appended to extensionless names of this kind.
  pub fn extension(self) -> Option<&'static str> {
    match self {
      AssetKind::Javascript => Some("js"),
      AssetKind::Typescript => Some("ts"),
      AssetKind::Virtual => None,
    }
  }

  /// Lowercase identifier used in configuration and on the command line.
  pub fn as_str(self) -> &'static str {
    match self {
      AssetKind::Javascript => "javascript",
      AssetKind::Typescript => "typescript",
      AssetKind::Virtual => "virtual",
    }
  }
}

impl fmt::Display for AssetKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for AssetKind {
  type Err = ParseError;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value.trim().to_ascii_lowercase().as_str() {
      "javascript" | "js" => Ok(AssetKind::Javascript),
      "typescript" | "ts" => Ok(AssetKind::Typescript),
      "virtual" => Ok(AssetKind::Virtual),
      _ => Err(ParseError::UnknownAssetKind(value.to_string())),
    }
  }
}

/// A named entrypoint together with the kind used to resolve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entrypoint {
  /// Logical entrypoint name, e.g. `application` or `admin.ts`.
  pub name: String,
  /// Kind used when resolving the legacy asset.
  pub kind: AssetKind,
}

impl Entrypoint {
  /// Create an entrypoint.
  pub fn new(name: impl Into<String>, kind: AssetKind) -> Self {
    Self {
      name: name.into(),
      kind,
    }
  }
}

impl FromStr for Entrypoint {
  type Err = ParseError;

  /// Parse `name` or `name=kind`.
  fn from_str(value: &str) -> Result<Self, Self::Err> {
    let (name, kind) = match value.split_once('=') {
      Some((name, kind)) => (name.trim(), kind.parse()?),
      None => (value.trim(), AssetKind::default()),
    };
    if name.is_empty() {
      return Err(ParseError::EmptyEntrypoint(value.to_string()));
    }
    Ok(Entrypoint::new(name, kind))
  }
}

/// Entrypoints in caller-defined order.
///
/// The order is preserved verbatim: the renderer emits the nomodule loaders and the dynamic
/// import fallback in exactly this sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entrypoints {
  entries: Vec<Entrypoint>,
}

impl Entrypoints {
  /// Create an empty set of entrypoints.
  pub fn new() -> Self {
    Self::default()
  }

  /// Append an entrypoint.
  pub fn push(&mut self, name: impl Into<String>, kind: AssetKind) -> &mut Self {
    self.entries.push(Entrypoint::new(name, kind));
    self
  }

  /// Iterate over the entrypoints in insertion order.
  pub fn iter(&self) -> std::slice::Iter<'_, Entrypoint> {
    self.entries.iter()
  }

  /// Number of entrypoints.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Whether no entrypoints were supplied.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl FromIterator<Entrypoint> for Entrypoints {
  fn from_iter<I: IntoIterator<Item = Entrypoint>>(iter: I) -> Self {
    Self {
      entries: iter.into_iter().collect(),
    }
  }
}

impl<N: Into<String>> FromIterator<(N, AssetKind)> for Entrypoints {
  fn from_iter<I: IntoIterator<Item = (N, AssetKind)>>(iter: I) -> Self {
    iter
      .into_iter()
      .map(|(name, kind)| Entrypoint::new(name, kind))
      .collect()
  }
}

impl<'a> IntoIterator for &'a Entrypoints {
  type Item = &'a Entrypoint;
  type IntoIter = std::slice::Iter<'a, Entrypoint>;

  fn into_iter(self) -> Self::IntoIter {
    self.entries.iter()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_asset_kinds_case_insensitively() {
    assert_eq!("JavaScript".parse::<AssetKind>().unwrap(), AssetKind::Javascript);
    assert_eq!("ts".parse::<AssetKind>().unwrap(), AssetKind::Typescript);
    assert_eq!("virtual".parse::<AssetKind>().unwrap(), AssetKind::Virtual);
    assert_eq!(
      "css".parse::<AssetKind>(),
      Err(ParseError::UnknownAssetKind("css".into()))
    );
  }

  #[test]
  fn deserializes_lowercase_kinds() {
    let kind: AssetKind = serde_json::from_str("\"typescript\"").unwrap();
    assert_eq!(kind, AssetKind::Typescript);
  }

  #[test]
  fn parses_entrypoint_arguments() {
    assert_eq!(
      "application".parse::<Entrypoint>().unwrap(),
      Entrypoint::new("application", AssetKind::Javascript)
    );
    assert_eq!(
      "admin=typescript".parse::<Entrypoint>().unwrap(),
      Entrypoint::new("admin", AssetKind::Typescript)
    );
    assert_eq!(
      "=ts".parse::<Entrypoint>(),
      Err(ParseError::EmptyEntrypoint("=ts".into()))
    );
  }

  #[test]
  fn preserves_insertion_order() {
    let entrypoints: Entrypoints = [
      ("zeta", AssetKind::Javascript),
      ("alpha", AssetKind::Typescript),
      ("zeta", AssetKind::Typescript),
    ]
    .into_iter()
    .collect();

    let names: Vec<&str> = entrypoints.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, vec!["zeta", "alpha", "zeta"]);
    assert_eq!(entrypoints.len(), 3);
  }
}
