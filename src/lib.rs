#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod config;
pub mod dev_server;
pub mod error;
pub mod html;
pub mod legacy_name;
pub mod manifest;
pub mod models;
pub mod renderer;

pub use config::ViteConfig;
pub use dev_server::{DevServerProbe, TcpDevServerProbe};
pub use error::{ConfigError, ManifestError, ParseError};
pub use html::Tag;
pub use legacy_name::legacy_name;
pub use manifest::{AssetPathResolver, ManifestResolver, ViteManifest, load_manifest};
pub use models::{AssetKind, Entrypoint, Entrypoints};
pub use renderer::LegacyTagRenderer;
