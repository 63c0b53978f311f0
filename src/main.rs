//! Print the `@vitejs/plugin-legacy` script tags for a project's build manifest.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vite_legacy_tags::{
  DevServerProbe, Entrypoint, Entrypoints, LegacyTagRenderer, ManifestResolver, TcpDevServerProbe,
  ViteConfig, load_manifest,
};

#[derive(Debug, Parser)]
#[command(name = "vite-legacy-tags", version, about)]
struct Cli {
  /// Project root used to discover `config/vite.json` and the build manifest.
  #[arg(long, default_value = ".")]
  root: PathBuf,

  /// Explicit configuration file instead of `<root>/config/vite.json`.
  #[arg(long)]
  config: Option<PathBuf>,

  /// Explicit manifest file instead of the one under the configured output directory.
  #[arg(long)]
  manifest: Option<PathBuf>,

  /// Treat the dev server as running, which renders nothing.
  #[arg(long, conflicts_with = "probe")]
  dev_server: bool,

  /// Probe the configured dev server over TCP before rendering.
  #[arg(long)]
  probe: bool,

  /// Entrypoints as `name` or `name=kind`, rendered in the given order.
  #[arg(required = true, value_name = "ENTRY")]
  entrypoints: Vec<Entrypoint>,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    )
    .with_writer(io::stderr)
    .init();

  let cli = Cli::parse();
  run(cli, &mut io::stdout().lock())
}

/// Render the tags requested by `cli` into `out`.
///
/// Nothing is written while the dev server is running. The manifest is not read in that case.
fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
  let config = match &cli.config {
    Some(path) => ViteConfig::load(path)
      .with_context(|| format!("failed to load configuration {}", path.display()))?,
    None => ViteConfig::discover(&cli.root),
  };

  let tcp_probe;
  let probe: &dyn DevServerProbe = if cli.probe {
    tcp_probe = TcpDevServerProbe::from_config(&config);
    &tcp_probe
  } else {
    &cli.dev_server
  };

  if probe.is_dev_server_running() {
    tracing::info!("dev server running, no legacy tags to render");
    return Ok(());
  }

  let manifest_path = cli
    .manifest
    .clone()
    .unwrap_or_else(|| config.manifest_path(&cli.root));
  let manifest = load_manifest(&manifest_path)
    .with_context(|| format!("failed to load manifest {}", manifest_path.display()))?;
  if manifest.find_legacy_polyfill().is_none() {
    tracing::warn!(
      path = %manifest_path.display(),
      "manifest has no legacy polyfill chunk, is @vitejs/plugin-legacy enabled?"
    );
  }

  let entrypoints: Entrypoints = cli.entrypoints.into_iter().collect();
  let resolver = ManifestResolver::new(manifest, config);
  let renderer = LegacyTagRenderer::new(&resolver, false);
  let html = renderer
    .render(&entrypoints)
    .context("failed to render legacy tags")?;

  writeln!(out, "{html}").context("failed to write tags")?;
  Ok(())
}
