//! Script tags that boot `@vitejs/plugin-legacy` bundles in browsers without module support.
//!
//! The rendered cascade is, in order:
//!
//! 1. the Safari 10 `nomodule` fix,
//! 2. the legacy polyfill chunk (`nomodule`, fixed id),
//! 3. one `nomodule` `System.import` loader per entrypoint,
//! 4. a module script flagging browsers that support the full modern syntax,
//! 5. a module script that loads the legacy build when that flag was never set.

use crate::dev_server::DevServerProbe;
use crate::html::{Tag, join_tags};
use crate::legacy_name::legacy_name;
use crate::manifest::AssetPathResolver;
use crate::models::{AssetKind, Entrypoints};

/// Element id of the legacy polyfill `<script>`.
pub const LEGACY_POLYFILL_ID: &str = "vite-legacy-polyfill";

/// Manifest name of the polyfill chunk emitted by the legacy plugin.
pub const LEGACY_POLYFILL_ASSET: &str = "legacy-polyfills-legacy";

/// Global set by browsers that parse the modern-browser detector.
pub const MODERN_BROWSER_FLAG: &str = "__vite_is_modern_browser";

/// Stops Safari 10.1, which supports modules but ignores `nomodule`, from running both builds.
pub const SAFARI_NOMODULE_FIX: &str = r#"!function(){var e=document,t=e.createElement("script");if(!("noModule"in t)&&"onbeforeload"in t){var n=!1;e.addEventListener("beforeload",(function(e){if(e.target===t)n=!0;else if(!e.target.hasAttribute("nomodule")||!n)return;console.log('preventing load',e.target);e.preventDefault()}),!0),t.type="module",t.src=".",e.head.appendChild(t),t.remove()}}();"#;

/// Uses `import.meta`, dynamic import and async generators so that only fully modern browsers
/// reach the assignment. Skipped under `file:` where dynamic import can fail for other reasons.
pub const MODERN_BROWSER_DETECTOR: &str = r#"import.meta.url;import("_").catch(()=>1);async function* g(){};if(location.protocol!="file:"){window.__vite_is_modern_browser=true}"#;

/// Renders the legacy bundle cascade for a set of entrypoints.
#[derive(Debug, Clone)]
pub struct LegacyTagRenderer<R, P> {
  resolver: R,
  probe: P,
}

impl<R, P> LegacyTagRenderer<R, P>
where
  R: AssetPathResolver,
  P: DevServerProbe,
{
  /// Create a renderer resolving assets with `resolver` and checking the dev server with `probe`.
  pub fn new(resolver: R, probe: P) -> Self {
    Self { resolver, probe }
  }

  /// Render the full cascade as newline separated HTML.
  ///
  /// Returns an empty string while the dev server is running.
  pub fn render(&self, entrypoints: &Entrypoints) -> Result<String, R::Error> {
    Ok(join_tags(&self.tags(entrypoints)?))
  }

  /// Build the cascade as tags, empty while the dev server is running.
  ///
  /// Any resolver failure aborts the whole cascade and is returned unchanged.
  pub fn tags(&self, entrypoints: &Entrypoints) -> Result<Vec<Tag>, R::Error> {
    if self.probe.is_dev_server_running() {
      tracing::debug!("dev server running, skipping legacy tags");
      return Ok(Vec::new());
    }

    let polyfill_src = self
      .resolver
      .resolve(LEGACY_POLYFILL_ASSET, AssetKind::Virtual)?;
    let imports = self.import_snippets(entrypoints)?;

    let mut tags = Vec::with_capacity(imports.len() + 4);
    tags.push(Tag::script().flag("nomodule").body(SAFARI_NOMODULE_FIX));
    tags.push(
      Tag::script()
        .flag("nomodule")
        .attr("id", LEGACY_POLYFILL_ID)
        .attr("src", polyfill_src),
    );
    tags.extend(
      imports
        .iter()
        .map(|snippet| Tag::script().flag("nomodule").body(snippet.as_str())),
    );
    tags.push(
      Tag::script()
        .attr("type", "module")
        .body(MODERN_BROWSER_DETECTOR),
    );
    tags.push(
      Tag::script()
        .attr("type", "module")
        .body(dynamic_fallback(&imports)),
    );

    tracing::debug!(
      entrypoints = entrypoints.len(),
      tags = tags.len(),
      "rendered legacy tags"
    );
    Ok(tags)
  }

  /// Single `nomodule` loader for one entrypoint, `None` while the dev server is running.
  pub fn entry_tag(&self, name: &str, kind: AssetKind) -> Result<Option<Tag>, R::Error> {
    if self.probe.is_dev_server_running() {
      return Ok(None);
    }
    let snippet = self.import_snippet(name, kind)?;
    Ok(Some(Tag::script().flag("nomodule").body(snippet)))
  }

  /// [`Self::entry_tag`] for a TypeScript entrypoint.
  pub fn typescript_entry_tag(&self, name: &str) -> Result<Option<Tag>, R::Error> {
    self.entry_tag(name, AssetKind::Typescript)
  }

  /// Body of the dynamic import fallback script for `entrypoints`.
  pub fn fallback_inline_code(&self, entrypoints: &Entrypoints) -> Result<String, R::Error> {
    Ok(dynamic_fallback(&self.import_snippets(entrypoints)?))
  }

  /// `System.import('<url>')` for the legacy build of `name`.
  pub fn import_snippet(&self, name: &str, kind: AssetKind) -> Result<String, R::Error> {
    let url = self.resolver.resolve(&legacy_name(name), kind)?;
    Ok(format!("System.import('{url}')"))
  }

  fn import_snippets(&self, entrypoints: &Entrypoints) -> Result<Vec<String>, R::Error> {
    entrypoints
      .iter()
      .map(|entry| self.import_snippet(&entry.name, entry.kind))
      .collect()
  }
}

fn dynamic_fallback(imports: &[String]) -> String {
  format!(
    concat!(
      "!function(){{if(window.{flag})return;",
      "console.warn(\"vite: loading legacy chunks, syntax error above and the same error below should be ignored\");",
      "var e=document.getElementById(\"{id}\"),n=document.createElement(\"script\");",
      "n.src=e.src,n.onload=function(){{{body}}},document.body.appendChild(n)}}();"
    ),
    flag = MODERN_BROWSER_FLAG,
    id = LEGACY_POLYFILL_ID,
    body = imports.join("\n"),
  )
}
