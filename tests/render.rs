use std::fs;
use std::path::Path;

use tempfile::tempdir;
use vite_legacy_tags::{
  AssetKind, Entrypoints, LegacyTagRenderer, ManifestError, ManifestResolver, ViteConfig,
  load_manifest,
};

const MANIFEST: &str = r#"{
  "entrypoints/application-legacy.ts": {
    "file": "assets/application-legacy-3f2a.js",
    "src": "entrypoints/application-legacy.ts",
    "isEntry": true
  },
  "entrypoints/admin-legacy.js": {
    "file": "assets/admin-legacy-51d0.js",
    "src": "entrypoints/admin-legacy.js",
    "isEntry": true
  },
  "vite/legacy-polyfills-legacy": {
    "file": "assets/polyfills-legacy-9b1c.js",
    "src": "vite/legacy-polyfills-legacy",
    "isEntry": true
  }
}"#;

fn write_project(root: &Path, config: &str) {
  fs::create_dir_all(root.join("config")).unwrap();
  fs::write(root.join("config/vite.json"), config).unwrap();
  let manifest_dir = root.join("public/packs/.vite");
  fs::create_dir_all(&manifest_dir).unwrap();
  fs::write(manifest_dir.join("manifest.json"), MANIFEST).unwrap();
}

fn resolver_for(root: &Path) -> ManifestResolver {
  let config = ViteConfig::discover(root);
  let manifest = load_manifest(&config.manifest_path(root)).unwrap();
  ManifestResolver::new(manifest, config)
}

#[test]
fn renders_legacy_tags_from_project_manifest() {
  let dir = tempdir().unwrap();
  write_project(dir.path(), r#"{ "publicOutputDir": "packs" }"#);
  let resolver = resolver_for(dir.path());

  let mut entrypoints = Entrypoints::new();
  entrypoints
    .push("application", AssetKind::Typescript)
    .push("admin.js", AssetKind::Javascript);

  let html = LegacyTagRenderer::new(&resolver, false)
    .render(&entrypoints)
    .unwrap();
  let lines: Vec<&str> = html.lines().collect();

  assert!(lines[0].starts_with("<script nomodule>!function(){var e=document"));
  assert_eq!(
    lines[1],
    r#"<script nomodule id="vite-legacy-polyfill" src="/packs/assets/polyfills-legacy-9b1c.js"></script>"#
  );
  assert_eq!(
    lines[2],
    "<script nomodule>System.import('/packs/assets/application-legacy-3f2a.js')</script>"
  );
  assert_eq!(
    lines[3],
    "<script nomodule>System.import('/packs/assets/admin-legacy-51d0.js')</script>"
  );
  assert!(lines[4].starts_with(r#"<script type="module">import.meta.url;"#));
  assert!(lines[5].starts_with(r#"<script type="module">!function(){if(window.__vite_is_modern_browser)return;"#));
  assert!(lines[5].ends_with("n.onload=function(){System.import('/packs/assets/application-legacy-3f2a.js')"));
  assert_eq!(
    lines[6],
    "System.import('/packs/assets/admin-legacy-51d0.js')},document.body.appendChild(n)}();</script>"
  );
}

#[test]
fn dev_server_suppresses_output() {
  let dir = tempdir().unwrap();
  write_project(dir.path(), r#"{ "publicOutputDir": "packs" }"#);
  let resolver = resolver_for(dir.path());

  let entrypoints: Entrypoints = [("application", AssetKind::Typescript)].into_iter().collect();
  let html = LegacyTagRenderer::new(&resolver, true)
    .render(&entrypoints)
    .unwrap();
  assert!(html.is_empty());
}

#[test]
fn missing_entrypoint_surfaces_manifest_error() {
  let dir = tempdir().unwrap();
  write_project(dir.path(), r#"{ "publicOutputDir": "packs" }"#);
  let resolver = resolver_for(dir.path());

  let entrypoints: Entrypoints = [("checkout", AssetKind::Javascript)].into_iter().collect();
  let err = LegacyTagRenderer::new(&resolver, false)
    .render(&entrypoints)
    .unwrap_err();

  match err {
    ManifestError::MissingEntry { name, kind, .. } => {
      assert_eq!(name, "checkout-legacy");
      assert_eq!(kind, AssetKind::Javascript);
    }
    other => panic!("unexpected error: {other}"),
  }
}
