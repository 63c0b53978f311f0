//! Naming convention used by `@vitejs/plugin-legacy` for its legacy chunks.

use std::sync::OnceLock;

use regex::Regex;

fn first_extension_pattern() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| Regex::new(r"(?s)(\..*)?$").expect("invalid extension regex"))
}

/// Derive the legacy variant of an entrypoint name.
///
/// `-legacy` is inserted right before the first `.` of the name, or appended when the name
/// has no `.` at all, so `application.js` becomes `application-legacy.js`.
pub fn legacy_name(name: &str) -> String {
  first_extension_pattern()
    .replacen(name, 1, "-legacy$1")
    .into_owned()
}
