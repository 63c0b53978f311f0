//! Minimal HTML element model used to emit `<script>` tags.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Attribute {
  /// Boolean attribute rendered without a value, e.g. `nomodule`.
  Flag(&'static str),
  /// Attribute rendered as `name="value"` with the value escaped.
  Value(&'static str, String),
}

/// An HTML element with ordered attributes and an optional trusted body.
///
/// Attribute values are escaped on render. The body is emitted verbatim, so it must only
/// ever hold markup or script produced by this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
  name: &'static str,
  attributes: Vec<Attribute>,
  body: Option<String>,
}

impl Tag {
  /// Start a `<script>` element.
  pub fn script() -> Self {
    Self {
      name: "script",
      attributes: Vec::new(),
      body: None,
    }
  }

  /// Add a boolean attribute.
  pub fn flag(mut self, name: &'static str) -> Self {
    self.attributes.push(Attribute::Flag(name));
    self
  }

  /// Add a valued attribute.
  pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
    self.attributes.push(Attribute::Value(name, value.into()));
    self
  }

  /// Set the inline body.
  pub fn body(mut self, body: impl Into<String>) -> Self {
    self.body = Some(body.into());
    self
  }

  /// Value of the first attribute called `name`, if any.
  pub fn attribute(&self, name: &str) -> Option<&str> {
    self.attributes.iter().find_map(|attribute| match attribute {
      Attribute::Value(key, value) if *key == name => Some(value.as_str()),
      Attribute::Flag(key) if *key == name => Some(""),
      _ => None,
    })
  }

  /// Whether the boolean attribute `name` is present.
  pub fn has_flag(&self, name: &str) -> bool {
    self
      .attributes
      .iter()
      .any(|attribute| matches!(attribute, Attribute::Flag(key) if *key == name))
  }

  /// Inline body, if any.
  pub fn inner(&self) -> Option<&str> {
    self.body.as_deref()
  }
}

impl fmt::Display for Tag {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "<{}", self.name)?;
    for attribute in &self.attributes {
      match attribute {
        Attribute::Flag(name) => write!(f, " {name}")?,
        Attribute::Value(name, value) => write!(f, " {name}=\"{}\"", escape_attribute(value))?,
      }
    }
    write!(
      f,
      ">{}</{}>",
      self.body.as_deref().unwrap_or_default(),
      self.name
    )
  }
}

/// Escape a value for use inside a double-quoted attribute.
pub fn escape_attribute(value: &str) -> String {
  let mut escaped = String::with_capacity(value.len());
  for c in value.chars() {
    match c {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      '"' => escaped.push_str("&quot;"),
      '\'' => escaped.push_str("&#39;"),
      other => escaped.push(other),
    }
  }
  escaped
}

/// Render tags one per line.
pub fn join_tags(tags: &[Tag]) -> String {
  tags
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join("\n")
}
