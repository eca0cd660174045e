use std::fmt::Display;

/// Which package fields the resolver honours.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
  /// `main`, like Node's own lookup.
  #[default]
  Node,
  /// `browser` field and aliases first, then `main`.
  Browser,
  Neutral,
}

impl Display for Platform {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Node => write!(f, "node"),
      Self::Browser => write!(f, "browser"),
      Self::Neutral => write!(f, "neutral"),
    }
  }
}
