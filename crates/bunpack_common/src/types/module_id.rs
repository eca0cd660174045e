use std::fmt::Display;

use arcstr::ArcStr;
use serde::{Serialize, Serializer};

/// `ModuleId` is the bundle-local key of a module table entry, e.g. `1` or `"./a"`.
/// - Numeric keys are stored in canonical integer form so `1` and `1.0` are the same module.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct ModuleId(ArcStr);

impl ModuleId {
  pub fn new(value: impl Into<ArcStr>) -> Self {
    Self(value.into())
  }

  pub fn as_integer(&self) -> Option<i64> {
    let value = self.0.parse::<i64>().ok()?;
    // Reject forms like `01` or `+1` that would not round-trip.
    (value.to_string() == self.0.as_str()).then_some(value)
  }
}

impl std::ops::Deref for ModuleId {
  type Target = str;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl AsRef<str> for ModuleId {
  fn as_ref(&self) -> &str {
    self
  }
}

impl From<&str> for ModuleId {
  fn from(value: &str) -> Self {
    Self::new(value)
  }
}

impl From<ArcStr> for ModuleId {
  fn from(value: ArcStr) -> Self {
    Self::new(value)
  }
}

impl Display for ModuleId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

impl Serialize for ModuleId {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self.as_integer() {
      Some(value) => serializer.serialize_i64(value),
      None => serializer.serialize_str(&self.0),
    }
  }
}

#[test]
fn test_serialize() {
  assert_eq!(serde_json::to_string(&ModuleId::from("12")).unwrap(), "12");
  assert_eq!(serde_json::to_string(&ModuleId::from("012")).unwrap(), "\"012\"");
  assert_eq!(serde_json::to_string(&ModuleId::from("./a")).unwrap(), "\"./a\"");
}
