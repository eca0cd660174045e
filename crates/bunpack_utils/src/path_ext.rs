use std::path::{Component, Path, PathBuf};

pub trait PathExt {
  /// Keeps only the normal components so the path nests under another directory: prefix,
  /// root, `.` and `..` are dropped.
  fn without_root(&self) -> PathBuf;

  /// Returns the suffix of the path starting at the first component named `name`.
  fn suffix_from_component(&self, name: &str) -> Option<PathBuf>;
}

impl PathExt for Path {
  fn without_root(&self) -> PathBuf {
    self
      .components()
      .filter(|component| matches!(component, Component::Normal(_)))
      .collect()
  }

  fn suffix_from_component(&self, name: &str) -> Option<PathBuf> {
    let components = self.components().collect::<Vec<_>>();
    let position = components
      .iter()
      .position(|component| matches!(component, Component::Normal(part) if *part == name))?;
    Some(components[position..].iter().collect())
  }
}

#[test]
fn test_without_root() {
  let path = Path::new("/project/src/a.js");
  assert_eq!(path.without_root(), Path::new("project/src/a.js"));

  let path = Path::new("src/a.js");
  assert_eq!(path.without_root(), Path::new("src/a.js"));

  let path = Path::new("../../other/./a.js");
  assert_eq!(path.without_root(), Path::new("other/a.js"));
}

#[test]
fn test_suffix_from_component() {
  let path = Path::new("/project/node_modules/pkg/node_modules/dep/index.js");
  assert_eq!(
    path.suffix_from_component("node_modules"),
    Some(PathBuf::from("node_modules/pkg/node_modules/dep/index.js"))
  );
  assert_eq!(Path::new("/project/src/a.js").suffix_from_component("node_modules"), None);
}
