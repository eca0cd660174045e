use std::path::Path;

use bunpack_utils::{path_ext::PathExt, sanitize_file_name::sanitize_file_name};
use rustc_hash::FxHashSet;
use sugar_path::SugarPath;

/// Where a module's file goes below `<name>/browserify/`. Absolute labels are made
/// relative to `relativize_output_path` when one is given; whatever is still absolute
/// loses its root so it nests under the output directory.
pub fn module_output_path(src: &str, relativize_output_path: Option<&Path>) -> String {
  let src = Path::new(src);
  let path = match relativize_output_path {
    Some(anchor) if src.is_absolute() => src.relative(anchor),
    _ => src.to_path_buf(),
  };
  path.without_root().to_slash_lossy().into_owned()
}

/// Hands out wrapper function names, one per output path, never the same twice.
#[derive(Debug, Default)]
pub struct WrapperNames {
  used: FxHashSet<String>,
}

impl WrapperNames {
  pub fn assign(&mut self, output_path: &str) -> String {
    let base = sanitize_file_name(output_path);
    let mut name = base.clone();
    let mut suffix = 1;
    while !self.used.insert(name.clone()) {
      name = format!("{base}_{suffix}");
      suffix += 1;
    }
    name
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn output_paths() {
    assert_eq!(module_output_path("lib/a.js", None), "lib/a.js");
    assert_eq!(module_output_path("/abs/src/a.js", None), "abs/src/a.js");
    assert_eq!(module_output_path("/abs/src/a.js", Some(Path::new("/abs"))), "src/a.js");
    assert_eq!(module_output_path("/other/a.js", Some(Path::new("/abs/src"))), "other/a.js");
    assert_eq!(module_output_path("lib/a.js", Some(Path::new("/abs"))), "lib/a.js");
  }

  #[test]
  fn names_are_unique() {
    let mut names = WrapperNames::default();
    assert_eq!(names.assign("a.js"), "a_js");
    assert_eq!(names.assign("a-js"), "a_js_1");
    assert_eq!(names.assign("a_js"), "a_js_2");
    assert_eq!(names.assign("1.js"), "_1_js");
  }
}
