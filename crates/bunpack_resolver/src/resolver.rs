use std::path::{Path, PathBuf};

use itertools::Itertools;
use sugar_path::SugarPath;

use oxc_resolver::{ResolveOptions as OxcResolverOptions, ResolverGeneric};

use bunpack_common::Platform;
use bunpack_fs::{FileSystem, OsFileSystem};

pub struct Resolver<F: FileSystem = OsFileSystem> {
  inner: ResolverGeneric<F>,
}

impl<F: FileSystem> std::fmt::Debug for Resolver<F> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Resolver").finish_non_exhaustive()
  }
}

impl<F: FileSystem> Resolver<F> {
  /// Every lookup reads through `fs`.
  pub fn new(platform: Platform, fs: F) -> Self {
    let mut condition_names = vec!["require".to_string(), "default".to_string()];

    match platform {
      Platform::Node => {
        condition_names.push("node".to_string());
      }
      Platform::Browser => {
        condition_names.push("browser".to_string());
      }
      Platform::Neutral => {}
    }

    condition_names = condition_names.into_iter().unique().collect();

    let main_fields = match platform {
      Platform::Node | Platform::Neutral => vec!["main".to_string()],
      Platform::Browser => vec!["browser".to_string(), "main".to_string()],
    };

    let alias_fields = match platform {
      Platform::Browser => vec![vec!["browser".to_string()]],
      _ => vec![],
    };

    let options = OxcResolverOptions {
      main_fields,
      alias_fields,
      condition_names,
      builtin_modules: false,
      extensions: [".js", ".json", ".node", ".jsx", ".ts", ".mjs", ".cjs"]
        .into_iter()
        .map(String::from)
        .collect(),
      ..Default::default()
    };

    Self { inner: ResolverGeneric::new_with_file_system(fs, options) }
  }

  /// Looks `specifier` up in each directory of `search_paths` in turn: as an exact file, with
  /// each known extension, then as a directory (package main or `index`). First match wins.
  pub fn find_path(&self, specifier: &str, search_paths: &[PathBuf]) -> Option<PathBuf> {
    if specifier.is_empty() {
      return None;
    }
    search_paths.iter().find_map(|dir| self.resolve_in(dir, specifier))
  }

  fn resolve_in(&self, dir: &Path, specifier: &str) -> Option<PathBuf> {
    let dir = dir.absolutize();
    let candidate = dir.join(specifier).normalize();
    let candidate = candidate.to_str()?;

    match self.inner.resolve(&dir, candidate) {
      Ok(resolution) => Some(resolution.full_path()),
      Err(err) => {
        tracing::trace!("{specifier:?} not found in {}: {err}", dir.display());
        None
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use super::*;

  fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
  }

  #[test]
  fn first_matching_directory_wins() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    write(&root.join("src/a.js"), "");
    write(&root.join("lib/a.js"), "");

    let resolver = Resolver::new(Platform::Node, OsFileSystem);
    let found = resolver.find_path("./a", &[root.join("lib"), root.join("src")]);
    assert_eq!(found, Some(root.join("lib/a.js")));

    let found = resolver.find_path("./a", &[root.join("missing"), root.join("src")]);
    assert_eq!(found, Some(root.join("src/a.js")));
  }

  #[test]
  fn resolves_extensions_and_directories() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    write(&root.join("data.json"), "{}");
    write(&root.join("util/index.js"), "");
    write(&root.join("node_modules/pkg/package.json"), r#"{"main": "lib/main.js"}"#);
    write(&root.join("node_modules/pkg/lib/main.js"), "");

    let resolver = Resolver::new(Platform::Node, OsFileSystem);
    let search_paths = [root.clone()];
    assert_eq!(resolver.find_path("./data", &search_paths), Some(root.join("data.json")));
    assert_eq!(resolver.find_path("./util", &search_paths), Some(root.join("util/index.js")));

    let search_paths = [root.join("node_modules")];
    assert_eq!(
      resolver.find_path("pkg", &search_paths),
      Some(root.join("node_modules/pkg/lib/main.js"))
    );
  }

  #[test]
  fn missing_everywhere_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let resolver = Resolver::new(Platform::Node, OsFileSystem);
    assert_eq!(resolver.find_path("./nope", &[dir.path().to_path_buf()]), None);
    assert_eq!(resolver.find_path("", &[dir.path().to_path_buf()]), None);
  }
}
