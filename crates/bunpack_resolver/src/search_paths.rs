use std::path::{Path, PathBuf};

use itertools::Itertools;

const NODE_MODULES: &str = "node_modules";

/// The conventional `node_modules` lookup chain starting at `dir`, nearest first.
/// Directories that are themselves named `node_modules` do not get a nested entry.
pub fn node_module_paths(dir: &Path) -> Vec<PathBuf> {
  dir
    .ancestors()
    .filter(|ancestor| ancestor.file_name().map_or(true, |name| name != NODE_MODULES))
    .map(|ancestor| ancestor.join(NODE_MODULES))
    .collect()
}

/// Ordered candidate directories for a lookup.
#[derive(Debug, Clone)]
pub struct SearchPaths {
  pub source_dir: PathBuf,
  pub root_dir: PathBuf,
  pub node_dir: PathBuf,
}

impl SearchPaths {
  pub fn new(source_dir: PathBuf, root_dir: PathBuf, node_dir: PathBuf) -> Self {
    Self { source_dir, root_dir, node_dir }
  }

  /// Tiers for a `require` made by a module living in `importer_dir`:
  /// 1. the importer's own directory
  /// 2. the source directory, then the project root
  /// 3. the `node_modules` root
  /// 4. the `node_modules` chain above the importer
  pub fn for_dependency(&self, importer_dir: &Path) -> Vec<PathBuf> {
    [
      importer_dir.to_path_buf(),
      self.source_dir.clone(),
      self.root_dir.clone(),
      self.node_dir.clone(),
    ]
    .into_iter()
    .chain(node_module_paths(importer_dir))
    .unique()
    .collect()
  }

  /// Tiers for a `sources` entry of the bundle's input source map.
  pub fn for_source_map(&self) -> Vec<PathBuf> {
    [self.root_dir.clone(), self.source_dir.clone(), self.node_dir.clone()]
      .into_iter()
      .unique()
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn node_module_paths_walks_up() {
    let paths = node_module_paths(Path::new("/project/node_modules/pkg/lib"));
    assert_eq!(
      paths,
      vec![
        PathBuf::from("/project/node_modules/pkg/lib/node_modules"),
        PathBuf::from("/project/node_modules/pkg/node_modules"),
        PathBuf::from("/project/node_modules"),
        PathBuf::from("/node_modules"),
      ]
    );
  }

  #[test]
  fn dependency_tiers_are_ordered_and_unique() {
    let search_paths = SearchPaths::new(
      PathBuf::from("/project/src"),
      PathBuf::from("/project"),
      PathBuf::from("/project/node_modules"),
    );
    let tiers = search_paths.for_dependency(Path::new("/project/src/lib"));
    assert_eq!(
      tiers,
      vec![
        PathBuf::from("/project/src/lib"),
        PathBuf::from("/project/src"),
        PathBuf::from("/project"),
        PathBuf::from("/project/node_modules"),
        PathBuf::from("/project/src/lib/node_modules"),
        PathBuf::from("/project/src/node_modules"),
        PathBuf::from("/node_modules"),
      ]
    );
  }

  #[test]
  fn source_map_tiers() {
    let search_paths = SearchPaths::new(
      PathBuf::from("/project"),
      PathBuf::from("/project"),
      PathBuf::from("/project/node_modules"),
    );
    assert_eq!(
      search_paths.for_source_map(),
      vec![PathBuf::from("/project"), PathBuf::from("/project/node_modules")]
    );
  }
}
