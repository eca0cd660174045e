use std::path::PathBuf;

use arcstr::ArcStr;
use bunpack_utils::indexmap::FxIndexMap;

use crate::{ContentRange, ModuleId, ModuleIdx};

#[derive(Debug, Clone)]
pub struct ModuleRecord {
  pub idx: ModuleIdx,
  pub id: ModuleId,
  pub content_range: ContentRange,
  /// Specifier as written in the original source -> id of the module it maps to.
  pub dependencies: FxIndexMap<ArcStr, ModuleId>,
  pub is_entry: bool,
  pub resolved_path: Option<PathBuf>,
  /// Label of the module relative to the source directory, or starting at `node_modules`.
  pub src: Option<String>,
  pub is_external_dependency: bool,
}

impl ModuleRecord {
  pub fn new(id: ModuleId, content_range: ContentRange) -> Self {
    Self {
      idx: ModuleIdx::default(),
      id,
      content_range,
      dependencies: FxIndexMap::default(),
      is_entry: false,
      resolved_path: None,
      src: None,
      is_external_dependency: false,
    }
  }

  pub fn is_resolved(&self) -> bool {
    self.resolved_path.is_some()
  }

  pub fn content<'s>(&self, bundle_source: &'s str) -> &'s str {
    self.content_range.slice(bundle_source)
  }

  pub fn externals(&self) -> Vec<String> {
    self.dependencies.keys().map(ToString::to_string).collect()
  }
}
