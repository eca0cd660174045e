use std::path::PathBuf;

use arcstr::ArcStr;
use bunpack_common::{ContentRange, ModuleId};
use bunpack_utils::indexmap::FxIndexMap;

/// Where an extracted module is headed.
#[derive(Debug, Clone)]
pub struct ExtractTarget {
  /// Original file the module was built from. Picks its mappings out of the input map.
  pub path: PathBuf,
  /// Output URL, written as the map's `file`.
  pub url: String,
  /// Label written as the map's only source, `/<src>`.
  pub src: String,
}

#[derive(Debug)]
pub struct ExtractedModule {
  /// The entry factory's body exactly as it appears in the bundle.
  pub content: String,
  /// `sourceMappingURL` comment carrying the map of `content` back to the original file.
  pub map_comment: String,
  pub content_range: ContentRange,
  pub dependencies: FxIndexMap<ArcStr, ModuleId>,
}
