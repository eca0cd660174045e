use bunpack_utils::indexmap::FxIndexMap;
use serde::Serialize;

use crate::ModuleId;

/// One row of `browserify.map.json`.
#[derive(Debug, Clone, Serialize)]
pub struct OutputManifestEntry {
  /// Path of the unpacked file relative to the output directory.
  pub url: String,
  /// Absolute path the module was resolved to.
  pub path: String,
  pub src: String,
  /// Name of the wrapper function the file declares.
  pub name: String,
  pub externals: Vec<String>,
  pub deps: FxIndexMap<String, ModuleId>,
  /// The exact first line of the unpacked file.
  pub line: String,
}
