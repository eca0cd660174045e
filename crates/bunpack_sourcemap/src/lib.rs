mod comment;
mod file_mappings;
mod input_source_map;
mod line_index;
mod lines_count;
mod loader_map;
mod project;
mod source_slice;

pub use crate::{
  comment::inline_comment,
  file_mappings::{FileMappings, FileMappingsTable, SourceMapping},
  input_source_map::InputSourceMap,
  line_index::{LineIndex, Position},
  lines_count::lines_count,
  loader_map::{LoaderMapBuilder, Replacement},
  project::{project_module_map, ModuleMapContext},
  source_slice::SourceSlice,
};
pub use oxc_sourcemap::{SourceMap, SourceMapBuilder};
