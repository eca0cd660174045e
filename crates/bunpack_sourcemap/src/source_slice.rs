use std::path::PathBuf;

use crate::{InputSourceMap, SourceMapping};

/// The stretch of bundle text that one `sources` entry of the input map accounts for.
#[derive(Debug, Clone)]
pub struct SourceSlice {
  pub source: String,
  /// First and last mapping into `source`, in generated order.
  pub start: SourceMapping,
  pub end: SourceMapping,
  /// Bundle lines from the first mapping's line through the last mapping's line.
  pub generated: String,
}

impl InputSourceMap {
  /// Cuts `bundle` into one slice per original source, without parsing it. Slices of
  /// sources whose code is interleaved in the bundle overlap.
  pub fn slice_by_source(&self, bundle: &str) -> Vec<SourceSlice> {
    let lines = bundle.split('\n').collect::<Vec<_>>();
    self
      .group_by_file(|source| Some(PathBuf::from(source)))
      .into_values()
      .filter_map(|file| {
        let (start, end) = (*file.start()?, *file.end()?);
        let from = (start.dst_line as usize).min(lines.len());
        let to = (end.dst_line as usize + 1).min(lines.len());
        Some(SourceSlice { source: file.source, start, end, generated: lines[from..to].join("\n") })
      })
      .collect()
  }
}
