use std::path::PathBuf;

use bunpack_utils::indexmap::FxIndexMap;

/// One mapping of the bundle's input map. Lines and columns are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceMapping {
  pub dst_line: u32,
  pub dst_col: u32,
  pub src_line: u32,
  pub src_col: u32,
  pub source_id: u32,
  pub name_id: Option<u32>,
}

impl SourceMapping {
  pub fn dst(&self) -> (u32, u32) {
    (self.dst_line, self.dst_col)
  }
}

/// Every mapping of the input map that points into a single original file, in generated
/// order.
#[derive(Debug, Clone)]
pub struct FileMappings {
  /// The `sources` entry of the input map as written.
  pub source: String,
  pub mappings: Vec<SourceMapping>,
  /// `sourcesContent` of the input map, if it carried any.
  pub original: Option<String>,
}

impl FileMappings {
  pub fn new(source: String, original: Option<String>) -> Self {
    Self { source, mappings: Vec::new(), original }
  }

  pub fn start(&self) -> Option<&SourceMapping> {
    self.mappings.first()
  }

  pub fn end(&self) -> Option<&SourceMapping> {
    self.mappings.last()
  }

  /// Mappings whose generated position lies in `[start, end)`.
  pub fn within(&self, start: (u32, u32), end: (u32, u32)) -> impl Iterator<Item = &SourceMapping> {
    self.mappings.iter().filter(move |mapping| mapping.dst() >= start && mapping.dst() < end)
  }
}

/// Resolved original path to its mappings, ordered by first appearance in the bundle.
pub type FileMappingsTable = FxIndexMap<PathBuf, FileMappings>;

#[cfg(test)]
mod tests {
  use super::*;

  fn mapping(dst_line: u32, dst_col: u32) -> SourceMapping {
    SourceMapping { dst_line, dst_col, src_line: 0, src_col: 0, source_id: 0, name_id: None }
  }

  #[test]
  fn bounds_and_window() {
    let mut file = FileMappings::new("a.js".to_string(), None);
    assert!(file.start().is_none());
    file.mappings.extend([mapping(1, 0), mapping(1, 8), mapping(2, 0), mapping(4, 2)]);

    assert_eq!(file.start().map(SourceMapping::dst), Some((1, 0)));
    assert_eq!(file.end().map(SourceMapping::dst), Some((4, 2)));

    let inside = file.within((1, 4), (4, 2)).map(SourceMapping::dst).collect::<Vec<_>>();
    assert_eq!(inside, vec![(1, 8), (2, 0)]);
  }
}
