use std::{
  ffi::OsString,
  path::{Path, PathBuf},
};

use base64_simd::STANDARD;
use bunpack_error::UnpackError;
use bunpack_fs::FileSystem;
use oxc_sourcemap::SourceMap;
use rustc_hash::FxHashMap;

use crate::{
  comment::find_source_map_url,
  file_mappings::{FileMappings, FileMappingsTable, SourceMapping},
};

/// The source map that came with the bundle, decoded into mappings sorted by generated
/// position.
#[derive(Debug)]
pub struct InputSourceMap {
  map: SourceMap,
  mappings: Vec<SourceMapping>,
}

impl InputSourceMap {
  /// Looks for the bundle's map: an inline data URL, then the file a `sourceMappingURL`
  /// comment names, then `<bundle>.map`.
  pub fn load<F: FileSystem + ?Sized>(
    bundle_source: &str,
    bundle_path: &Path,
    fs: &F,
  ) -> Result<Option<Self>, UnpackError> {
    let bundle_dir = bundle_path.parent().unwrap_or_else(|| Path::new(""));

    if let Some(url) = find_source_map_url(bundle_source) {
      if let Some(data) = url.strip_prefix("data:") {
        tracing::debug!("Reading source map from embedded comment");
        return decode_data_url(data).and_then(|json| Self::from_json(&json)).map(Some);
      }
      let url = url.split(['?', '#']).next().unwrap_or(url);
      let companion = bundle_dir.join(url);
      if fs.is_file(&companion) {
        tracing::debug!("Reading source map from {}", companion.display());
        return Self::read(&companion, fs).map(Some);
      }
      tracing::debug!("Source map {} named by the bundle does not exist", companion.display());
    }

    let mut sibling = OsString::from(bundle_path.as_os_str());
    sibling.push(".map");
    let sibling = PathBuf::from(sibling);
    if fs.is_file(&sibling) {
      tracing::debug!("Reading source map from {}", sibling.display());
      return Self::read(&sibling, fs).map(Some);
    }

    Ok(None)
  }

  fn read<F: FileSystem + ?Sized>(path: &Path, fs: &F) -> Result<Self, UnpackError> {
    let json = fs
      .read_to_string(path)
      .map_err(|err| UnpackError::SourceMapInvalid { reason: format!("{}: {err}", path.display()) })?;
    Self::from_json(&json)
  }

  pub fn from_json(json: &str) -> Result<Self, UnpackError> {
    let map = SourceMap::from_json_string(json)
      .map_err(|err| UnpackError::SourceMapInvalid { reason: format!("{err:?}") })?;
    Ok(Self::new(map))
  }

  pub fn new(map: SourceMap) -> Self {
    let mut mappings = map
      .get_tokens()
      .filter_map(|token| {
        Some(SourceMapping {
          dst_line: token.get_dst_line(),
          dst_col: token.get_dst_col(),
          src_line: token.get_src_line(),
          src_col: token.get_src_col(),
          source_id: token.get_source_id()?,
          name_id: token.get_name_id(),
        })
      })
      .collect::<Vec<_>>();
    mappings.sort_by_key(SourceMapping::dst);
    Self { map, mappings }
  }

  pub fn mappings(&self) -> &[SourceMapping] {
    &self.mappings
  }

  /// Mappings whose generated position lies in `[start, end)`.
  pub fn mappings_within(&self, start: (u32, u32), end: (u32, u32)) -> &[SourceMapping] {
    let from = self.mappings.partition_point(|mapping| mapping.dst() < start);
    let to = self.mappings.partition_point(|mapping| mapping.dst() < end).max(from);
    &self.mappings[from..to]
  }

  /// The `sources` entry of the first mapping generated inside `[start, end)`.
  pub fn first_source_within(&self, start: (u32, u32), end: (u32, u32)) -> Option<String> {
    self.mappings_within(start, end).first().and_then(|mapping| self.source(mapping.source_id))
  }

  pub fn source(&self, id: u32) -> Option<String> {
    self.map.get_source(id).map(|source| source.to_string())
  }

  pub fn source_content(&self, id: u32) -> Option<String> {
    self.map.get_source_content(id).map(|content| content.to_string())
  }

  pub fn name(&self, id: u32) -> Option<String> {
    self.map.get_name(id).map(|name| name.to_string())
  }

  /// Groups the mappings by the original file they point into. `find_path` turns a
  /// `sources` entry into an absolute path; sources it cannot place are dropped.
  pub fn group_by_file(
    &self,
    mut find_path: impl FnMut(&str) -> Option<PathBuf>,
  ) -> FileMappingsTable {
    let mut resolved: FxHashMap<u32, Option<PathBuf>> = FxHashMap::default();
    let mut table = FileMappingsTable::default();

    for mapping in &self.mappings {
      let path = resolved.entry(mapping.source_id).or_insert_with(|| {
        let source = self.source(mapping.source_id)?;
        let path = find_path(&source);
        if path.is_none() {
          tracing::debug!("could not find source map file '{source}'");
        }
        path
      });
      let Some(path) = path else { continue };

      table
        .entry(path.clone())
        .or_insert_with(|| {
          FileMappings::new(
            self.source(mapping.source_id).unwrap_or_default(),
            self.source_content(mapping.source_id),
          )
        })
        .mappings
        .push(*mapping);
    }

    table
  }
}

fn decode_data_url(data: &str) -> Result<String, UnpackError> {
  let Some((header, payload)) = data.split_once(',') else {
    return Err(UnpackError::SourceMapInvalid { reason: "malformed data URL".to_string() });
  };
  if !header.split(';').any(|part| part == "base64") {
    return percent_encoding::percent_decode_str(payload)
      .decode_utf8()
      .map(|json| json.into_owned())
      .map_err(|err| UnpackError::SourceMapInvalid { reason: format!("bad utf-8: {err}") });
  }
  let bytes = STANDARD
    .decode_to_vec(payload.trim())
    .map_err(|err| UnpackError::SourceMapInvalid { reason: format!("bad base64: {err}") })?;
  String::from_utf8(bytes)
    .map_err(|err| UnpackError::SourceMapInvalid { reason: format!("bad utf-8: {err}") })
}

#[cfg(test)]
mod tests {
  use bunpack_fs::OsFileSystem;
  use oxc_sourcemap::SourceMapBuilder;

  use super::*;

  fn sample_map() -> SourceMap {
    let mut builder = SourceMapBuilder::default();
    let a = builder.add_source_and_content("src/a.js", "let a = 1;\n");
    let b = builder.add_source_and_content("src/b.js", "let b = 2;\n");
    builder.add_token(0, 0, 0, 0, None, None);
    builder.add_token(1, 2, 0, 0, Some(a), None);
    builder.add_token(1, 6, 0, 4, Some(a), None);
    builder.add_token(3, 2, 0, 0, Some(b), None);
    builder.add_token(4, 2, 0, 0, Some(a), None);
    builder.into_sourcemap()
  }

  #[test]
  fn window_queries() {
    let map = InputSourceMap::new(sample_map());
    assert_eq!(map.mappings().len(), 4);
    assert_eq!(map.mappings_within((1, 0), (2, 0)).len(), 2);
    assert_eq!(map.mappings_within((1, 3), (1, 3)).len(), 0);
    assert_eq!(map.first_source_within((2, 0), (9, 0)).as_deref(), Some("src/b.js"));
    assert_eq!(map.first_source_within((5, 0), (9, 0)), None);
  }

  #[test]
  fn groups_by_resolved_file() {
    let map = InputSourceMap::new(sample_map());
    let table = map.group_by_file(|source| {
      (source == "src/a.js").then(|| PathBuf::from("/project/src/a.js"))
    });

    assert_eq!(table.len(), 1);
    let file = &table[&PathBuf::from("/project/src/a.js")];
    assert_eq!(file.source, "src/a.js");
    assert_eq!(file.original.as_deref(), Some("let a = 1;\n"));
    assert_eq!(file.mappings.len(), 3);
    assert_eq!(file.start().map(SourceMapping::dst), Some((1, 2)));
    assert_eq!(file.end().map(SourceMapping::dst), Some((4, 2)));
  }

  #[test]
  fn loads_inline_map() {
    let source = format!("a();\n{}\n", crate::inline_comment(&sample_map()));
    let map = InputSourceMap::load(&source, Path::new("/nowhere/bundle.js"), &OsFileSystem)
      .unwrap()
      .unwrap();
    assert_eq!(map.mappings().len(), 4);
  }

  #[test]
  fn loads_uri_encoded_inline_map() {
    let json = sample_map().to_json_string();
    let encoded =
      percent_encoding::utf8_percent_encode(&json, percent_encoding::NON_ALPHANUMERIC).to_string();
    assert!(encoded.starts_with("%7B"));
    let source = format!("a();\n//# sourceMappingURL=data:application/json;charset=utf-8,{encoded}\n");
    let map = InputSourceMap::load(&source, Path::new("/nowhere/bundle.js"), &OsFileSystem)
      .unwrap()
      .unwrap();
    assert_eq!(map.mappings().len(), 4);
    assert_eq!(map.source(0).as_deref(), Some("src/a.js"));
  }

  #[test]
  fn loads_companion_and_sibling_maps() {
    let dir = tempfile::tempdir().unwrap();
    let json = sample_map().to_json_string();
    std::fs::create_dir_all(dir.path().join("maps")).unwrap();
    std::fs::write(dir.path().join("maps/out.map"), &json).unwrap();
    std::fs::write(dir.path().join("bundle.js.map"), &json).unwrap();

    let bundle = dir.path().join("bundle.js");
    let named = "a();\n//# sourceMappingURL=maps/out.map\n";
    assert!(InputSourceMap::load(named, &bundle, &OsFileSystem).unwrap().is_some());

    assert!(InputSourceMap::load("a();\n", &bundle, &OsFileSystem).unwrap().is_some());

    let other = dir.path().join("other.js");
    assert!(InputSourceMap::load("a();\n", &other, &OsFileSystem).unwrap().is_none());
  }

  #[test]
  fn rejects_invalid_maps() {
    let bundle = Path::new("/nowhere/bundle.js");
    let bad_base64 = "a();\n//# sourceMappingURL=data:application/json;base64,!!!!\n";
    assert!(matches!(
      InputSourceMap::load(bad_base64, bundle, &OsFileSystem),
      Err(UnpackError::SourceMapInvalid { .. })
    ));

    // `bm90IGpzb24=` is "not json".
    let bad_json = "a();\n//# sourceMappingURL=data:application/json;base64,bm90IGpzb24=\n";
    assert!(matches!(
      InputSourceMap::load(bad_json, bundle, &OsFileSystem),
      Err(UnpackError::SourceMapInvalid { .. })
    ));
  }
}
