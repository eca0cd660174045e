use oxc_sourcemap::{SourceMap, SourceMapBuilder};
use rustc_hash::FxHashMap;

use crate::{FileMappings, InputSourceMap, Position, SourceMapping};

/// Where a module sits in the bundle and where it lands in its emitted file.
#[derive(Debug, Clone, Copy)]
pub struct ModuleMapContext<'a> {
  /// Output URL of the emitted file.
  pub url: &'a str,
  /// Label of the original file. The map's only source is `/<src>`.
  pub src: &'a str,
  /// Bundle positions of the first and one-past-last content bytes.
  pub content_start: Position,
  pub content_end: Position,
  /// Lines the emitted file has in front of the content.
  pub prologue_lines: u32,
  /// Original text for `sourcesContent` when the input map carries none.
  pub original_content: Option<&'a str>,
}

/// Rebases the mappings that fall inside a module's content onto the emitted file.
///
/// Mappings come from the module's own group when it has one, otherwise from every
/// mapping inside the content range. Lines move by `content_start.line - prologue_lines`;
/// columns move only on the content's first line.
pub fn project_module_map(
  file: Option<&FileMappings>,
  input: &InputSourceMap,
  ctx: &ModuleMapContext,
) -> SourceMap {
  let start = (ctx.content_start.line, ctx.content_start.column);
  let end = (ctx.content_end.line, ctx.content_end.column);

  let mut builder = SourceMapBuilder::default();
  builder.set_file(&format!("/{}", ctx.url));

  let original = file
    .and_then(|file| file.original.as_deref())
    .or(ctx.original_content)
    .unwrap_or_default();
  let source_id = builder.add_source_and_content(&format!("/{}", ctx.src), original);

  let mappings: Vec<&SourceMapping> = match file {
    Some(file) => file.within(start, end).collect(),
    None => input.mappings_within(start, end).iter().collect(),
  };

  let mut names: FxHashMap<u32, u32> = FxHashMap::default();
  for mapping in mappings {
    let dst_line = mapping.dst_line - ctx.content_start.line + ctx.prologue_lines;
    let dst_col = if mapping.dst_line == ctx.content_start.line {
      mapping.dst_col.saturating_sub(ctx.content_start.column)
    } else {
      mapping.dst_col
    };
    let name_id = mapping.name_id.and_then(|name_id| {
      if let Some(id) = names.get(&name_id) {
        return Some(*id);
      }
      let id = builder.add_name(&input.name(name_id)?);
      names.insert(name_id, id);
      Some(id)
    });
    builder.add_token(dst_line, dst_col, mapping.src_line, mapping.src_col, Some(source_id), name_id);
  }

  builder.into_sourcemap()
}
