use oxc_sourcemap::{SourceMap, SourceMapBuilder};
use rustc_hash::FxHashMap;

use crate::{
  comment::source_map_comment_ranges,
  line_index::{advance, LineIndex},
  InputSourceMap, Position,
};

/// `text` takes the place of the bundle bytes `[start, end)` in the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
  pub start: usize,
  pub end: usize,
  pub text: String,
}

#[derive(Debug)]
struct Shift {
  orig_start: Position,
  orig_end: Position,
  new_end: Position,
}

/// Builds the loader from the bundle by splicing replacements in, and carries the
/// bundle's mappings that survive the splice over to the loader.
#[derive(Debug)]
pub struct LoaderMapBuilder<'a> {
  bundle: &'a str,
  replacements: Vec<Replacement>,
}

impl<'a> LoaderMapBuilder<'a> {
  pub fn new(bundle: &'a str) -> Self {
    Self { bundle, replacements: Vec::new() }
  }

  /// Ranges must not overlap. They may be added in any order.
  pub fn replace(&mut self, start: usize, end: usize, text: String) {
    self.replacements.push(Replacement { start, end, text });
  }

  /// Drops the bundle's own `sourceMappingURL` comments that are not already inside a
  /// replaced range. They go through the same drift bookkeeping as any other replacement.
  pub fn remove_source_map_comments(&mut self) {
    for range in source_map_comment_ranges(self.bundle) {
      let covered = self
        .replacements
        .iter()
        .any(|replacement| replacement.start < range.end && range.start < replacement.end);
      if !covered {
        self.replace(range.start, range.end, String::new());
      }
    }
  }

  fn sorted(&self) -> Vec<&Replacement> {
    let mut sorted = self.replacements.iter().collect::<Vec<_>>();
    sorted.sort_by_key(|replacement| replacement.start);
    sorted
  }

  /// The bundle with every replacement applied.
  pub fn render(&self) -> String {
    let mut loader = String::with_capacity(self.bundle.len());
    let mut cursor = 0;
    for replacement in self.sorted() {
      loader.push_str(&self.bundle[cursor..replacement.start]);
      loader.push_str(&replacement.text);
      cursor = replacement.end;
    }
    loader.push_str(&self.bundle[cursor..]);
    loader
  }

  fn shifts(&self) -> Vec<Shift> {
    let index = LineIndex::new(self.bundle);
    let mut shifts: Vec<Shift> = Vec::with_capacity(self.replacements.len());
    for replacement in self.sorted() {
      let orig_start = index.position(replacement.start);
      let orig_end = index.position(replacement.end);
      let new_start = match shifts.last() {
        Some(previous) => previous.carry(orig_start),
        None => orig_start,
      };
      shifts.push(Shift { orig_start, orig_end, new_end: advance(new_start, &replacement.text) });
    }
    shifts
  }

  /// Where a bundle position ends up in the loader, `None` when it was replaced.
  fn locate(shifts: &[Shift], position: Position) -> Option<Position> {
    let after = shifts.partition_point(|shift| shift.orig_end <= position);
    if shifts.get(after).is_some_and(|shift| shift.orig_start <= position) {
      return None;
    }
    match after.checked_sub(1) {
      Some(previous) => Some(shifts[previous].carry(position)),
      None => Some(position),
    }
  }

  /// The loader's map: every input mapping outside the replaced ranges, moved by the
  /// drift the replacements before it introduce.
  pub fn build_map(&self, input: &InputSourceMap, file: &str) -> SourceMap {
    let shifts = self.shifts();
    let mut builder = SourceMapBuilder::default();
    builder.set_file(file);

    let mut sources: FxHashMap<u32, u32> = FxHashMap::default();
    let mut names: FxHashMap<u32, u32> = FxHashMap::default();

    for mapping in input.mappings() {
      let Some(dst) = Self::locate(&shifts, Position::new(mapping.dst_line, mapping.dst_col))
      else {
        continue;
      };
      let source_id = *sources.entry(mapping.source_id).or_insert_with(|| {
        builder.add_source_and_content(
          &input.source(mapping.source_id).unwrap_or_default(),
          &input.source_content(mapping.source_id).unwrap_or_default(),
        )
      });
      let name_id = mapping.name_id.and_then(|name_id| {
        if let Some(id) = names.get(&name_id) {
          return Some(*id);
        }
        let id = builder.add_name(&input.name(name_id)?);
        names.insert(name_id, id);
        Some(id)
      });
      builder.add_token(dst.line, dst.column, mapping.src_line, mapping.src_col, Some(source_id), name_id);
    }

    builder.into_sourcemap()
  }
}

impl Shift {
  /// Moves a position that follows this replacement (and precedes the next one).
  fn carry(&self, position: Position) -> Position {
    if position.line == self.orig_end.line {
      Position::new(self.new_end.line, self.new_end.column + (position.column - self.orig_end.column))
    } else {
      Position::new(position.line - self.orig_end.line + self.new_end.line, position.column)
    }
  }
}

#[cfg(test)]
mod tests {
  use oxc_sourcemap::SourceMapBuilder;

  use super::*;

  const BUNDLE: &str = "head();\nA1;\nA2;\nA3;\nmid(); B1; tail();\n";

  fn offsets(needle: &str) -> (usize, usize) {
    let start = BUNDLE.find(needle).unwrap();
    (start, start + needle.len())
  }

  #[test]
  fn renders_in_source_order() {
    let mut loader = LoaderMapBuilder::new(BUNDLE);
    let (b_start, b_end) = offsets("B1;");
    let (a_start, a_end) = offsets("A1;\nA2;\nA3;");
    loader.replace(b_start, b_end, "b();".to_string());
    loader.replace(a_start, a_end, "a();\n".to_string());
    assert_eq!(loader.render(), "head();\na();\n\nmid(); b(); tail();\n");
  }

  #[test]
  fn carries_surviving_mappings() {
    let mut builder = SourceMapBuilder::default();
    let id = builder.add_source_and_content("main.js", "");
    for (line, col) in [(0, 0), (1, 0), (3, 0), (4, 0), (4, 7), (4, 11)] {
      builder.add_token(line, col, line, col, Some(id), None);
    }
    let input = InputSourceMap::new(builder.into_sourcemap());

    let mut loader = LoaderMapBuilder::new(BUNDLE);
    let (a_start, a_end) = offsets("A1;\nA2;\nA3;");
    let (b_start, b_end) = offsets("B1;");
    loader.replace(a_start, a_end, "a();\n".to_string());
    loader.replace(b_start, b_end, "b();".to_string());

    let map = loader.build_map(&input, "/loader.js");
    let tokens = map
      .get_tokens()
      .map(|token| ((token.get_dst_line(), token.get_dst_col()), token.get_src_line()))
      .collect::<Vec<_>>();
    // `A1..A3` and `B1` are gone; `mid();` moves up one line and `tail();` one column right.
    assert_eq!(tokens, vec![((0, 0), 0), ((3, 0), 4), ((3, 12), 4)]);
    assert_eq!(map.get_file().map(|file| file.to_string()).as_deref(), Some("/loader.js"));
  }

  #[test]
  fn dropped_comments_shift_later_mappings() {
    let bundle = "head();\n//# sourceMappingURL=old.map\nA1;\ntail();\n//# sourceMappingURL=data:application/json;base64,e30=\n";
    let mut builder = SourceMapBuilder::default();
    let id = builder.add_source_and_content("main.js", "");
    builder.add_token(0, 0, 0, 0, Some(id), None);
    builder.add_token(3, 0, 3, 0, Some(id), None);
    let input = InputSourceMap::new(builder.into_sourcemap());

    let mut loader = LoaderMapBuilder::new(bundle);
    let a_start = bundle.find("A1;").unwrap();
    loader.replace(a_start, a_start + 3, "a();".to_string());
    loader.remove_source_map_comments();
    assert_eq!(loader.render(), "head();\na();\ntail();\n");

    let map = loader.build_map(&input, "/loader.js");
    let tokens = map
      .get_tokens()
      .map(|token| ((token.get_dst_line(), token.get_dst_col()), token.get_src_line()))
      .collect::<Vec<_>>();
    assert_eq!(tokens, vec![((0, 0), 0), ((2, 0), 3)]);
  }

  #[test]
  fn comments_inside_replaced_ranges_are_left_to_the_replacement() {
    let bundle = "a();\n//# sourceMappingURL=x.map\nb();\n";
    let mut loader = LoaderMapBuilder::new(bundle);
    loader.replace(0, bundle.len() - 1, "c();".to_string());
    loader.remove_source_map_comments();
    assert_eq!(loader.render(), "c();\n");
  }
}
