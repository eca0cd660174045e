use memchr::memchr_iter;

/// A generated position as source maps count it: 0-based line, 0-based UTF-16 column.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
  pub line: u32,
  pub column: u32,
}

impl Position {
  pub fn new(line: u32, column: u32) -> Self {
    Self { line, column }
  }
}

/// Maps byte offsets of a text to [`Position`]s.
#[derive(Debug)]
pub struct LineIndex<'a> {
  text: &'a str,
  line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
  pub fn new(text: &'a str) -> Self {
    let mut line_starts = Vec::with_capacity(text.len() / 32 + 1);
    line_starts.push(0);
    line_starts.extend(memchr_iter(b'\n', text.as_bytes()).map(|index| index + 1));
    Self { text, line_starts }
  }

  pub fn position(&self, offset: usize) -> Position {
    let offset = offset.min(self.text.len());
    let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
    let line_start = self.line_starts[line];
    let column = utf16_len(&self.text[line_start..offset]);
    Position::new(u32::try_from(line).unwrap_or(u32::MAX), column)
  }
}

pub(crate) fn utf16_len(text: &str) -> u32 {
  u32::try_from(text.encode_utf16().count()).unwrap_or(u32::MAX)
}

/// Position right after `text` when it is written starting at `start`.
pub(crate) fn advance(start: Position, text: &str) -> Position {
  match text.rfind('\n') {
    Some(last_newline) => Position::new(
      start.line + crate::lines_count(text),
      utf16_len(&text[last_newline + 1..]),
    ),
    None => Position::new(start.line, start.column + utf16_len(text)),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn positions() {
    let index = LineIndex::new("ab\ncd\n\néf");
    assert_eq!(index.position(0), Position::new(0, 0));
    assert_eq!(index.position(2), Position::new(0, 2));
    assert_eq!(index.position(3), Position::new(1, 0));
    assert_eq!(index.position(7), Position::new(3, 0));
    // `é` is two bytes but one UTF-16 unit.
    assert_eq!(index.position(9), Position::new(3, 1));
    assert_eq!(index.position(100), Position::new(3, 2));
  }

  #[test]
  fn advance_over_text() {
    assert_eq!(advance(Position::new(2, 4), "abc"), Position::new(2, 7));
    assert_eq!(advance(Position::new(2, 4), "a\nbc"), Position::new(3, 2));
    assert_eq!(advance(Position::new(2, 4), "a\n"), Position::new(3, 0));
  }
}
