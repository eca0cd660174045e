use std::ops::Range;

/// Half-open byte range `[start, end)` of a factory body inside the bundle source.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentRange {
  pub start: u32,
  pub end: u32,
}

impl ContentRange {
  pub fn new(start: u32, end: u32) -> Self {
    debug_assert!(start <= end);
    Self { start, end }
  }

  pub fn empty_at(offset: u32) -> Self {
    Self { start: offset, end: offset }
  }

  pub fn is_empty(&self) -> bool {
    self.start == self.end
  }

  pub fn len(&self) -> u32 {
    self.end - self.start
  }

  pub fn as_range(&self) -> Range<usize> {
    self.start as usize..self.end as usize
  }

  pub fn slice<'s>(&self, source: &'s str) -> &'s str {
    &source[self.as_range()]
  }
}

#[test]
fn test_slice() {
  let range = ContentRange::new(2, 5);
  assert_eq!(range.slice("a{bcd}"), "bcd");
  assert_eq!(range.len(), 3);
  assert!(ContentRange::empty_at(4).is_empty());
  assert_eq!(ContentRange::default().slice("abc"), "");
}
