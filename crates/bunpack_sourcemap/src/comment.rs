use std::{ops::Range, sync::LazyLock};

use regex::Regex;

use oxc_sourcemap::SourceMap;

static LINE_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?m)^[ \t]*//[#@][ \t]+sourceMappingURL=([^\s'\x22]+)[ \t]*\r?$\n?").unwrap()
});

static BLOCK_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?m)^[ \t]*/\*[#@][ \t]+sourceMappingURL=([^\s'\x22]+)[ \t]*\*/[ \t]*\r?$\n?").unwrap()
});

/// The URL of the last `sourceMappingURL` comment in `source`, inline or not.
pub(crate) fn find_source_map_url(source: &str) -> Option<&str> {
  let line = LINE_COMMENT_RE.captures_iter(source).last();
  let block = BLOCK_COMMENT_RE.captures_iter(source).last();
  let last = match (line, block) {
    (Some(line), Some(block)) => {
      if line.get(0)?.start() > block.get(0)?.start() {
        line
      } else {
        block
      }
    }
    (Some(found), None) | (None, Some(found)) => found,
    (None, None) => return None,
  };
  last.get(1).map(|url| url.as_str())
}

/// Byte ranges of every `sourceMappingURL` comment line in `source`, trailing newline
/// included, in source order.
pub(crate) fn source_map_comment_ranges(source: &str) -> Vec<Range<usize>> {
  let mut ranges = LINE_COMMENT_RE
    .find_iter(source)
    .chain(BLOCK_COMMENT_RE.find_iter(source))
    .map(|found| found.range())
    .collect::<Vec<_>>();
  ranges.sort_by_key(|range| range.start);
  ranges
}

/// `//# sourceMappingURL=data:application/json;charset=utf-8;base64,...`
pub fn inline_comment(map: &SourceMap) -> String {
  format!("//# sourceMappingURL={}", map.to_data_url())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn finds_last_comment() {
    let source = "a();\n//# sourceMappingURL=old.map\nb();\n//# sourceMappingURL=bundle.js.map\n";
    assert_eq!(find_source_map_url(source), Some("bundle.js.map"));

    let source = "a();\n/*# sourceMappingURL=data:application/json;base64,e30= */";
    assert_eq!(find_source_map_url(source), Some("data:application/json;base64,e30="));

    assert_eq!(find_source_map_url("a(); // sourceMappingURL=x.map"), None);
  }

  #[test]
  fn comment_ranges() {
    let source = "a();\n//# sourceMappingURL=data:application/json;base64,e30=\nb();\n/*@ sourceMappingURL=x.map */";
    let ranges = source_map_comment_ranges(source);
    let removed = ranges.iter().map(|range| &source[range.clone()]).collect::<Vec<_>>();
    assert_eq!(
      removed,
      vec!["//# sourceMappingURL=data:application/json;base64,e30=\n", "/*@ sourceMappingURL=x.map */"]
    );

    assert!(source_map_comment_ranges("a(); // sourceMappingURL=x.map").is_empty());
  }
}
