use crate::ecmascript::legitimize_identifier_name;

/// Derives the wrapper variable name of an unpacked file from its output path,
/// e.g. `lib/a-b.js` becomes `lib_a_b_js`.
pub fn sanitize_file_name(str: &str) -> String {
  let mut sanitized = String::with_capacity(str.len());
  for char in str.chars() {
    if matches!(char, '/' | '\\' | ':' | '|' | '.' | '-') {
      sanitized.push('_');
    } else {
      sanitized.push(char);
    }
  }
  legitimize_identifier_name(&sanitized).into_owned()
}

#[test]
fn test_sanitize_file_name() {
  assert_eq!(sanitize_file_name("index.js"), "index_js");
  assert_eq!(sanitize_file_name("lib/a-b.js"), "lib_a_b_js");
  assert_eq!(sanitize_file_name("C:\\src\\x.js"), "C__src_x_js");
  assert_eq!(sanitize_file_name("0.js"), "_0_js");
  assert_eq!(sanitize_file_name("node_modules/@scope/pkg/index.js"), "node_modules__scope_pkg_index_js");
}
