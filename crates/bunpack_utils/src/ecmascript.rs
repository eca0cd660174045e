use std::borrow::Cow;

use oxc::syntax::identifier::{is_identifier_name, is_identifier_part, is_identifier_start};

pub fn is_validate_identifier_name(name: &str) -> bool {
  is_identifier_name(name)
}

/// Turns an arbitrary string into something usable as a JS binding name.
pub fn legitimize_identifier_name(name: &str) -> Cow<str> {
  if is_validate_identifier_name(name) {
    return Cow::Borrowed(name);
  }

  let mut legitimized = String::with_capacity(name.len() + 1);
  let mut chars = name.chars();

  match chars.next() {
    Some(first) if is_identifier_start(first) => legitimized.push(first),
    Some(first) => {
      legitimized.push('_');
      legitimized.push(if is_identifier_part(first) { first } else { '_' });
    }
    None => legitimized.push('_'),
  }

  for char in chars {
    legitimized.push(if is_identifier_part(char) { char } else { '_' });
  }

  Cow::Owned(legitimized)
}

#[test]
fn test_is_validate_identifier_name() {
  assert!(is_validate_identifier_name("foo"));
  assert!(!is_validate_identifier_name("1aaaa"));
  assert!(!is_validate_identifier_name("😈"));
}

#[test]
fn test_legitimize_identifier_name() {
  assert_eq!(legitimize_identifier_name("foo_js"), "foo_js");
  assert_eq!(legitimize_identifier_name("1_js"), "_1_js");
  assert_eq!(legitimize_identifier_name("a b"), "a_b");
  assert_eq!(legitimize_identifier_name(""), "_");
}
