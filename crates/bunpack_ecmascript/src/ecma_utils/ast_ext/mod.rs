pub mod expression_ext;
pub mod property_key_ext;
pub mod statement_ext;

/// Canonical text of a numeric module id, `1` rather than `1.0`.
pub(crate) fn number_to_key(value: f64) -> String {
  if value.is_finite() && value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
    #[allow(clippy::cast_possible_truncation)]
    let integer = value as i64;
    integer.to_string()
  } else {
    value.to_string()
  }
}

#[test]
fn test_number_to_key() {
  assert_eq!(number_to_key(1.0), "1");
  assert_eq!(number_to_key(-3.0), "-3");
  assert_eq!(number_to_key(1.5), "1.5");
}
