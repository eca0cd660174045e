/// Concatenates string-like expressions with a single allocation.
#[macro_export]
macro_rules! concat_string {
  () => {
    String::with_capacity(0)
  };
  ($($s:expr),+ $(,)?) => {{
    let mut len = 0;
    $(len += AsRef::<str>::as_ref(&$s).len();)+
    let mut buf = String::with_capacity(len);
    $(buf.push_str(AsRef::<str>::as_ref(&$s));)+
    buf
  }};
}

#[test]
fn test_concat_string() {
  let name = String::from("a_js");
  assert_eq!(concat_string!(name, "(require,module,exports);"), "a_js(require,module,exports);");
  assert_eq!(concat_string!(), "");
}
