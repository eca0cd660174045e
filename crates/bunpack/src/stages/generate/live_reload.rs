use bunpack_utils::{concat_string, sanitize_file_name::sanitize_file_name};

/// Appended to a module's call in the loader when live reload is on. If the module exports
/// a constructor, it is swapped for a wrapper that subscribes to window events named after
/// the module's file (and after each of its local dependencies) and then defers to the
/// original constructor. Statics and the prototype are carried over.
pub fn render_live_reload(event: &str, dependency_events: &[String]) -> String {
  let name = sanitize_file_name(event);
  let wrapper = concat_string!("event___", name);
  let event = quote(event);

  let mut script = String::new();
  script.push_str("if(module.exports.prototype !== undefined){\n");
  script.push_str("\tif(module.exports.prototype.constructor !== undefined ){\n");
  script.push_str("\t\tvar Module = module.exports;\n");
  script.push_str(&concat_string!("\t\tvar ", wrapper, " = function(){\n"));
  script.push_str(&concat_string!("\t\t\tthis.liveEvent = ", event, ";\n"));
  script.push_str("\t\t\twindow.addEventListener(this.liveEvent,function(){\n");
  script.push_str("\t\t\t\tif(this.onLiveChange !== undefined){\n");
  script.push_str("\t\t\t\t\tthis.onLiveChange.call(this);\n");
  script.push_str("\t\t\t\t}\n");
  script.push_str("\t\t\t}.bind(this));\n");

  for dependency_event in dependency_events {
    let dependency_event = quote(dependency_event);
    script.push_str(&concat_string!("\t\t\twindow.addEventListener(", dependency_event, ",function(){\n"));
    script.push_str("\t\t\t\tif(this.onLiveExternalChange !== undefined){\n");
    script.push_str("\t\t\t\t\tthis.onLiveExternalChange.call(this);\n");
    script.push_str("\t\t\t\t}\n");
    script.push_str("\t\t\t}.bind(this));\n");
  }

  script.push_str("\t\t\treturn Module.apply(this,arguments);\n");
  script.push_str("\t\t};\n");
  script.push_str(&concat_string!("\t\tObject.assign(", wrapper, ", Module);\n"));
  script.push_str(&concat_string!("\t\t", wrapper, ".prototype = Module.prototype;\n"));
  script.push_str(&concat_string!("\t\t", wrapper, ".prototype.constructor = ", wrapper, ";\n"));
  script.push_str(&concat_string!("\t\tmodule.exports = ", wrapper, ";\n"));
  script.push_str("\t}\n");
  script.push_str("}\n");
  script
}

/// A JS string literal for `value`.
fn quote(value: &str) -> String {
  serde_json::Value::from(value).to_string()
}

#[cfg(test)]
mod tests {
  use bunpack_ecmascript::EcmaCompiler;

  use super::*;

  #[test]
  fn scaffold_is_valid_script() {
    let script = render_live_reload("lib/a-b.js", &["./c".to_string(), "x\"y".to_string()]);
    assert!(script.contains("var event___lib_a_b_js = function(){"));
    assert!(script.contains("this.liveEvent = \"lib/a-b.js\";"));
    assert!(script.contains("window.addEventListener(\"./c\","));
    assert!(script.contains("window.addEventListener(\"x\\\"y\","));

    let wrapped = concat_string!("function f(module){\n", script, "}");
    EcmaCompiler::parse(wrapped, EcmaCompiler::script_source_type()).unwrap();
  }
}
