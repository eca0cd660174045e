mod bundle_shape;
mod module_entry;

use bunpack_common::{ModuleId, ModuleIdx, ModuleTable};
use bunpack_ecmascript::{EcmaCompiler, ExpressionExt};
use bunpack_error::{BuildResult, UnpackError};

use self::{
  bundle_shape::{match_bundle_shape, BundleArguments},
  module_entry::parse_module_entry,
};

#[derive(Debug)]
pub struct ScanStageOutput {
  pub module_table: ModuleTable,
  /// Entry modules in the order the entry list names them.
  pub entries: Vec<ModuleIdx>,
  pub warnings: Vec<anyhow::Error>,
}

/// Reads the module table and entry list out of a bundle, or rejects it with the first
/// expectation it does not meet.
pub fn parse_bundle(source: &str) -> BuildResult<ScanStageOutput> {
  ScanStage::new(source).scan()
}

pub struct ScanStage<'a> {
  source: &'a str,
}

impl<'a> ScanStage<'a> {
  pub fn new(source: &'a str) -> Self {
    Self { source }
  }

  pub fn scan(&self) -> BuildResult<ScanStageOutput> {
    tracing::debug!("Parsing bundle ({} bytes)", self.source.len());
    let ast = EcmaCompiler::parse(self.source, EcmaCompiler::script_source_type())?;
    let BundleArguments { modules, entries } = match_bundle_shape(ast.program())?;

    let mut module_table = ModuleTable::default();
    for property in &modules.properties {
      module_table.insert(parse_module_entry(property)?);
    }

    let mut warnings = vec![];
    let mut entry_indices = vec![];
    let entry_ids = entries.elements.iter().filter_map(|element| {
      element.as_expression()?.as_literal_key().map(|key| ModuleId::new(&*key))
    });
    for id in entry_ids {
      match module_table.idx_of(&id) {
        Some(idx) => {
          module_table.modules[idx].is_entry = true;
          if !entry_indices.contains(&idx) {
            entry_indices.push(idx);
          }
        }
        None => {
          tracing::warn!("Entry {id} is not in the module table");
          warnings.push(
            UnpackError::MissingModule { id: id.to_string(), importer: "the entry list".to_string() }
              .into(),
          );
        }
      }
    }

    tracing::debug!("Found {} modules, {} entries", module_table.len(), entry_indices.len());
    Ok(ScanStageOutput { module_table, entries: entry_indices, warnings })
  }
}

#[cfg(test)]
mod tests {
  use bunpack_common::ContentRange;
  use bunpack_error::ErrorKind;

  use super::*;

  const PRELUDE: &str = "(function(){function r(e,n,t){return function(){}}return r})()";

  fn content<'s>(source: &'s str, output: &ScanStageOutput, id: &str) -> &'s str {
    output.module_table.get(&id.into()).unwrap().content(source)
  }

  fn expectation(source: &str) -> &'static str {
    match parse_bundle(source).unwrap_err().0.remove(0).downcast::<UnpackError>().unwrap() {
      UnpackError::UnrecognizedBundleShape { expected } => expected,
      err => panic!("unexpected error {err}"),
    }
  }

  #[test]
  fn reads_modules_and_entries() {
    let source = format!(
      "{PRELUDE}({{1:[function(require,module,exports){{\n\"use strict\";\nvar a = require('./a');\n}},{{\"./a\":2,\"oMfpAn\":3,\"fs\":undefined}}],2:[function(require,module,exports){{\nmodule.exports = 1;\n}},{{}}]}},{{}},[1]);\n"
    );
    let output = parse_bundle(&source).unwrap();

    assert_eq!(output.module_table.len(), 2);
    assert_eq!(content(&source, &output, "1"), "\"use strict\";\nvar a = require('./a');");
    assert_eq!(content(&source, &output, "2"), "module.exports = 1;");

    let main = output.module_table.get(&"1".into()).unwrap();
    assert!(main.is_entry);
    assert_eq!(output.entries, vec![main.idx]);
    let deps = main.dependencies.iter().map(|(k, v)| (k.as_str(), &**v)).collect::<Vec<_>>();
    assert_eq!(deps, vec![("./a", "2")]);
    assert!(!output.module_table.get(&"2".into()).unwrap().is_entry);
    assert!(output.warnings.is_empty());
  }

  #[test]
  fn accepts_wrapper_forms() {
    let table = "({\"./a.js\":[(require,module,exports)=>{a()},{}]},{},[\"./a.js\"])";
    for source in [
      format!("{PRELUDE}{table};"),
      format!("!{PRELUDE}{table};;"),
      format!("require = {PRELUDE}{table}"),
      format!("({PRELUDE}{table})"),
    ] {
      let output = parse_bundle(&source).unwrap();
      assert_eq!(content(&source, &output, "./a.js"), "a()", "{source}");
    }
  }

  #[test]
  fn accepts_standalone_form() {
    let source = "(function(f){module.exports=f()})(function(){var define,module,exports;return (function e(t,n,r){return e})({1:[function(require,module,exports){\nx();\n},{}]},{},[1])(1)});";
    let output = parse_bundle(source).unwrap();
    assert_eq!(content(source, &output, "1"), "x();");
    assert_eq!(output.entries.len(), 1);
  }

  #[test]
  fn canonicalizes_numeric_ids() {
    let source = format!("{PRELUDE}({{1.0:[function(){{}},{{\"./b\":2.0}}],2:[function(){{}},{{}}]}},{{}},[1]);");
    let output = parse_bundle(&source).unwrap();
    let first = output.module_table.get(&"1".into()).unwrap();
    assert_eq!(first.dependencies.get("./b").map(|id| &**id), Some("2"));
    assert_eq!(output.entries, vec![first.idx]);
  }

  #[test]
  fn empty_body_is_zero_width_inside_brace() {
    let source = format!("{PRELUDE}({{1:[function(require,module,exports){{}},{{}}]}},{{}},[1]);");
    let output = parse_bundle(&source).unwrap();
    let range = output.module_table.get(&"1".into()).unwrap().content_range;
    let brace = source.find("exports){").unwrap() + "exports){".len();
    assert_eq!(range, ContentRange::empty_at(u32::try_from(brace).unwrap()));
  }

  #[test]
  fn missing_entry_is_a_warning() {
    let source = format!("{PRELUDE}({{1:[function(){{}},{{}}]}},{{}},[1,7]);");
    let output = parse_bundle(&source).unwrap();
    assert_eq!(output.entries.len(), 1);
    assert_eq!(output.warnings.len(), 1);
  }

  #[test]
  fn rejects_other_shapes() {
    let table = "({1:[function(){},{}]},{},[1])";
    assert_eq!(expectation(&format!("{PRELUDE}{table};foo();")), "a single top-level statement");
    assert_eq!(expectation(&format!("'use strict';{PRELUDE}{table};")), "a single top-level statement");
    assert_eq!(expectation("var x = 1;"), "the top-level statement to be an expression");
    assert_eq!(expectation("a + b;"), "a call expression");
    assert_eq!(expectation(&format!("{PRELUDE}({{}},{{}});")), "a call with three arguments");
    assert_eq!(
      expectation(&format!("{PRELUDE}([],{{}},[1]);")),
      "an object literal module table as the first argument"
    );
    assert_eq!(
      expectation(&format!("{PRELUDE}({{}},[],[1]);")),
      "an object literal cache as the second argument"
    );
    assert_eq!(
      expectation(&format!("{PRELUDE}({{}},{{}},{{}});")),
      "an array literal of entry ids as the third argument"
    );
    assert_eq!(
      expectation(&format!("{PRELUDE}({{1:[1,{{}}]}},{{}},[1]);")),
      "module factories to be functions"
    );
    assert_eq!(
      expectation(&format!("{PRELUDE}({{1:[function(){{}}]}},{{}},[1]);")),
      "module entries to be `[factory, dependencies]` arrays"
    );
  }

  #[test]
  fn syntax_errors_are_malformed_input() {
    let err = parse_bundle("(function(){").unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::MalformedInput));
  }
}
