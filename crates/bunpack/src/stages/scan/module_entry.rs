use arcstr::ArcStr;
use bunpack_common::{ContentRange, ModuleId, ModuleRecord};
use bunpack_ecmascript::{ExpressionExt, PropertyKeyExt};
use bunpack_error::UnpackError;
use oxc::{ast::ast, span::GetSpan};

/// Synthetic key some bundler versions add to every dependency map.
const RESERVED_DEPENDENCY_KEY: &str = "oMfpAn";

fn expected(expected: &'static str) -> UnpackError {
  UnpackError::UnrecognizedBundleShape { expected }
}

/// Reads one `id: [factory, dependencies]` property of the module table.
pub fn parse_module_entry(property: &ast::ObjectPropertyKind) -> Result<ModuleRecord, UnpackError> {
  let ast::ObjectPropertyKind::ObjectProperty(property) = property else {
    return Err(expected("module table entries to be `id: [factory, dependencies]` properties"));
  };
  let id = property
    .key
    .static_key()
    .ok_or_else(|| expected("module ids to be number, string or identifier keys"))?;

  let [factory, dependencies] = property
    .value
    .as_array_expression()
    .map(|pair| pair.elements.as_slice())
    .unwrap_or_default()
  else {
    return Err(expected("module entries to be `[factory, dependencies]` arrays"));
  };

  let content_range = factory
    .as_expression()
    .and_then(factory_content_range)
    .ok_or_else(|| expected("module factories to be functions"))?;
  let dependencies = dependencies
    .as_expression()
    .and_then(|expr| expr.as_object_expression())
    .ok_or_else(|| expected("dependency maps to be object literals"))?;

  let mut record = ModuleRecord::new(ModuleId::new(&*id), content_range);
  for property in &dependencies.properties {
    let ast::ObjectPropertyKind::ObjectProperty(property) = property else {
      continue;
    };
    let Some(specifier) = property.key.static_key() else {
      continue;
    };
    if specifier == RESERVED_DEPENDENCY_KEY {
      continue;
    }
    match property.value.as_literal_key() {
      Some(target) => {
        record.dependencies.insert(ArcStr::from(&*specifier), ModuleId::new(&*target));
      }
      None => {
        tracing::debug!("Skipping dependency {specifier:?} of module {id}: its target is not a module id");
      }
    }
  }

  Ok(record)
}

/// The span from the first to the last statement of the factory body, directives included.
/// An empty body yields an empty range just inside its opening brace.
fn factory_content_range(factory: &ast::Expression) -> Option<ContentRange> {
  let body = match factory.without_parens() {
    ast::Expression::FunctionExpression(func) => func.body.as_deref(),
    ast::Expression::ArrowFunctionExpression(arrow) => Some(&*arrow.body),
    _ => return None,
  };
  let Some(body) = body else {
    return Some(ContentRange::default());
  };

  let first = body
    .directives
    .first()
    .map(|directive| directive.span.start)
    .or_else(|| body.statements.first().map(|stmt| stmt.span().start));
  let last = body
    .statements
    .last()
    .map(|stmt| stmt.span().end)
    .or_else(|| body.directives.last().map(|directive| directive.span.end));

  Some(match (first, last) {
    (Some(start), Some(end)) => ContentRange::new(start, end),
    _ => ContentRange::empty_at(body.span.start + 1),
  })
}
