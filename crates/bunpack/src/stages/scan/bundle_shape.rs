use bunpack_ecmascript::{ExpressionExt, StatementExt};
use bunpack_error::UnpackError;
use oxc::ast::ast;

/// The two arguments of the bundle call that carry data. The cache placeholder in between
/// is only checked for its kind.
pub struct BundleArguments<'a, 'ast> {
  pub modules: &'a ast::ObjectExpression<'ast>,
  pub entries: &'a ast::ArrayExpression<'ast>,
}

fn expected(expected: &'static str) -> UnpackError {
  UnpackError::UnrecognizedBundleShape { expected }
}

/// Accepts `prelude(modules, cache, entries)`, optionally behind a unary operator or an
/// assignment, and the standalone form where the only argument is a function returning
/// `prelude(modules, cache, entries)(entry)`.
pub fn match_bundle_shape<'a, 'ast>(
  program: &'a ast::Program<'ast>,
) -> Result<BundleArguments<'a, 'ast>, UnpackError> {
  let mut statements = program.body.iter().filter(|stmt| !stmt.is_empty_statement());
  let (Some(statement), None) = (statements.next(), statements.next()) else {
    return Err(expected("a single top-level statement"));
  };
  if !program.directives.is_empty() {
    return Err(expected("a single top-level statement"));
  }

  let expression = statement
    .as_expression_statement()
    .ok_or_else(|| expected("the top-level statement to be an expression"))?
    .expression
    .without_parens();

  let invoked = match expression {
    ast::Expression::UnaryExpression(unary) => &unary.argument,
    ast::Expression::AssignmentExpression(assignment) => &assignment.right,
    expr => expr,
  };
  let call = invoked.as_call_expression().ok_or_else(|| expected("a call expression"))?;

  let mut arguments: &[ast::Argument<'ast>] = &call.arguments;
  if let [only] = arguments {
    if let Some(inner) = standalone_arguments(only) {
      arguments = inner;
    }
  }

  let [modules, cache, entries] = arguments else {
    return Err(expected("a call with three arguments"));
  };

  let modules = modules
    .as_expression()
    .and_then(|expr| expr.as_object_expression())
    .ok_or_else(|| expected("an object literal module table as the first argument"))?;
  cache
    .as_expression()
    .and_then(|expr| expr.as_object_expression())
    .ok_or_else(|| expected("an object literal cache as the second argument"))?;
  let entries = entries
    .as_expression()
    .and_then(|expr| expr.as_array_expression())
    .ok_or_else(|| expected("an array literal of entry ids as the third argument"))?;

  Ok(BundleArguments { modules, entries })
}

fn standalone_arguments<'a, 'ast>(
  argument: &'a ast::Argument<'ast>,
) -> Option<&'a [ast::Argument<'ast>]> {
  let body = argument.as_expression()?.as_function_body()?;
  let returned = body.statements.get(1)?.as_return_argument()?;
  let inner = returned.as_call_expression()?.callee.as_call_expression()?;
  Some(&inner.arguments)
}
