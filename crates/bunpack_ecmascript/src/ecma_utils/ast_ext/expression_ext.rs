use std::borrow::Cow;

use oxc::ast::ast;

use super::number_to_key;

pub trait ExpressionExt<'ast> {
  /// Strips any number of wrapping parentheses.
  fn without_parens(&self) -> &ast::Expression<'ast>;

  fn as_call_expression(&self) -> Option<&ast::CallExpression<'ast>>;
  fn as_object_expression(&self) -> Option<&ast::ObjectExpression<'ast>>;
  fn as_array_expression(&self) -> Option<&ast::ArrayExpression<'ast>>;

  /// Body of a function expression or an arrow function.
  fn as_function_body(&self) -> Option<&ast::FunctionBody<'ast>>;

  /// String or numeric literal as a module key.
  fn as_literal_key(&self) -> Option<Cow<'_, str>>;
}

impl<'ast> ExpressionExt<'ast> for ast::Expression<'ast> {
  fn without_parens(&self) -> &ast::Expression<'ast> {
    let mut expr = self;
    while let ast::Expression::ParenthesizedExpression(paren) = expr {
      expr = &paren.expression;
    }
    expr
  }

  fn as_call_expression(&self) -> Option<&ast::CallExpression<'ast>> {
    let ast::Expression::CallExpression(expr) = self.without_parens() else {
      return None;
    };
    Some(expr)
  }

  fn as_object_expression(&self) -> Option<&ast::ObjectExpression<'ast>> {
    let ast::Expression::ObjectExpression(expr) = self.without_parens() else {
      return None;
    };
    Some(expr)
  }

  fn as_array_expression(&self) -> Option<&ast::ArrayExpression<'ast>> {
    let ast::Expression::ArrayExpression(expr) = self.without_parens() else {
      return None;
    };
    Some(expr)
  }

  fn as_function_body(&self) -> Option<&ast::FunctionBody<'ast>> {
    match self.without_parens() {
      ast::Expression::FunctionExpression(func) => func.body.as_deref(),
      ast::Expression::ArrowFunctionExpression(arrow) => Some(&*arrow.body),
      _ => None,
    }
  }

  fn as_literal_key(&self) -> Option<Cow<'_, str>> {
    match self.without_parens() {
      ast::Expression::StringLiteral(lit) => Some(Cow::Borrowed(lit.value.as_str())),
      ast::Expression::NumericLiteral(lit) => Some(Cow::Owned(number_to_key(lit.value))),
      _ => None,
    }
  }
}
