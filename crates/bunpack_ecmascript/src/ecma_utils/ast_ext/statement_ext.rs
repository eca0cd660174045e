use oxc::ast::ast;

pub trait StatementExt<'ast> {
  fn is_empty_statement(&self) -> bool;

  fn as_expression_statement(&self) -> Option<&ast::ExpressionStatement<'ast>>;

  /// The argument of a `return` statement, if this is one and it has an argument.
  fn as_return_argument(&self) -> Option<&ast::Expression<'ast>>;
}

impl<'ast> StatementExt<'ast> for ast::Statement<'ast> {
  fn is_empty_statement(&self) -> bool {
    matches!(self, ast::Statement::EmptyStatement(_))
  }

  fn as_expression_statement(&self) -> Option<&ast::ExpressionStatement<'ast>> {
    if let ast::Statement::ExpressionStatement(stmt) = self {
      return Some(&**stmt);
    }
    None
  }

  fn as_return_argument(&self) -> Option<&ast::Expression<'ast>> {
    if let ast::Statement::ReturnStatement(stmt) = self {
      return stmt.argument.as_ref();
    }
    None
  }
}
