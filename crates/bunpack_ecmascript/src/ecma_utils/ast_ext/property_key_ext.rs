use std::borrow::Cow;

use oxc::ast::ast;

use super::expression_ext::ExpressionExt;

pub trait PropertyKeyExt<'ast> {
  /// The key of a non-computed property: identifier name, string or number.
  fn static_key(&self) -> Option<Cow<'_, str>>;
}

impl<'ast> PropertyKeyExt<'ast> for ast::PropertyKey<'ast> {
  fn static_key(&self) -> Option<Cow<'_, str>> {
    match self {
      ast::PropertyKey::StaticIdentifier(ident) => Some(Cow::Borrowed(ident.name.as_str())),
      ast::PropertyKey::PrivateIdentifier(_) => None,
      key => key.as_expression().and_then(|expr| expr.as_literal_key()),
    }
  }
}
