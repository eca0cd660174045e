mod ast_ext;

pub use ast_ext::{
  expression_ext::ExpressionExt, property_key_ext::PropertyKeyExt, statement_ext::StatementExt,
};
