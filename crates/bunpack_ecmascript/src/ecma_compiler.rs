use arcstr::ArcStr;
use bunpack_error::{BuildResult, UnpackError};
use itertools::Itertools;
use oxc::{parser::Parser, span::SourceType};

use crate::ecma_ast::{
  program_cell::{ProgramCell, ProgramCellDependent, ProgramCellOwner},
  EcmaAst,
};

pub struct EcmaCompiler;

impl EcmaCompiler {
  /// Bundles are classic scripts, not ES modules.
  pub fn script_source_type() -> SourceType {
    SourceType::default().with_script(true)
  }

  pub fn parse(source: impl Into<ArcStr>, source_type: SourceType) -> BuildResult<EcmaAst> {
    let allocator = oxc::allocator::Allocator::default();
    let owner = ProgramCellOwner { source: source.into(), allocator };
    let program = ProgramCell::try_new(owner, |owner| {
      let ret = Parser::new(&owner.allocator, &owner.source, source_type).parse();
      if ret.errors.is_empty() && !ret.panicked {
        Ok(ProgramCellDependent { program: ret.program })
      } else {
        Err(UnpackError::InvalidSyntax {
          message: ret.errors.iter().map(ToString::to_string).join("; "),
        })
      }
    })?;

    Ok(EcmaAst { program, source_type })
  }
}

#[cfg(test)]
mod tests {
  use bunpack_error::ErrorKind;

  use super::*;

  #[test]
  fn parses_script() {
    let ast = EcmaCompiler::parse("var a = 1;", EcmaCompiler::script_source_type()).unwrap();
    assert_eq!(ast.program().body.len(), 1);
    assert_eq!(ast.source().as_str(), "var a = 1;");
  }

  #[test]
  fn reports_syntax_errors_as_malformed_input() {
    let err = EcmaCompiler::parse("var = ;", EcmaCompiler::script_source_type()).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::MalformedInput));
  }
}
