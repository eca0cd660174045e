use std::path::PathBuf;

/// Broad classification used by callers to tell the fatal failures apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  NotFound,
  MalformedInput,
  SourceMap,
  Write,
  Unresolved,
}

#[derive(Debug, thiserror::Error)]
pub enum UnpackError {
  #[error("no such file: {}", path.display())]
  InputNotFound { path: PathBuf },

  #[error("failed to parse bundle: {message}")]
  InvalidSyntax { message: String },

  #[error("unrecognized bundle shape: expected {expected}")]
  UnrecognizedBundleShape { expected: &'static str },

  #[error("could not find a source map for {}", path.display())]
  SourceMapMissing { path: PathBuf },

  #[error("invalid source map: {reason}")]
  SourceMapInvalid { reason: String },

  #[error("failed to write {}: {source}", path.display())]
  WriteFailure {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("could not resolve {specifier:?} required by {importer}")]
  UnresolvedDependency { specifier: String, importer: String },

  #[error("module {id:?} required by {importer} is not in the module table")]
  MissingModule { id: String, importer: String },
}

impl UnpackError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::InputNotFound { .. } => ErrorKind::NotFound,
      Self::InvalidSyntax { .. } | Self::UnrecognizedBundleShape { .. } => {
        ErrorKind::MalformedInput
      }
      Self::SourceMapMissing { .. } | Self::SourceMapInvalid { .. } => ErrorKind::SourceMap,
      Self::WriteFailure { .. } => ErrorKind::Write,
      Self::UnresolvedDependency { .. } | Self::MissingModule { .. } => ErrorKind::Unresolved,
    }
  }
}

#[test]
fn test_kind() {
  let err = UnpackError::UnrecognizedBundleShape { expected: "a call expression" };
  assert_eq!(err.kind(), ErrorKind::MalformedInput);
  assert_eq!(err.to_string(), "unrecognized bundle shape: expected a call expression");

  let err = UnpackError::UnresolvedDependency { specifier: "./a".into(), importer: "1".into() };
  assert_eq!(err.kind(), ErrorKind::Unresolved);
}
