mod unpack_error;

use std::ops::{Deref, DerefMut};

pub use crate::unpack_error::{ErrorKind, UnpackError};

#[derive(Debug)]
pub struct BuildError(pub Vec<anyhow::Error>);

impl BuildError {
  /// The classification of the first error that carries one.
  pub fn kind(&self) -> Option<ErrorKind> {
    self.0.iter().find_map(|err| err.downcast_ref::<UnpackError>()).map(UnpackError::kind)
  }
}

impl Deref for BuildError {
  type Target = Vec<anyhow::Error>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for BuildError {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl From<anyhow::Error> for BuildError {
  fn from(error: anyhow::Error) -> Self {
    Self(vec![error])
  }
}

impl From<Vec<anyhow::Error>> for BuildError {
  fn from(errors: Vec<anyhow::Error>) -> Self {
    Self(errors)
  }
}

impl From<UnpackError> for BuildError {
  fn from(error: UnpackError) -> Self {
    Self(vec![error.into()])
  }
}

pub type BuildResult<T> = anyhow::Result<T, BuildError>;

#[test]
fn test_build_error_kind() {
  let err = BuildError::from(vec![
    anyhow::anyhow!("unclassified"),
    UnpackError::InputNotFound { path: "bundle.js".into() }.into(),
  ]);
  assert_eq!(err.kind(), Some(ErrorKind::NotFound));
  assert_eq!(BuildError::from(anyhow::anyhow!("plain")).kind(), None);
}
