use std::{io, path::Path};

use bunpack_error::UnpackError;
use bunpack_fs::FileSystem;

pub fn load_source<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> anyhow::Result<String> {
  if !fs.is_file(path) {
    return Err(UnpackError::InputNotFound { path: path.to_path_buf() }.into());
  }
  fs.read_to_string(path).map_err(|err| match err.kind() {
    io::ErrorKind::NotFound => UnpackError::InputNotFound { path: path.to_path_buf() }.into(),
    _ => anyhow::Error::new(err).context(format!("failed to read {}", path.display())),
  })
}
