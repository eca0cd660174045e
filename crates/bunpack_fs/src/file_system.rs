use std::{io, path::Path};

use oxc_resolver::FileSystem as OxcResolverFileSystem;

/// File-system primitives the unpacker needs. Reads come from the resolver's trait so that
/// module resolution and loading see the same files. Writes are expected to overwrite.
pub trait FileSystem: OxcResolverFileSystem {
  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()>;

  fn create_dir_all(&self, path: &Path) -> io::Result<()>;

  fn is_file(&self, path: &Path) -> bool;
}
