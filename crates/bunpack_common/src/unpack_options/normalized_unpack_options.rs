use std::path::{Path, PathBuf};

use crate::Platform;

#[allow(clippy::struct_excessive_bools)] // Using raw booleans is more clear in this case
#[derive(Debug, Clone)]
pub struct NormalizedUnpackOptions {
  // --- Input
  /// Absolute path of the bundle.
  pub file: PathBuf,
  pub cwd: PathBuf,
  pub entry_file: Option<PathBuf>,
  pub source_dir: PathBuf,
  pub root_dir: PathBuf,
  pub node_dir: PathBuf,
  pub platform: Platform,

  // --- Output
  pub name: String,
  pub output: PathBuf,
  pub loader_url: String,
  pub relativize_output_path: Option<PathBuf>,
  pub with_node_modules: bool,
  pub sourcemap: bool,
  pub manifest: bool,
  pub live_reload: bool,
}

impl NormalizedUnpackOptions {
  pub fn file_name(&self) -> String {
    self.file.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default()
  }

  /// Where the entry module is assumed to live when no entry file is given.
  pub fn entry_file_hint(&self) -> PathBuf {
    self.entry_file.clone().unwrap_or_else(|| self.source_dir.join(self.file_name()))
  }

  /// Directory of the unpacked modules relative to `output`, with a trailing `/`.
  pub fn base_url(&self) -> String {
    format!("{}/browserify/", self.name)
  }

  pub fn manifest_url(&self) -> String {
    format!("{}/browserify.map.json", self.name)
  }

  pub fn resolve_output(&self, url: &str) -> PathBuf {
    self.output.join(Path::new(url))
  }
}
