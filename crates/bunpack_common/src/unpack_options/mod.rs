pub mod normalized_unpack_options;
pub mod platform;

use std::path::PathBuf;

use crate::Platform;

#[derive(Default, Debug, Clone)]
pub struct UnpackOptions {
  // --- Input
  pub file: PathBuf,
  pub cwd: Option<PathBuf>,
  pub entry_file: Option<PathBuf>,
  pub directory: Option<PathBuf>,
  pub root: Option<PathBuf>,
  pub node_dir: Option<PathBuf>,
  pub platform: Option<Platform>,

  // --- Output
  pub name: Option<String>,
  pub output: Option<PathBuf>,
  pub loader_url: Option<String>,
  pub relativize_output_path: Option<PathBuf>,
  pub with_node_modules: Option<bool>,
  pub sourcemap: Option<bool>,
  pub manifest: Option<bool>,
  pub live_reload: Option<bool>,
}
