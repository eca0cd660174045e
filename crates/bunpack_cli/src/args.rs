use std::path::PathBuf;

use clap::Args;

use crate::types::platform::Platform;

#[derive(Args)]
pub struct InputArgs {
  /// The bundle to unpack
  #[clap(long, short)]
  pub file: PathBuf,

  #[clap(long)]
  pub cwd: Option<PathBuf>,

  /// The bundle's entry file, defaults to the bundle's file name inside the source directory
  #[clap(long)]
  pub entry: Option<PathBuf>,

  /// Where the bundled sources lived, defaults to the bundle's directory
  #[clap(long)]
  pub directory: Option<PathBuf>,

  /// Project root, defaults to the current directory
  #[clap(long)]
  pub root: Option<PathBuf>,

  #[clap(long)]
  pub node_dir: Option<PathBuf>,

  #[clap(long, short)]
  pub platform: Option<Platform>,
}

#[derive(Args)]
pub struct OutputArgs {
  /// Base output directory, defaults to the bundle's directory
  #[clap(long, short = 'd')]
  pub output: Option<PathBuf>,

  /// Name of the directory the modules are unpacked into, defaults to `_<file>_`
  #[clap(long, short)]
  pub name: Option<String>,

  #[clap(long)]
  pub loader_url: Option<String>,

  /// Make absolute module paths relative to this directory before writing them
  #[clap(long)]
  pub relativize_output_path: Option<PathBuf>,

  /// Also unpack modules that resolve into `node_modules`
  #[clap(long)]
  pub with_node_modules: bool,

  /// Add an inline source map to every unpacked file
  #[clap(long)]
  pub sourcemap: bool,

  /// Write `browserify.map.json` next to the unpacked files
  #[clap(long, short)]
  pub manifest: bool,

  /// Wrap exported constructors so window events can notify them of changes
  #[clap(long)]
  pub live_reload: bool,
}
