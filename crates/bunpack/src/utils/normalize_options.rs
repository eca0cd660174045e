use std::path::{Path, PathBuf};

use bunpack_common::{NormalizedUnpackOptions, UnpackOptions};
use sugar_path::SugarPath;

pub fn normalize_options(raw_options: UnpackOptions) -> NormalizedUnpackOptions {
  let cwd = raw_options
    .cwd
    .map_or_else(|| std::env::current_dir().unwrap_or_default(), |cwd| cwd.absolutize());
  let cwd = canonicalize(cwd);

  let file = canonicalize(absolute(&cwd, &raw_options.file));
  let file_dir = file.parent().map(Path::to_path_buf).unwrap_or_else(|| cwd.clone());
  let file_name = file.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default();

  let name = raw_options.name.unwrap_or_else(|| format!("_{file_name}_"));
  let loader_url = raw_options.loader_url.unwrap_or_else(|| format!("{name}/loader.js"));

  NormalizedUnpackOptions {
    entry_file: raw_options.entry_file.map(|entry| canonicalize(absolute(&cwd, &entry))),
    source_dir: raw_options
      .directory
      .map_or_else(|| file_dir.clone(), |dir| canonicalize(absolute(&cwd, &dir))),
    root_dir: raw_options.root.map_or_else(|| cwd.clone(), |root| canonicalize(absolute(&cwd, &root))),
    node_dir: raw_options
      .node_dir
      .map_or_else(|| cwd.join("node_modules"), |node_dir| canonicalize(absolute(&cwd, &node_dir))),
    platform: raw_options.platform.unwrap_or_default(),
    output: raw_options.output.map_or(file_dir, |output| absolute(&cwd, &output)),
    relativize_output_path: raw_options
      .relativize_output_path
      .map(|anchor| canonicalize(absolute(&cwd, &anchor))),
    with_node_modules: raw_options.with_node_modules.unwrap_or(false),
    sourcemap: raw_options.sourcemap.unwrap_or(false),
    manifest: raw_options.manifest.unwrap_or(false),
    live_reload: raw_options.live_reload.unwrap_or(false),
    name,
    loader_url,
    file,
    cwd,
  }
}

fn absolute(cwd: &Path, path: &Path) -> PathBuf {
  if path.is_absolute() {
    path.normalize()
  } else {
    cwd.join(path).normalize()
  }
}

/// Resolved paths come back from the resolver with symlinks followed, so everything they
/// are compared against is canonicalized too when it exists.
fn canonicalize(path: PathBuf) -> PathBuf {
  dunce::canonicalize(&path).unwrap_or(path)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_follow_the_bundle() {
    let dir = tempfile::tempdir().unwrap();
    let cwd = dunce::canonicalize(dir.path()).unwrap();
    std::fs::create_dir_all(cwd.join("dist")).unwrap();
    std::fs::write(cwd.join("dist/app.js"), "").unwrap();

    let options = normalize_options(UnpackOptions {
      file: "dist/app.js".into(),
      cwd: Some(cwd.clone()),
      ..Default::default()
    });

    assert_eq!(options.file, cwd.join("dist/app.js"));
    assert_eq!(options.source_dir, cwd.join("dist"));
    assert_eq!(options.output, cwd.join("dist"));
    assert_eq!(options.root_dir, cwd);
    assert_eq!(options.node_dir, cwd.join("node_modules"));
    assert_eq!(options.name, "_app.js_");
    assert_eq!(options.loader_url, "_app.js_/loader.js");
    assert_eq!(options.entry_file_hint(), cwd.join("dist/app.js"));
    assert!(!options.sourcemap && !options.manifest && !options.live_reload);
  }

  #[test]
  fn explicit_values_win() {
    let dir = tempfile::tempdir().unwrap();
    let cwd = dunce::canonicalize(dir.path()).unwrap();

    let options = normalize_options(UnpackOptions {
      file: cwd.join("app.js"),
      cwd: Some(cwd.clone()),
      name: Some("out".to_string()),
      output: Some("build".into()),
      directory: Some("src".into()),
      entry_file: Some("src/main.js".into()),
      loader_url: Some("boot.js".to_string()),
      manifest: Some(true),
      ..Default::default()
    });

    assert_eq!(options.output, cwd.join("build"));
    assert_eq!(options.source_dir, cwd.join("src"));
    assert_eq!(options.entry_file_hint(), cwd.join("src/main.js"));
    assert_eq!(options.loader_url, "boot.js");
    assert_eq!(options.base_url(), "out/browserify/");
    assert!(options.manifest);
  }
}
