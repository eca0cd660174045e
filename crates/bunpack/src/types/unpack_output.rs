use bunpack_common::{OutputAsset, OutputManifestEntry};

#[derive(Debug, Default)]
pub struct UnpackOutput {
  /// Everything that was written, in write order: module files, the loader, the manifest.
  pub assets: Vec<OutputAsset>,
  /// One row per unpacked module, filled whether or not the manifest file is written.
  pub manifest: Vec<OutputManifestEntry>,
  pub loader_content: String,
  /// Gaps that did not stop the run, such as dependencies that could not be resolved.
  pub warnings: Vec<anyhow::Error>,
}
