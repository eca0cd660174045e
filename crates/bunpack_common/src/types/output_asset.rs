#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputAssetKind {
  Module,
  Loader,
  Manifest,
}

#[derive(Debug, Clone)]
pub struct OutputAsset {
  /// Path relative to the output directory, `/` separated.
  pub filename: String,
  pub content: String,
  pub kind: OutputAssetKind,
}

impl OutputAsset {
  pub fn filename(&self) -> &str {
    &self.filename
  }

  pub fn content_as_bytes(&self) -> &[u8] {
    self.content.as_bytes()
  }
}
