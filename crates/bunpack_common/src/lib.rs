mod module;
mod types;
mod unpack_options;

pub use crate::{
  module::ModuleRecord,
  types::{
    content_range::ContentRange,
    manifest_entry::OutputManifestEntry,
    module_id::ModuleId,
    module_table::{IndexModules, ModuleTable},
    output_asset::{OutputAsset, OutputAssetKind},
    raw_idx::ModuleIdx,
  },
  unpack_options::{
    normalized_unpack_options::NormalizedUnpackOptions, platform::Platform, UnpackOptions,
  },
};
