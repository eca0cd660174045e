mod stages;
mod types;
mod unpacker;
mod utils;

pub use crate::{
  stages::scan::{parse_bundle, ScanStageOutput},
  types::{
    extracted_module::{ExtractTarget, ExtractedModule},
    unpack_output::UnpackOutput,
  },
  unpacker::Unpacker,
};
pub use bunpack_common::*;
pub use bunpack_error::{BuildError, BuildResult, ErrorKind, UnpackError};
pub use bunpack_sourcemap::SourceSlice;
