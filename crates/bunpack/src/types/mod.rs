pub mod extracted_module;
pub mod unpack_output;

use std::sync::Arc;

use bunpack_common::NormalizedUnpackOptions;
use bunpack_fs::OsFileSystem;
use bunpack_resolver::Resolver;

pub type SharedResolver<F = OsFileSystem> = Arc<Resolver<F>>;
pub type SharedOptions = Arc<NormalizedUnpackOptions>;
