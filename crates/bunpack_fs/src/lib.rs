//! File-system access behind a trait so callers can redirect reads, writes and module
//! resolution.

mod file_system;
#[cfg(feature = "os")]
mod os;

pub use crate::file_system::FileSystem;
#[cfg(feature = "os")]
pub use os::OsFileSystem;
pub use oxc_resolver::{FileMetadata, FileSystem as OxcResolverFileSystem};
