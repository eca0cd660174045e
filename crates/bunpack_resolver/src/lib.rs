// A wrapper around the `oxc_resolver` crate that looks a specifier up in an ordered list of
// directories, the way Node's `Module._findPath` does.

mod resolver;
mod search_paths;

pub use crate::{
  resolver::Resolver,
  search_paths::{node_module_paths, SearchPaths},
};

pub use oxc_resolver::ResolveError;
