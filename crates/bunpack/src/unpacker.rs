use std::sync::Arc;

use bunpack_common::{NormalizedUnpackOptions, UnpackOptions};
use bunpack_error::{BuildResult, UnpackError};
use bunpack_fs::{FileSystem, OsFileSystem};
use bunpack_resolver::{Resolver, SearchPaths};
use bunpack_sourcemap::{
  inline_comment, project_module_map, FileMappingsTable, InputSourceMap, LineIndex,
  ModuleMapContext, SourceSlice,
};

use crate::{
  stages::{generate::GenerateStage, link::LinkStage, scan::ScanStage},
  types::{
    extracted_module::{ExtractTarget, ExtractedModule},
    unpack_output::UnpackOutput,
    SharedOptions, SharedResolver,
  },
  utils::{load_source::load_source, normalize_options::normalize_options},
};

pub struct Unpacker<F: FileSystem + Clone = OsFileSystem> {
  pub(crate) fs: F,
  pub(crate) options: SharedOptions,
  pub(crate) resolver: SharedResolver<F>,
}

impl Unpacker {
  pub fn new(options: UnpackOptions) -> Self {
    Self::with_fs(options, OsFileSystem)
  }
}

impl<F: FileSystem + Clone> Unpacker<F> {
  /// Reads, writes and module resolution all go through `fs`.
  pub fn with_fs(options: UnpackOptions, fs: F) -> Self {
    let options = normalize_options(options);
    let resolver: SharedResolver<F> = Resolver::new(options.platform, fs.clone()).into();
    Self { fs, options: Arc::new(options), resolver }
  }

  pub fn options(&self) -> &NormalizedUnpackOptions {
    &self.options
  }

  /// Reads the bundle named by the options and unpacks it.
  pub fn unpack(&self) -> BuildResult<UnpackOutput> {
    tracing::debug!("Reading file '{}'", self.options.file.display());
    let source = load_source(&self.fs, &self.options.file)?;
    self.unpack_source(&source)
  }

  /// Unpacks `source` as if it were the bundle named by the options. Nothing is written
  /// unless the bundle is recognized and its source map (when one is asked for) loads.
  pub fn unpack_source(&self, source: &str) -> BuildResult<UnpackOutput> {
    let scan_stage_output = ScanStage::new(source).scan()?;

    tracing::debug!("Reading source map...");
    let input_map = self.load_input_map(source)?;

    let link_stage_output =
      LinkStage::new(scan_stage_output, &self.options, &*self.resolver, source, input_map.as_ref())
        .link();

    let file_mappings = match &input_map {
      Some(input_map) => self.file_mappings(input_map),
      None => FileMappingsTable::default(),
    };

    tracing::debug!("Saving files...");
    let mut output = GenerateStage::new(
      &link_stage_output,
      &self.options,
      source,
      input_map.as_ref(),
      &file_mappings,
      &self.fs,
    )
    .generate()?;

    output.warnings.extend(link_stage_output.warnings);
    tracing::debug!("Done unpacking {} files", output.manifest.len());
    Ok(output)
  }

  /// Pulls the first entry module of `source` out on its own, with a map from its content
  /// back to `target`. Nothing is written and the input map is required.
  pub fn extract(&self, target: &ExtractTarget, source: &str) -> BuildResult<ExtractedModule> {
    tracing::debug!("Extracting content...");
    let scan_stage_output = ScanStage::new(source).scan()?;
    let module = scan_stage_output
      .module_table
      .modules
      .iter()
      .find(|module| module.is_entry)
      .ok_or(UnpackError::UnrecognizedBundleShape { expected: "an entry module in the module table" })?;

    tracing::debug!("Reading source map...");
    let input_map = InputSourceMap::load(source, &self.options.file, &self.fs)?
      .ok_or_else(|| UnpackError::SourceMapMissing { path: self.options.file.clone() })?;
    let file_mappings = self.file_mappings(&input_map);
    let file = file_mappings.get(&target.path);
    if file.is_none() {
      tracing::warn!("The source map has no mappings for {}", target.path.display());
    }

    tracing::debug!("Creating file content...");
    let fallback_content = match file.and_then(|file| file.original.as_deref()) {
      Some(_) => None,
      None => self.fs.read_to_string(&target.path).ok(),
    };
    let line_index = LineIndex::new(source);
    let ctx = ModuleMapContext {
      url: &target.url,
      src: &target.src,
      content_start: line_index.position(module.content_range.start as usize),
      content_end: line_index.position(module.content_range.end as usize),
      prologue_lines: 0,
      original_content: fallback_content.as_deref(),
    };
    let map = project_module_map(file, &input_map, &ctx);

    Ok(ExtractedModule {
      content: module.content(source).to_string(),
      map_comment: inline_comment(&map),
      content_range: module.content_range,
      dependencies: module.dependencies.clone(),
    })
  }

  /// Cuts `source` into the bundle text each original source of its input map covers.
  pub fn slice_by_source(&self, source: &str) -> BuildResult<Vec<SourceSlice>> {
    let input_map = InputSourceMap::load(source, &self.options.file, &self.fs)?
      .ok_or_else(|| UnpackError::SourceMapMissing { path: self.options.file.clone() })?;
    Ok(input_map.slice_by_source(source))
  }

  /// Groups the input map's mappings by the file each `sources` entry resolves to.
  fn file_mappings(&self, input_map: &InputSourceMap) -> FileMappingsTable {
    let search_paths = SearchPaths::new(
      self.options.source_dir.clone(),
      self.options.root_dir.clone(),
      self.options.node_dir.clone(),
    )
    .for_source_map();
    input_map.group_by_file(|map_source| self.resolver.find_path(map_source, &search_paths))
  }

  /// A missing or broken map only stops the run when per-module maps were asked for.
  fn load_input_map(&self, source: &str) -> BuildResult<Option<InputSourceMap>> {
    match InputSourceMap::load(source, &self.options.file, &self.fs) {
      Ok(Some(input_map)) => Ok(Some(input_map)),
      Ok(None) if self.options.sourcemap => {
        Err(UnpackError::SourceMapMissing { path: self.options.file.clone() }.into())
      }
      Ok(None) => Ok(None),
      Err(err) if self.options.sourcemap => Err(err.into()),
      Err(err) => {
        tracing::warn!("Ignoring the bundle's source map: {err}");
        Ok(None)
      }
    }
  }
}
