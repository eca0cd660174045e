mod live_reload;
mod naming;

use std::path::Path;

use bunpack_common::{
  ModuleRecord, NormalizedUnpackOptions, OutputAsset, OutputAssetKind, OutputManifestEntry,
};
use bunpack_error::{BuildResult, UnpackError};
use bunpack_fs::FileSystem;
use bunpack_sourcemap::{
  inline_comment, project_module_map, FileMappingsTable, InputSourceMap, LineIndex,
  LoaderMapBuilder, ModuleMapContext,
};
use bunpack_utils::concat_string;
use sugar_path::SugarPath;

use crate::types::unpack_output::UnpackOutput;

use self::{
  live_reload::render_live_reload,
  naming::{module_output_path, WrapperNames},
};

use super::link::LinkStageOutput;

/// Lines the wrapper puts in front of a module's content.
const PROLOGUE_LINES: u32 = 1;

pub struct GenerateStage<'a, F: FileSystem + ?Sized> {
  link_output: &'a LinkStageOutput,
  options: &'a NormalizedUnpackOptions,
  source: &'a str,
  input_map: Option<&'a InputSourceMap>,
  file_mappings: &'a FileMappingsTable,
  fs: &'a F,
}

impl<'a, F: FileSystem + ?Sized> GenerateStage<'a, F> {
  pub fn new(
    link_output: &'a LinkStageOutput,
    options: &'a NormalizedUnpackOptions,
    source: &'a str,
    input_map: Option<&'a InputSourceMap>,
    file_mappings: &'a FileMappingsTable,
    fs: &'a F,
  ) -> Self {
    Self { link_output, options, source, input_map, file_mappings, fs }
  }

  /// Renders every file in memory first, then writes them in order.
  pub fn generate(&self) -> BuildResult<UnpackOutput> {
    let output = self.render()?;
    self.write_assets(&output.assets)?;
    Ok(output)
  }

  fn render(&self) -> BuildResult<UnpackOutput> {
    let module_table = &self.link_output.module_table;
    let line_index = LineIndex::new(self.source);
    let mut loader = LoaderMapBuilder::new(self.source);
    let mut names = WrapperNames::default();
    let base_url = self.options.base_url();

    let mut assets = vec![];
    let mut manifest = vec![];

    for idx in module_table.source_order() {
      let module = &module_table.modules[idx];
      let (Some(path), Some(src)) = (&module.resolved_path, &module.src) else {
        continue;
      };
      if module.is_external_dependency && !self.options.with_node_modules {
        tracing::debug!("Skipping {src}");
        continue;
      }

      let output_path = module_output_path(src, self.options.relativize_output_path.as_deref());
      let url = concat_string!(base_url, output_path);
      let name = names.assign(&output_path);
      let line = concat_string!("var ", name, " = function(require, module, exports){");

      let mut content = concat_string!(line, "\n", module.content(self.source), "\n}\n");
      if self.options.sourcemap {
        if let Some(comment) = self.render_module_map(module, path, src, &url, &line_index) {
          content.push_str(&comment);
        }
      }
      assets.push(OutputAsset { filename: url.clone(), content, kind: OutputAssetKind::Module });

      let mut call = concat_string!(name, "(require,module,exports);\n");
      if self.options.live_reload {
        call.push_str(&render_live_reload(&output_path, &self.dependency_events(module)));
      }
      let range = module.content_range.as_range();
      loader.replace(range.start, range.end, call);

      manifest.push(OutputManifestEntry {
        url,
        path: path.to_slash_lossy().into_owned(),
        src: src.clone(),
        name,
        externals: module.externals(),
        deps: module.dependencies.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
        line,
      });
    }

    loader.remove_source_map_comments();
    let loader_content = self.render_loader(&loader);
    assets.push(OutputAsset {
      filename: self.options.loader_url.clone(),
      content: loader_content.clone(),
      kind: OutputAssetKind::Loader,
    });

    if self.options.manifest {
      let content = serde_json::to_string(&manifest).map_err(anyhow::Error::from)?;
      assets.push(OutputAsset {
        filename: self.options.manifest_url(),
        content,
        kind: OutputAssetKind::Manifest,
      });
    }

    Ok(UnpackOutput { assets, manifest, loader_content, warnings: vec![] })
  }

  fn render_module_map(
    &self,
    module: &ModuleRecord,
    path: &Path,
    src: &str,
    url: &str,
    line_index: &LineIndex,
  ) -> Option<String> {
    let input_map = self.input_map?;
    let file = self.file_mappings.get(path);
    if file.is_none() && module.is_entry {
      tracing::warn!(
        "Cannot find source map data for the entry file {}, try providing an entry file option",
        path.display()
      );
    }

    let fallback_content = match file.and_then(|file| file.original.as_deref()) {
      Some(_) => None,
      None => self.fs.read_to_string(path).ok(),
    };
    let ctx = ModuleMapContext {
      url,
      src,
      content_start: line_index.position(module.content_range.start as usize),
      content_end: line_index.position(module.content_range.end as usize),
      prologue_lines: PROLOGUE_LINES,
      original_content: fallback_content.as_deref(),
    };
    Some(inline_comment(&project_module_map(file, input_map, &ctx)))
  }

  /// Output paths of the module's dependencies that are unpacked next to it.
  fn dependency_events(&self, module: &ModuleRecord) -> Vec<String> {
    let module_table = &self.link_output.module_table;
    module
      .dependencies
      .values()
      .filter_map(|id| module_table.get(id))
      .filter(|dependency| !dependency.is_external_dependency)
      .filter_map(|dependency| dependency.src.as_deref())
      .map(|src| module_output_path(src, self.options.relativize_output_path.as_deref()))
      .collect()
  }

  /// The loader without the bundle's own map comments, chained to the input map when
  /// there is one.
  fn render_loader(&self, loader: &LoaderMapBuilder) -> String {
    let mut content = loader.render();
    if let Some(input_map) = self.input_map {
      let map = loader.build_map(input_map, &concat_string!("/", self.options.loader_url));
      content.push('\n');
      content.push_str(&inline_comment(&map));
    }
    content
  }

  fn write_assets(&self, assets: &[OutputAsset]) -> BuildResult<()> {
    for asset in assets {
      let path = self.options.resolve_output(asset.filename());
      if let Some(dir) = path.parent() {
        self
          .fs
          .create_dir_all(dir)
          .map_err(|source| UnpackError::WriteFailure { path: dir.to_path_buf(), source })?;
      }
      tracing::debug!("Writing: '{}'", asset.filename());
      self
        .fs
        .write(&path, asset.content_as_bytes())
        .map_err(|source| UnpackError::WriteFailure { path: path.clone(), source })?;
    }
    Ok(())
  }
}
