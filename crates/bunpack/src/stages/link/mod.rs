use std::path::{Path, PathBuf};

use arcstr::ArcStr;
use bunpack_common::{ModuleIdx, ModuleTable, NormalizedUnpackOptions};
use bunpack_error::UnpackError;
use bunpack_fs::FileSystem;
use bunpack_resolver::{Resolver, SearchPaths};
use bunpack_sourcemap::{InputSourceMap, LineIndex};
use bunpack_utils::path_ext::PathExt;
use rustc_hash::FxHashSet;
use sugar_path::SugarPath;

use super::scan::ScanStageOutput;

#[derive(Debug)]
pub struct LinkStageOutput {
  pub module_table: ModuleTable,
  pub entries: Vec<ModuleIdx>,
  pub warnings: Vec<anyhow::Error>,
}

/// A `require` edge whose specifier could not be found from its importer.
#[derive(Debug)]
struct FailedEdge {
  specifier: ArcStr,
  importer: ModuleIdx,
  target: ModuleIdx,
}

#[derive(Debug)]
pub struct LinkStage<'a, F: FileSystem> {
  pub module_table: ModuleTable,
  pub entries: Vec<ModuleIdx>,
  pub warnings: Vec<anyhow::Error>,
  options: &'a NormalizedUnpackOptions,
  resolver: &'a Resolver<F>,
  search_paths: SearchPaths,
  source: &'a str,
  input_map: Option<&'a InputSourceMap>,
  assigned_paths: FxHashSet<PathBuf>,
  failed_edges: Vec<FailedEdge>,
}

impl<'a, F: FileSystem> LinkStage<'a, F> {
  pub fn new(
    scan_stage_output: ScanStageOutput,
    options: &'a NormalizedUnpackOptions,
    resolver: &'a Resolver<F>,
    source: &'a str,
    input_map: Option<&'a InputSourceMap>,
  ) -> Self {
    Self {
      module_table: scan_stage_output.module_table,
      entries: scan_stage_output.entries,
      warnings: scan_stage_output.warnings,
      options,
      resolver,
      search_paths: SearchPaths::new(
        options.source_dir.clone(),
        options.root_dir.clone(),
        options.node_dir.clone(),
      ),
      source,
      input_map,
      assigned_paths: FxHashSet::default(),
      failed_edges: vec![],
    }
  }

  pub fn link(mut self) -> LinkStageOutput {
    if let Some(&main) = self.entries.first() {
      let entry_path = self.options.entry_file_hint();
      tracing::debug!("Entry module {} is {}", self.module_table.modules[main].id, entry_path.display());
      if self.assign_path(main, entry_path) {
        self.walk(main);
      }
    }

    self.resolve_from_source_map();
    self.report_unresolved();

    LinkStageOutput { module_table: self.module_table, entries: self.entries, warnings: self.warnings }
  }

  /// Sets the path of a module that does not have one yet. Returns `false` when the module
  /// already had a path or another module already owns `path`.
  fn assign_path(&mut self, idx: ModuleIdx, path: PathBuf) -> bool {
    let module = &mut self.module_table.modules[idx];
    if module.is_resolved() || self.assigned_paths.contains(&path) {
      return false;
    }

    let (src, is_external_dependency) = classify(&path, &self.options.source_dir);
    module.src = Some(src);
    module.is_external_dependency = is_external_dependency;
    module.resolved_path = Some(path.clone());
    self.assigned_paths.insert(path);
    true
  }

  /// Depth-first walk over `require` edges from an already resolved module. A module gets
  /// its path from the first edge that resolves and is never revisited.
  fn walk(&mut self, start: ModuleIdx) {
    let mut stack = vec![start];

    while let Some(importer) = stack.pop() {
      let module = &self.module_table.modules[importer];
      let Some(importer_dir) = module.resolved_path.as_deref().and_then(Path::parent) else {
        continue;
      };
      let search_paths = self.search_paths.for_dependency(importer_dir);
      let dependencies =
        module.dependencies.iter().map(|(k, v)| (k.clone(), v.clone())).collect::<Vec<_>>();

      let mut discovered = vec![];
      for (specifier, target_id) in dependencies {
        let Some(target) = self.module_table.idx_of(&target_id) else {
          let importer = self.describe(importer);
          tracing::debug!("Module {target_id} required by {importer} is not in the module table");
          self.warnings.push(UnpackError::MissingModule { id: target_id.to_string(), importer }.into());
          continue;
        };
        if self.module_table.modules[target].is_resolved() {
          continue;
        }

        match self.resolver.find_path(&specifier, &search_paths) {
          Some(path) if self.assign_path(target, path.clone()) => discovered.push(target),
          Some(path) => {
            tracing::debug!(
              "{specifier:?} resolves to {}, which already belongs to another module",
              path.display()
            );
            self.failed_edges.push(FailedEdge { specifier, importer, target });
          }
          None => self.failed_edges.push(FailedEdge { specifier, importer, target }),
        }
      }

      // Reversed so the first dependency is walked first.
      stack.extend(discovered.into_iter().rev());
    }
  }

  /// Modules no edge could place are looked up through the input source map: the original
  /// source of the first mapping inside the module's content names its file.
  fn resolve_from_source_map(&mut self) {
    let Some(input_map) = self.input_map else {
      return;
    };
    let index = LineIndex::new(self.source);
    let search_paths = self.search_paths.for_source_map();

    for idx in self.module_table.source_order() {
      let module = &self.module_table.modules[idx];
      if module.is_resolved() {
        continue;
      }
      let start = index.position(module.content_range.start as usize);
      let end = index.position(module.content_range.end as usize);
      let Some(source) =
        input_map.first_source_within((start.line, start.column), (end.line, end.column))
      else {
        continue;
      };
      let Some(path) = self.resolver.find_path(&source, &search_paths) else {
        continue;
      };

      tracing::debug!("Module {} resolved from source map to {}", module.id, path.display());
      if self.assign_path(idx, path) {
        self.walk(idx);
      }
    }
  }

  /// One warning per failed `require` edge whose target never got a path.
  fn report_unresolved(&mut self) {
    let mut reported = FxHashSet::default();
    let mut failed_targets = FxHashSet::default();
    for edge in std::mem::take(&mut self.failed_edges) {
      if self.module_table.modules[edge.target].is_resolved() {
        continue;
      }
      failed_targets.insert(edge.target);
      if !reported.insert((edge.specifier.clone(), edge.importer)) {
        continue;
      }
      let importer = self.describe(edge.importer);
      tracing::debug!("Could not resolve {:?} required by {importer}", edge.specifier.as_str());
      self
        .warnings
        .push(UnpackError::UnresolvedDependency { specifier: edge.specifier.to_string(), importer }.into());
    }

    for module in self.module_table.modules.iter().filter(|module| !module.is_resolved()) {
      if !failed_targets.contains(&module.idx) {
        tracing::debug!("Module {} is not required by any resolved module", module.id);
      }
    }
  }

  fn describe(&self, idx: ModuleIdx) -> String {
    let module = &self.module_table.modules[idx];
    match &module.resolved_path {
      Some(path) => path.to_slash_lossy().into_owned(),
      None => format!("module {}", module.id),
    }
  }
}

/// The `src` label of a resolved path and whether it lives under `node_modules`.
fn classify(path: &Path, source_dir: &Path) -> (String, bool) {
  if let Some(suffix) = path.suffix_from_component("node_modules") {
    return (suffix.to_slash_lossy().into_owned(), true);
  }
  match path.strip_prefix(source_dir) {
    Ok(relative) => (relative.to_slash_lossy().into_owned(), false),
    Err(_) => (path.to_slash_lossy().into_owned(), false),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn classifies_paths() {
    let source_dir = Path::new("/project/src");
    assert_eq!(
      classify(Path::new("/project/src/lib/a.js"), source_dir),
      ("lib/a.js".to_string(), false)
    );
    assert_eq!(
      classify(Path::new("/project/node_modules/pkg/index.js"), source_dir),
      ("node_modules/pkg/index.js".to_string(), true)
    );
    assert_eq!(
      classify(Path::new("/project/src/node_modules/x.js"), source_dir),
      ("node_modules/x.js".to_string(), true)
    );
    assert_eq!(
      classify(Path::new("/elsewhere/b.js"), source_dir),
      ("/elsewhere/b.js".to_string(), false)
    );
  }
}
