use oxc_index::IndexVec;
use rustc_hash::FxHashMap;

use crate::{ModuleId, ModuleIdx, ModuleRecord};

pub type IndexModules = IndexVec<ModuleIdx, ModuleRecord>;

/// All modules of one bundle, addressable by dense index or by bundle-local id.
#[derive(Debug, Default)]
pub struct ModuleTable {
  pub modules: IndexModules,
  id_to_idx: FxHashMap<ModuleId, ModuleIdx>,
}

impl ModuleTable {
  /// Adds a record. A repeated id replaces the earlier record, like a repeated key in an
  /// object literal does.
  pub fn insert(&mut self, mut record: ModuleRecord) -> ModuleIdx {
    if let Some(&idx) = self.id_to_idx.get(&record.id) {
      record.idx = idx;
      self.modules[idx] = record;
      return idx;
    }
    let idx = self.modules.next_idx();
    record.idx = idx;
    self.id_to_idx.insert(record.id.clone(), idx);
    self.modules.push(record)
  }

  pub fn idx_of(&self, id: &ModuleId) -> Option<ModuleIdx> {
    self.id_to_idx.get(id).copied()
  }

  pub fn get(&self, id: &ModuleId) -> Option<&ModuleRecord> {
    self.idx_of(id).map(|idx| &self.modules[idx])
  }

  pub fn len(&self) -> usize {
    self.modules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.modules.is_empty()
  }

  /// Module indices ordered by where their factory body starts in the bundle.
  pub fn source_order(&self) -> Vec<ModuleIdx> {
    let mut order = self.modules.indices().collect::<Vec<_>>();
    order.sort_by_key(|&idx| (self.modules[idx].content_range, idx));
    order
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ContentRange;

  fn record(id: &str, start: u32, end: u32) -> ModuleRecord {
    ModuleRecord::new(id.into(), ContentRange::new(start, end))
  }

  #[test]
  fn lookup_by_id() {
    let mut table = ModuleTable::default();
    let a = table.insert(record("1", 10, 20));
    let b = table.insert(record("2", 0, 5));

    assert_eq!(table.idx_of(&"1".into()), Some(a));
    assert_eq!(table.get(&"2".into()).map(|m| m.idx), Some(b));
    assert_eq!(table.idx_of(&"3".into()), None);
    assert_eq!(table.source_order(), vec![b, a]);
  }

  #[test]
  fn repeated_id_replaces_record() {
    let mut table = ModuleTable::default();
    let first = table.insert(record("1", 0, 5));
    let second = table.insert(record("1", 10, 20));

    assert_eq!(first, second);
    assert_eq!(table.len(), 1);
    assert_eq!(table.modules[first].content_range, ContentRange::new(10, 20));
  }
}
