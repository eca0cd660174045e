pub mod content_range;
pub mod manifest_entry;
pub mod module_id;
pub mod module_table;
pub mod output_asset;
pub mod raw_idx;
