pub mod load_source;
pub mod normalize_options;
