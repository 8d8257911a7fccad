//! Variable-partitioning core: catalog extraction, the on-disk dataset
//! layout, and the wide-to-long record splitter.

pub mod catalog;
pub mod paths;
pub mod splitter;

pub use catalog::{duplicate_names, extract};
pub use paths::{dataset_dir, metadata_file, record_file};
pub use splitter::{SplitColumns, SplitReport, resolve_split_columns, split};
