//! Deterministic per-variable path layout: `<root>/<KEY>/<KEY>.{csv,json}`.
//!
//! Paths are always composed from values; no stage ever relies on the
//! process working directory.

use std::path::{Path, PathBuf};

use mds_model::Variable;

/// Directory holding everything belonging to one variable.
#[must_use]
pub fn dataset_dir(root: &Path, variable: &Variable) -> PathBuf {
    root.join(variable.directory_key())
}

/// The variable's long-format record file.
#[must_use]
pub fn record_file(root: &Path, variable: &Variable) -> PathBuf {
    dataset_dir(root, variable).join(format!("{}.csv", variable.directory_key()))
}

/// The variable's fetched metadata document.
#[must_use]
pub fn metadata_file(root: &Path, variable: &Variable) -> PathBuf {
    dataset_dir(root, variable).join(format!("{}.json", variable.directory_key()))
}
