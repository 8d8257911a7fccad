//! Converts the wide table into one long-format record file per variable.

use std::fs;
use std::path::Path;

use csv::WriterBuilder;
use tracing::{debug, warn};

use mds_ingest::WideTable;
use mds_model::{MdsError, RecordFieldPolicy, ReservedColumns, Result, Variable, VariableRecord};

use crate::paths;

/// The reserved columns feeding the fixed record fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitColumns {
    /// Subject identifier column (first record field).
    pub identifier: String,
    /// Start-time column, when the table has one.
    pub start: Option<String>,
    /// Stop-time column, when the table has one.
    pub stop: Option<String>,
}

/// Resolve the identifier and time columns from the header.
///
/// The identifier is the first reserved header that is not a `*_time`
/// column; by convention that is the first header, which is the fallback
/// when no reserved column appears. Time columns are the reserved `*_time`
/// headers, so overridden reserved sets (`s_start_time`, ...) keep feeding
/// the record's 4th/5th fields: a name containing `start` or `stop` claims
/// its slot, any remaining time columns fill open slots in header order.
#[must_use]
pub fn resolve_split_columns(headers: &[String], reserved: &ReservedColumns) -> SplitColumns {
    let identifier = headers
        .iter()
        .find(|header| {
            let lower = header.to_lowercase();
            reserved.contains(&lower) && !lower.ends_with("_time")
        })
        .or_else(|| headers.first())
        .cloned()
        .unwrap_or_default();

    let mut start = None;
    let mut stop = None;
    let mut unclaimed: Vec<String> = Vec::new();
    for header in headers {
        let lower = header.to_lowercase();
        if !reserved.contains(&lower) || !lower.ends_with("_time") {
            continue;
        }
        if lower.contains("start") && start.is_none() {
            start = Some(header.clone());
        } else if lower.contains("stop") && stop.is_none() {
            stop = Some(header.clone());
        } else {
            unclaimed.push(header.clone());
        }
    }
    let mut unclaimed = unclaimed.into_iter();
    let start = start.or_else(|| unclaimed.next());
    let stop = stop.or_else(|| unclaimed.next());
    SplitColumns {
        identifier,
        start,
        stop,
    }
}

/// Result of the split stage.
#[derive(Debug, Default)]
pub struct SplitReport {
    /// Variables whose record file was written, in catalog order.
    pub manifest: Vec<Variable>,
    /// Declared variables absent from the table's columns.
    pub missing_columns: Vec<String>,
    /// Per-variable I/O failures.
    pub errors: Vec<(String, String)>,
}

/// Write one record file per variable under `output_root/KEY/KEY.csv`.
///
/// A variable missing from the table is skipped with a warning; an I/O error
/// is fatal for that variable only. Re-running overwrites existing files.
pub fn split(
    table: &WideTable,
    variables: &[Variable],
    columns: &SplitColumns,
    output_root: &Path,
    policy: RecordFieldPolicy,
) -> SplitReport {
    let mut report = SplitReport::default();
    let identifier_idx = table.column_index(&columns.identifier);
    let start_idx = columns.start.as_deref().and_then(|name| table.column_index(name));
    let stop_idx = columns.stop.as_deref().and_then(|name| table.column_index(name));

    for variable in variables {
        let Some(value_idx) = table.column_index(&variable.name) else {
            warn!(variable = %variable.name, "column not found in wide table, skipping");
            report.missing_columns.push(variable.name.clone());
            continue;
        };
        match write_records(table, variable, identifier_idx, value_idx, start_idx, stop_idx, output_root, policy)
        {
            Ok(()) => {
                debug!(
                    variable = %variable.name,
                    records = table.row_count(),
                    "wrote record file"
                );
                report.manifest.push(variable.clone());
            }
            Err(error) => {
                warn!(variable = %variable.name, %error, "failed to write record file");
                report.errors.push((variable.name.clone(), error.to_string()));
            }
        }
    }
    report
}

#[allow(clippy::too_many_arguments)]
fn write_records(
    table: &WideTable,
    variable: &Variable,
    identifier_idx: Option<usize>,
    value_idx: usize,
    start_idx: Option<usize>,
    stop_idx: Option<usize>,
    output_root: &Path,
    policy: RecordFieldPolicy,
) -> Result<()> {
    fs::create_dir_all(paths::dataset_dir(output_root, variable))?;
    let path = paths::record_file(output_root, variable);
    let mut writer = WriterBuilder::new()
        .delimiter(b';')
        .from_path(&path)
        .map_err(|error| MdsError::message(format!("open {}: {error}", path.display())))?;
    for row in &table.rows {
        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).map_or("", String::as_str);
        let record = VariableRecord::new(
            cell(identifier_idx),
            cell(Some(value_idx)),
            cell(start_idx),
            cell(stop_idx),
            policy,
        );
        writer
            .write_record(record.fields())
            .map_err(|error| MdsError::message(format!("write {}: {error}", path.display())))?;
    }
    writer
        .flush()
        .map_err(|error| MdsError::message(format!("flush {}: {error}", path.display())))?;
    Ok(())
}
