use std::fs;
use std::path::Path;

use csv::ReaderBuilder;

use mds_model::{MdsError, Result};

/// The source extract: one row per subject, one column per measured variable.
///
/// Rows are normalized to the header width on read and never mutated by the
/// pipeline afterwards.
#[derive(Debug, Clone)]
pub struct WideTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl WideTable {
    /// Case-insensitive column lookup.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read a semicolon-delimited wide table, tolerating a UTF-8 BOM and ragged
/// rows. The first row is the header; shorter data rows are padded with empty
/// cells and longer ones truncated so every row matches the header width.
pub fn read_wide_table(path: &Path) -> Result<WideTable> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|error| MdsError::message(format!("read csv {}: {error}", path.display())))?;

    let mut headers: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record
            .map_err(|error| MdsError::message(format!("read record {}: {error}", path.display())))?;
        if headers.is_empty() {
            headers = record.iter().map(normalize_cell).collect();
            continue;
        }
        let mut row = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            let value = record.get(idx).unwrap_or("");
            row.push(normalize_cell(value));
        }
        rows.push(row);
    }
    if headers.is_empty() {
        return Err(MdsError::message(format!(
            "empty wide table: {}",
            path.display()
        )));
    }
    Ok(WideTable { headers, rows })
}

/// A row whose raw field count differs from the header's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymmetryIssue {
    /// 1-based line number, counting the header as line 1.
    pub line: usize,
    pub found: usize,
    pub expected: usize,
}

/// Audit every raw line's field count against the header.
///
/// Mismatches are reported, not fatal: the table reader pads and truncates,
/// but a mismatch usually signals an upstream export problem worth surfacing.
/// The scan splits naively on the delimiter, matching how the extract is
/// produced (no quoting in this format).
pub fn check_symmetry(path: &Path) -> Result<Vec<SymmetryIssue>> {
    let content = fs::read_to_string(path)?;
    let content = content.trim_start_matches('\u{feff}');
    let mut lines = content.lines();
    let Some(header) = lines.next() else {
        return Ok(Vec::new());
    };
    let expected = header.split(';').count();
    let mut issues = Vec::new();
    for (offset, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let found = line.split(';').count();
        if found != expected {
            issues.push(SymmetryIssue {
                line: offset + 2,
                found,
                expected,
            });
        }
    }
    Ok(issues)
}
