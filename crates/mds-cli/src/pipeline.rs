//! The pipeline orchestrator, with strictly ordered batch stages:
//!
//! 1. **Catalog**: derive the variable set from the header or a list file
//! 2. **Split**: write one long-format record file per variable
//! 3. **Fetch**: retrieve one metadata document per variable
//! 4. **ValidateMetadata**: external metadata checks
//! 5. **ValidateDataset**: external dataset checks, metadata-valid only
//! 6. **Package**: package/encrypt fully validated datasets
//! 7. **Report**: aggregate every partial failure
//!
//! Each stage finishes its full pass over all variables before the next
//! begins. The report is always reached; only unreadable required input is
//! fatal to the run.

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use mds_core::catalog;
use mds_core::splitter::{resolve_split_columns, split};
use mds_fetch::{MetadataSource, fetch_stage};
use mds_ingest::{
    SymmetryIssue, check_symmetry, read_variable_list, read_wide_table, write_variable_list,
};
use mds_model::{PipelineReport, RecordFieldPolicy, ReservedColumns, Variable};
use mds_package::{Packager, package_stage};
use mds_validate::{DatasetValidator, validate_dataset_stage, validate_metadata_stage};

/// Everything the packaging stage needs, present only when packaging runs.
pub struct PackagingConfig<'a> {
    pub packager: &'a dyn Packager,
    pub key_material: &'a Path,
    pub output_root: &'a Path,
}

/// Orchestrator configuration. Collaborators are injected as trait objects
/// so tests substitute fakes for the network, validator, and packager.
pub struct PipelineConfig<'a> {
    pub input_csv: &'a Path,
    pub output_root: &'a Path,
    /// Pre-existing variable list; when absent the list is derived from the
    /// wide table's header and written to `<output_root>/variables.txt`.
    pub variable_list: Option<&'a Path>,
    pub reserved: ReservedColumns,
    pub policy: RecordFieldPolicy,
    /// Catalog and symmetry check only; nothing written, no network.
    pub dry_run: bool,
    /// `None` skips the fetch stage (documents must already be on disk).
    pub source: Option<&'a dyn MetadataSource>,
    /// Required unless `dry_run`.
    pub validator: Option<&'a dyn DatasetValidator>,
    /// `None` skips the packaging stage.
    pub packaging: Option<PackagingConfig<'a>>,
}

/// Result of a full run: the catalog, table shape, symmetry audit, and the
/// aggregated per-variable report.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub variables: Vec<Variable>,
    pub row_count: usize,
    pub symmetry_issues: Vec<SymmetryIssue>,
    pub fetch_ran: bool,
    pub package_ran: bool,
    pub report: PipelineReport,
}

pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineOutcome> {
    let run_span = info_span!("pipeline", input = %config.input_csv.display());
    let _run_guard = run_span.enter();
    let run_start = Instant::now();

    // Structural audit: mismatched rows are reported, not fatal.
    let symmetry_issues = check_symmetry(config.input_csv)
        .with_context(|| format!("check symmetry of {}", config.input_csv.display()))?;
    for issue in &symmetry_issues {
        warn!(
            line = issue.line,
            found = issue.found,
            expected = issue.expected,
            "row has mismatched column count"
        );
    }

    let table = read_wide_table(config.input_csv)
        .with_context(|| format!("read wide table {}", config.input_csv.display()))?;
    info!(
        columns = table.headers.len(),
        rows = table.row_count(),
        "wide table read"
    );

    // Stage 1: Catalog
    let variables = match config.variable_list {
        Some(path) => {
            let names = read_variable_list(path)
                .with_context(|| format!("read variable list {}", path.display()))?;
            catalog::extract(&names, &config.reserved)
        }
        None => catalog::extract(&table.headers, &config.reserved),
    };
    let duplicates = catalog::duplicate_names(&variables);
    if !duplicates.is_empty() {
        warn!(duplicates = ?duplicates, "header contains duplicate variable names");
    }
    info!(variable_count = variables.len(), "catalog extracted");

    if config.dry_run {
        let report = PipelineReport::default();
        info!(duration_ms = run_start.elapsed().as_millis(), "dry run complete");
        return Ok(PipelineOutcome {
            variables,
            row_count: table.row_count(),
            symmetry_issues,
            fetch_ran: false,
            package_ran: false,
            report,
        });
    }

    let Some(validator) = config.validator else {
        bail!("a validator is required unless running with --dry-run");
    };
    let mut report = PipelineReport::default();

    fs::create_dir_all(config.output_root)
        .with_context(|| format!("create output root {}", config.output_root.display()))?;
    if config.variable_list.is_none() {
        let list_path = config.output_root.join("variables.txt");
        let names: Vec<&str> = variables.iter().map(|v| v.name.as_str()).collect();
        if let Err(error) = write_variable_list(&list_path, &names) {
            warn!(path = %list_path.display(), %error, "failed to write derived variable list");
        }
    }

    // Stage 2: Split
    let columns = resolve_split_columns(&table.headers, &config.reserved);
    info!(identifier = %columns.identifier, "resolved identifier column");
    let split_start = Instant::now();
    let split_report = split(
        &table,
        &variables,
        &columns,
        config.output_root,
        config.policy,
    );
    info!(
        split = split_report.manifest.len(),
        missing = split_report.missing_columns.len(),
        failed = split_report.errors.len(),
        duration_ms = split_start.elapsed().as_millis(),
        "split complete"
    );
    report.missing_columns = split_report.missing_columns;
    report.split_errors = split_report.errors;
    let manifest = split_report.manifest;

    // Stage 3: Fetch
    let fetch_ran = config.source.is_some();
    if let Some(source) = config.source {
        let fetch_start = Instant::now();
        let fetch_report = fetch_stage(source, &manifest, config.output_root);
        info!(
            fetched = fetch_report.fetched.len(),
            failed = fetch_report.errors.len(),
            duration_ms = fetch_start.elapsed().as_millis(),
            "fetch complete"
        );
        report.fetch_errors = fetch_report.errors;
    } else {
        info!("fetch stage skipped");
    }

    // Stage 4: ValidateMetadata
    let metadata_start = Instant::now();
    let metadata = validate_metadata_stage(validator, &manifest, config.output_root);
    info!(
        valid = metadata.valid.len(),
        invalid = metadata.errors.len(),
        duration_ms = metadata_start.elapsed().as_millis(),
        "metadata validation complete"
    );
    report.metadata_errors = metadata.errors;

    // Stage 5: ValidateDataset, metadata-valid variables only
    let dataset_start = Instant::now();
    let dataset = validate_dataset_stage(validator, &metadata.valid, config.output_root);
    info!(
        valid = dataset.valid.len(),
        invalid = dataset.errors.len(),
        duration_ms = dataset_start.elapsed().as_millis(),
        "dataset validation complete"
    );
    report.dataset_errors = dataset.errors;

    // Stage 6: Package
    let package_ran = config.packaging.is_some();
    if let Some(packaging) = &config.packaging {
        let package_start = Instant::now();
        let partition = package_stage(
            packaging.packager,
            &dataset.valid,
            packaging.key_material,
            config.output_root,
            packaging.output_root,
        );
        info!(
            packaged = partition.succeeded.len(),
            failed = partition.failed.len(),
            duration_ms = package_start.elapsed().as_millis(),
            "packaging complete"
        );
        report.packaged = partition
            .succeeded
            .iter()
            .map(|variable| variable.name.clone())
            .collect();
        report.packaging_failures = partition.failed;
    } else {
        info!("packaging stage skipped");
    }

    // Stage 7: Report
    info!(
        variables = variables.len(),
        failures = report.failure_count(),
        duration_ms = run_start.elapsed().as_millis(),
        "pipeline complete"
    );
    Ok(PipelineOutcome {
        variables,
        row_count: table.row_count(),
        symmetry_issues,
        fetch_ran,
        package_ran,
        report,
    })
}
