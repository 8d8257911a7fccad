use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::Table;

use mds_cli::pipeline::{PackagingConfig, PipelineConfig, PipelineOutcome, run_pipeline};
use mds_fetch::HttpMetadataSource;
use mds_model::{RecordFieldPolicy, ReservedColumns};
use mds_package::CommandPackager;
use mds_validate::CommandValidator;

use crate::cli::{RecordFieldsArg, ReservedArgs, RunArgs};
use crate::summary::apply_table_style;

pub fn run_reserved(args: &ReservedArgs) -> Result<()> {
    let reserved = ReservedColumns::new(&args.reserved);
    let reserved = if reserved.is_empty() {
        ReservedColumns::default()
    } else {
        reserved
    };
    let mut table = Table::new();
    table.set_header(vec!["Reserved column"]);
    apply_table_style(&mut table);
    for name in reserved.iter() {
        table.add_row(vec![name]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_submission(args: &RunArgs) -> Result<PipelineOutcome> {
    let output_root = args.output_root.clone().unwrap_or_else(|| {
        args.input_csv
            .parent()
            .map(PathBuf::from)
            .unwrap_or_default()
            .join("input_directory")
    });
    let package_output = args
        .package_output
        .clone()
        .unwrap_or_else(|| output_root.join("packaged"));

    let reserved = ReservedColumns::new(&args.reserved);
    let policy = match args.record_fields {
        RecordFieldsArg::Timestamps => RecordFieldPolicy::Timestamps,
        RecordFieldsArg::Blank => RecordFieldPolicy::Blank,
    };

    let source = match &args.base_url {
        Some(base_url) if !args.skip_fetch && !args.dry_run => Some(
            HttpMetadataSource::new(base_url).context("build metadata source")?,
        ),
        _ => None,
    };
    let validator = args.validator_cmd.as_ref().map(CommandValidator::new);
    let packager = match &args.packager_cmd {
        Some(program) if !args.skip_package && !args.dry_run => {
            Some(CommandPackager::new(program))
        }
        _ => None,
    };
    let key_material = args.key_material.clone().unwrap_or_default();

    let config = PipelineConfig {
        input_csv: &args.input_csv,
        output_root: &output_root,
        variable_list: args.variables.as_deref(),
        reserved,
        policy,
        dry_run: args.dry_run,
        source: source
            .as_ref()
            .map(|s| s as &dyn mds_fetch::MetadataSource),
        validator: validator
            .as_ref()
            .map(|v| v as &dyn mds_validate::DatasetValidator),
        packaging: packager.as_ref().map(|p| PackagingConfig {
            packager: p as &dyn mds_package::Packager,
            key_material: &key_material,
            output_root: &package_output,
        }),
    };
    let outcome = run_pipeline(&config)?;

    if let Some(path) = &args.report_json {
        let json = serde_json::to_string_pretty(&outcome.report).context("serialize report")?;
        fs::write(path, json).with_context(|| format!("write report {}", path.display()))?;
    }
    Ok(outcome)
}
