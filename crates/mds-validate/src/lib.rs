//! Validation stages: metadata first, then datasets, strictly in that order.
//!
//! The external validator is a black box behind [`DatasetValidator`]; this
//! crate only aggregates its verdicts, it never retries or suppresses them.

mod command;

pub use command::CommandValidator;

use std::path::Path;

use tracing::{debug, warn};

use mds_core::paths;
use mds_model::{Result, ValidationOutcome, Variable};

/// External validator seam. Both entry points return an ordered error list;
/// empty means valid.
pub trait DatasetValidator {
    fn validate_metadata(&self, directory_key: &str, root: &Path) -> Result<Vec<String>>;
    fn validate_dataset(&self, directory_key: &str, root: &Path) -> Result<Vec<String>>;
}

/// Variables partitioned by a validation phase.
#[derive(Debug, Default)]
pub struct ValidationPartition {
    /// Variables with zero reported errors, in input order.
    pub valid: Vec<Variable>,
    /// Per-variable error lists, ordered as reported.
    pub errors: Vec<(String, Vec<String>)>,
}

impl ValidationPartition {
    fn record(&mut self, variable: &Variable, outcome: ValidationOutcome) {
        match outcome {
            ValidationOutcome::Valid => self.valid.push(variable.clone()),
            ValidationOutcome::Invalid(errors) => {
                warn!(
                    variable = %variable.name,
                    error_count = errors.len(),
                    "validation failed"
                );
                self.errors.push((variable.name.clone(), errors));
            }
        }
    }
}

/// Validate each variable's fetched metadata document.
///
/// A variable whose document is absent on disk is invalid without consulting
/// the validator; that is how a failed fetch propagates.
pub fn validate_metadata_stage(
    validator: &dyn DatasetValidator,
    variables: &[Variable],
    root: &Path,
) -> ValidationPartition {
    let mut partition = ValidationPartition::default();
    for variable in variables {
        let document = paths::metadata_file(root, variable);
        let outcome = if document.is_file() {
            run_check(|| validator.validate_metadata(&variable.directory_key(), root))
        } else {
            ValidationOutcome::Invalid(vec![format!(
                "missing metadata document: {}",
                document.display()
            )])
        };
        debug!(variable = %variable.name, valid = outcome.is_valid(), "metadata check");
        partition.record(variable, outcome);
    }
    partition
}

/// Validate each variable's generated dataset.
///
/// Callers must pass only variables that passed the metadata phase; the
/// dataset phase never runs for a metadata-invalid variable.
pub fn validate_dataset_stage(
    validator: &dyn DatasetValidator,
    variables: &[Variable],
    root: &Path,
) -> ValidationPartition {
    let mut partition = ValidationPartition::default();
    for variable in variables {
        let outcome = run_check(|| validator.validate_dataset(&variable.directory_key(), root));
        debug!(variable = %variable.name, valid = outcome.is_valid(), "dataset check");
        partition.record(variable, outcome);
    }
    partition
}

/// A validator invocation failure counts as a validation error for that
/// variable, never as a stage abort.
fn run_check(check: impl FnOnce() -> Result<Vec<String>>) -> ValidationOutcome {
    match check() {
        Ok(errors) => ValidationOutcome::from_errors(errors),
        Err(error) => ValidationOutcome::Invalid(vec![error.to_string()]),
    }
}
