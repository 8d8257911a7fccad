//! Packaging stage: hands each fully validated dataset to the external
//! packager/encryptor, one attempt per variable, failures isolated.

mod command;

pub use command::CommandPackager;

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use mds_core::paths;
use mds_model::{PackagingOutcome, Result, Variable};

/// External packager/encryptor seam.
pub trait Packager {
    fn package(&self, key_material: &Path, dataset_dir: &Path, output_dir: &Path) -> Result<()>;
}

/// Variables partitioned by packaging result.
#[derive(Debug, Default)]
pub struct PackagePartition {
    /// Variables packaged successfully, in input order.
    pub succeeded: Vec<Variable>,
    /// Per-variable packaging failures.
    pub failed: Vec<(String, String)>,
}

/// Package each variable's dataset directory into `output_root/KEY`.
///
/// At most one attempt per variable per run; a variable whose delegate
/// raises appears only in `failed`, never in `succeeded`.
pub fn package_stage(
    packager: &dyn Packager,
    variables: &[Variable],
    key_material: &Path,
    root: &Path,
    output_root: &Path,
) -> PackagePartition {
    let mut partition = PackagePartition::default();
    for variable in variables {
        let outcome = match package_one(packager, variable, key_material, root, output_root) {
            Ok(()) => PackagingOutcome::Packaged,
            Err(error) => {
                let message = error.to_string();
                let message = if message.is_empty() {
                    "packaging failed".to_string()
                } else {
                    message
                };
                PackagingOutcome::Failed(message)
            }
        };
        match outcome {
            PackagingOutcome::Packaged => {
                debug!(variable = %variable.name, "packaged dataset");
                partition.succeeded.push(variable.clone());
            }
            PackagingOutcome::Failed(message) => {
                warn!(variable = %variable.name, error = %message, "packaging failed");
                partition.failed.push((variable.name.clone(), message));
            }
        }
    }
    partition
}

fn package_one(
    packager: &dyn Packager,
    variable: &Variable,
    key_material: &Path,
    root: &Path,
    output_root: &Path,
) -> Result<()> {
    let output_dir = paths::dataset_dir(output_root, variable);
    fs::create_dir_all(&output_dir)?;
    packager.package(key_material, &paths::dataset_dir(root, variable), &output_dir)
}
