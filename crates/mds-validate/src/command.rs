use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use mds_model::{MdsError, Result};

use crate::DatasetValidator;

/// Subprocess adapter for the external validator.
///
/// Invoked as `<program> metadata|dataset <KEY> --input-dir <root>`; each
/// non-empty stdout line is one error string. A non-zero exit with no output
/// still yields one error so the failure is never silent.
#[derive(Debug, Clone)]
pub struct CommandValidator {
    program: PathBuf,
}

impl CommandValidator {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, mode: &str, directory_key: &str, root: &Path) -> Result<Vec<String>> {
        debug!(program = %self.program.display(), mode, directory_key, "running validator");
        let output = Command::new(&self.program)
            .arg(mode)
            .arg(directory_key)
            .arg("--input-dir")
            .arg(root)
            .output()
            .map_err(|error| {
                MdsError::message(format!(
                    "run validator {}: {error}",
                    self.program.display()
                ))
            })?;
        let mut errors: Vec<String> = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToString::to_string)
            .collect();
        if !output.status.success() && errors.is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            errors.push(format!(
                "validator exited with {}: {}",
                output.status,
                stderr.trim()
            ));
        }
        Ok(errors)
    }
}

impl DatasetValidator for CommandValidator {
    fn validate_metadata(&self, directory_key: &str, root: &Path) -> Result<Vec<String>> {
        self.run("metadata", directory_key, root)
    }

    fn validate_dataset(&self, directory_key: &str, root: &Path) -> Result<Vec<String>> {
        self.run("dataset", directory_key, root)
    }
}
