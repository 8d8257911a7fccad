use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use mds_model::{MdsError, Result};

use crate::Packager;

/// Subprocess adapter for the external packager/encryptor.
///
/// Invoked as `<program> <key_material> <dataset_dir> <output_dir>`;
/// a non-zero exit is a packaging failure carrying the trimmed stderr.
#[derive(Debug, Clone)]
pub struct CommandPackager {
    program: PathBuf,
}

impl CommandPackager {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Packager for CommandPackager {
    fn package(&self, key_material: &Path, dataset_dir: &Path, output_dir: &Path) -> Result<()> {
        debug!(
            program = %self.program.display(),
            dataset_dir = %dataset_dir.display(),
            "running packager"
        );
        let output = Command::new(&self.program)
            .arg(key_material)
            .arg(dataset_dir)
            .arg(output_dir)
            .output()
            .map_err(|error| {
                MdsError::message(format!("run packager {}: {error}", self.program.display()))
            })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MdsError::message(format!(
                "packager exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}
