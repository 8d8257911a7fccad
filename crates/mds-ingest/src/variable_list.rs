use std::fs;
use std::path::Path;

use tracing::debug;

use mds_model::Result;

/// Read a variable-list file: one canonical name per line.
///
/// Names are stored lowercase; blank lines and a leading BOM are tolerated.
pub fn read_variable_list(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    let names: Vec<String> = content
        .trim_start_matches('\u{feff}')
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|line| !line.is_empty())
        .collect();
    debug!(path = %path.display(), count = names.len(), "read variable list");
    Ok(names)
}

/// Write a variable-list file, one lowercase name per line.
pub fn write_variable_list<S: AsRef<str>>(path: &Path, names: &[S]) -> Result<()> {
    let mut content = String::new();
    for name in names {
        content.push_str(&name.as_ref().to_lowercase());
        content.push('\n');
    }
    fs::write(path, content)?;
    debug!(path = %path.display(), count = names.len(), "wrote variable list");
    Ok(())
}
