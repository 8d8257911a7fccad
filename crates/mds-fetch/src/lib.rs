//! Per-variable metadata retrieval.
//!
//! One GET per variable with a fixed timeout; a failed fetch is caught and
//! recorded, never escalated, so a timeout for one variable cannot block its
//! siblings. The absent document then surfaces as a metadata validation
//! failure downstream.

use std::fs;
use std::path::Path;
use std::time::Duration;

use tracing::{debug, warn};

use mds_core::paths;
use mds_model::{MdsError, Result, Variable};

/// HTTP request timeout per metadata document.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport seam for metadata retrieval; the pipeline only sees bytes.
pub trait MetadataSource {
    fn fetch(&self, variable_name: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP source: GET `<base_url><lowercase variable name>`.
pub struct HttpMetadataSource {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpMetadataSource {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|error| MdsError::message(format!("build http client: {error}")))?;
        Ok(Self {
            base_url: base_url.to_string(),
            client,
        })
    }

    /// Request URL for one variable.
    #[must_use]
    pub fn url_for(&self, variable_name: &str) -> String {
        format!("{}{}", self.base_url, variable_name.to_lowercase())
    }
}

impl MetadataSource for HttpMetadataSource {
    fn fetch(&self, variable_name: &str) -> Result<Vec<u8>> {
        let url = self.url_for(variable_name);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|error| MdsError::message(format!("request {url}: {error}")))?
            .error_for_status()
            .map_err(|error| MdsError::message(format!("request {url}: {error}")))?;
        let body = response
            .bytes()
            .map_err(|error| MdsError::message(format!("read body {url}: {error}")))?;
        Ok(body.to_vec())
    }
}

/// Result of the fetch stage.
#[derive(Debug, Default)]
pub struct FetchReport {
    /// Variables whose document was written, in input order.
    pub fetched: Vec<String>,
    /// Per-variable fetch failures; no document exists for these.
    pub errors: Vec<(String, String)>,
}

/// Fetch one metadata document per variable into `output_root/KEY/KEY.json`.
///
/// Exactly one attempt per variable, no retries. The document is written on
/// success only, so a failed variable leaves no file behind.
pub fn fetch_stage(
    source: &dyn MetadataSource,
    variables: &[Variable],
    output_root: &Path,
) -> FetchReport {
    let mut report = FetchReport::default();
    for variable in variables {
        match fetch_one(source, variable, output_root) {
            Ok(()) => {
                debug!(variable = %variable.name, "fetched metadata document");
                report.fetched.push(variable.name.clone());
            }
            Err(error) => {
                warn!(variable = %variable.name, %error, "metadata fetch failed");
                report.errors.push((variable.name.clone(), error.to_string()));
            }
        }
    }
    report
}

fn fetch_one(source: &dyn MetadataSource, variable: &Variable, output_root: &Path) -> Result<()> {
    let body = source.fetch(&variable.name)?;
    fs::create_dir_all(paths::dataset_dir(output_root, variable))?;
    fs::write(paths::metadata_file(output_root, variable), body)?;
    Ok(())
}
