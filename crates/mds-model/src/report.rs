use serde::Serialize;

/// Per-variable result of a validation phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ValidationOutcome {
    Valid,
    Invalid(Vec<String>),
}

impl ValidationOutcome {
    /// Empty error list means valid; anything else keeps the errors in order.
    #[must_use]
    pub fn from_errors(errors: Vec<String>) -> Self {
        if errors.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(errors)
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Per-variable result of the packaging stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PackagingOutcome {
    Packaged,
    Failed(String),
}

/// Aggregated per-variable failures and successes across all stages.
///
/// All collections preserve insertion order, which is catalog order, so
/// reporting is deterministic. Immutable once the orchestrator has built it;
/// variables appearing in none of the error collections fully succeeded.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineReport {
    /// Declared variables absent from the wide table (skipped with a warning).
    pub missing_columns: Vec<String>,
    /// Variables whose record file could not be written.
    pub split_errors: Vec<(String, String)>,
    /// Variables whose metadata fetch failed (no document written).
    pub fetch_errors: Vec<(String, String)>,
    /// Metadata validation errors, ordered as reported by the validator.
    pub metadata_errors: Vec<(String, Vec<String>)>,
    /// Dataset validation errors, ordered as reported by the validator.
    pub dataset_errors: Vec<(String, Vec<String>)>,
    /// Variables packaged and encrypted successfully.
    pub packaged: Vec<String>,
    /// Variables whose packaging attempt failed.
    pub packaging_failures: Vec<(String, String)>,
}

impl PipelineReport {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.split_errors.is_empty()
            || !self.fetch_errors.is_empty()
            || !self.metadata_errors.is_empty()
            || !self.dataset_errors.is_empty()
            || !self.packaging_failures.is_empty()
    }

    /// Total number of variables with at least one recorded failure.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.split_errors.len()
            + self.fetch_errors.len()
            + self.metadata_errors.len()
            + self.dataset_errors.len()
            + self.packaging_failures.len()
    }
}
