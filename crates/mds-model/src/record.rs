use serde::{Deserialize, Serialize};

/// What the 4th and 5th fields of a long-format record carry.
///
/// The source system changed conventions between revisions without
/// reconciling them, so the shape is a configuration choice:
/// `Timestamps` copies the row's start/stop values, `Blank` leaves both
/// fields empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordFieldPolicy {
    #[default]
    Timestamps,
    Blank,
}

/// One row of a variable's long-format record file.
///
/// Serialized as exactly five semicolon-separated fields, the third always
/// empty. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableRecord {
    pub subject_id: String,
    pub value: String,
    pub start: String,
    pub stop: String,
}

impl VariableRecord {
    pub fn new(
        subject_id: &str,
        value: &str,
        start: &str,
        stop: &str,
        policy: RecordFieldPolicy,
    ) -> Self {
        let (start, stop) = match policy {
            RecordFieldPolicy::Timestamps => (start.to_string(), stop.to_string()),
            RecordFieldPolicy::Blank => (String::new(), String::new()),
        };
        Self {
            subject_id: subject_id.to_string(),
            value: value.to_string(),
            start,
            stop,
        }
    }

    /// The fixed 5-field wire shape: `(subject_id, value, "", start, stop)`.
    #[must_use]
    pub fn fields(&self) -> [&str; 5] {
        [&self.subject_id, &self.value, "", &self.start, &self.stop]
    }
}
