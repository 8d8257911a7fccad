//! Derives the ordered variable catalog from column headers.

use std::collections::BTreeSet;

use mds_model::{ReservedColumns, Variable};

/// Extract the ordered set of variables from `headers`, dropping reserved
/// identifier/time columns.
///
/// Output order is a stable subsequence of input order. Duplicate
/// non-reserved names are retained; rejecting an ambiguous header is the
/// caller's decision, surfaced via [`duplicate_names`].
#[must_use]
pub fn extract<S: AsRef<str>>(headers: &[S], reserved: &ReservedColumns) -> Vec<Variable> {
    headers
        .iter()
        .map(|header| Variable::new(header.as_ref()))
        .filter(|variable| !variable.name.is_empty())
        .filter(|variable| !reserved.contains(&variable.name))
        .collect()
}

/// Names appearing more than once in the catalog, in first-occurrence order.
#[must_use]
pub fn duplicate_names(variables: &[Variable]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();
    let mut duplicates = Vec::new();
    for variable in variables {
        if !seen.insert(variable.name.clone()) && reported.insert(variable.name.clone()) {
            duplicates.push(variable.name.clone());
        }
    }
    duplicates
}
