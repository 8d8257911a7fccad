use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One measured column from the wide table, processed as an independent unit.
///
/// The canonical name is always lowercase; every on-disk location derives from
/// the uppercase [`directory_key`](Variable::directory_key).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
}

impl Variable {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_lowercase(),
        }
    }

    /// Uppercase form of the name, used for directory and file addressing.
    #[must_use]
    pub fn directory_key(&self) -> String {
        self.name.to_uppercase()
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Identifier and time columns that are never split, fetched, validated, or
/// packaged.
///
/// The set is injected configuration rather than a literal constant because
/// deployments disagree on the identifier column name (`sidkrg` vs
/// `s_sidkrg`). Membership checks are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedColumns {
    names: BTreeSet<String>,
}

/// Reserved columns used when no override is supplied.
pub const DEFAULT_RESERVED: [&str; 3] = ["sidkrg", "start_time", "stop_time"];

impl ReservedColumns {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|name| name.as_ref().trim().to_lowercase())
                .filter(|name| !name.is_empty())
                .collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.trim().to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for ReservedColumns {
    fn default() -> Self {
        Self::new(DEFAULT_RESERVED)
    }
}
