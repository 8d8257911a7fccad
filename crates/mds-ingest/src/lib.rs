//! Wide-table ingestion: semicolon-delimited CSV reading, row-symmetry
//! auditing, and variable-list files.

mod variable_list;
mod wide_table;

pub use variable_list::{read_variable_list, write_variable_list};
pub use wide_table::{SymmetryIssue, WideTable, check_symmetry, read_wide_table};
