//! Core data model for the microdata submission pipeline.
//!
//! Every stage of the pipeline works on [`Variable`]s and reports its results
//! through the outcome types defined here. The model crate carries no I/O.

mod error;
mod record;
mod report;
mod variable;

pub use error::{MdsError, Result};
pub use record::{RecordFieldPolicy, VariableRecord};
pub use report::{PackagingOutcome, PipelineReport, ValidationOutcome};
pub use variable::{DEFAULT_RESERVED, ReservedColumns, Variable};
