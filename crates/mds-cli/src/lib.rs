//! CLI library components for the microdata submission pipeline.

pub mod logging;
pub mod pipeline;
