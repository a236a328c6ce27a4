//! The data normalization and derived-metrics pipeline.
//!
//! Three stages, no branching architecture:
//!
//! 1. row validation (`validate`) — batch schema check, per-row coercion
//!    with skip-and-warn recovery
//! 2. month clipping (`clip`) — per-job overlap with the viewing window
//! 3. budget aggregation (`budget`) — daily/cumulative spend series + KPIs
//!
//! Stages 2 and 3 both consume the validated set independently; neither
//! depends on the other. Every stage is a pure function of its inputs —
//! no I/O, no shared state, no hidden clock.

pub mod budget;
pub mod clip;
pub mod validate;

pub use budget::*;
pub use clip::*;
pub use validate::*;

/// Errors raised by the pipeline stages.
///
/// Row-level coercion problems are NOT errors; they are collected as
/// [`RowWarning`]s and the batch continues.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// The input batch had zero records.
    EmptyDataset,
    /// The batch's field set lacks one or more required columns.
    MissingColumns(Vec<String>),
    /// A negative (or non-finite) total budget was supplied.
    InvalidBudget(f64),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::EmptyDataset => write!(f, "No job rows found in the input data."),
            PipelineError::MissingColumns(cols) => {
                let quoted: Vec<String> = cols.iter().map(|c| format!("`{c}`")).collect();
                write!(f, "Missing required columns: {}", quoted.join(", "))
            }
            PipelineError::InvalidBudget(b) => {
                write!(f, "Total budget must be a non-negative number (got {b}).")
            }
        }
    }
}

impl std::error::Error for PipelineError {}
