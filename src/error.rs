//! Error taxonomy for the evaluation table.
//!
//! Integrity errors come from the embedded dataset and abort startup.
//! Query errors are returned to the caller and never touch the shared table.

use thiserror::Error;

use crate::table::Column;

/// The embedded dataset is internally inconsistent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataIntegrityError {
    #[error("dataset has no rows")]
    Empty,

    #[error("column `{column}` has {found} values, expected {expected}")]
    ColumnLengthMismatch {
        column: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("row {row}: {field} = {value} is outside [1, 5]")]
    RatingOutOfRange {
        row: usize,
        field: &'static str,
        value: u8,
    },

    #[error("row {row}: {field} = {found}, but its factors multiply to {expected}")]
    RiskProductMismatch {
        row: usize,
        field: &'static str,
        expected: u8,
        found: u8,
    },

    #[error("row {row}: risk reduction rate {found:.2} does not match computed {expected:.2}")]
    ReductionRateMismatch { row: usize, expected: f64, found: f64 },

    #[error("row {row}: similarity {value} is outside [0, 1]")]
    SimilarityOutOfRange { row: usize, value: f64 },

    #[error("row {row}: improvement flag {found} disagrees with risks")]
    ImprovementFlagMismatch { row: usize, found: bool },
}

/// A recoverable failure of a single query.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("index {index} out of range for table of {len} rows")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("aggregation over empty partition: {0}")]
    EmptyPartition(String),

    #[error("unknown column `{0}`")]
    UnknownColumn(String),

    #[error("column `{0}` is not numeric")]
    NonNumericColumn(Column),

    #[error("column `{0}` was not aggregated")]
    NotAggregated(Column),

    #[error("bucket count must be at least 1")]
    InvalidBucketCount,

    #[error("column `{0}` is constant, correlation is undefined")]
    ConstantColumn(Column),
}

pub type QueryResult<T> = core::result::Result<T, QueryError>;
