//! Error types for trueno-vega operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building chart specifications.
///
/// Usage errors are raised by the call that detects them and never retried.
/// Errors from the regression routine surface unchanged as [`Error::Regression`].
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (notebook and config files).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Estimator name outside the supported set.
    #[error("estimator must be one of mean, median or count, got '{0}'")]
    InvalidEstimator(String),

    /// Confidence level not allowed for the chosen estimator.
    #[error("invalid confidence level {ci} for estimator '{estimator}': {reason}")]
    InvalidConfidence {
        /// Estimator name.
        estimator: &'static str,
        /// Requested confidence level.
        ci: f64,
        /// Why the level was rejected.
        reason: &'static str,
    },

    /// A required parameter was not supplied.
    #[error("must pass values for {0}")]
    MissingParameter(&'static str),

    /// Parameters that cannot be combined were both supplied.
    #[error("cannot pass values for both {first} and {second}")]
    ConflictingParameters {
        /// First parameter.
        first: &'static str,
        /// Second parameter.
        second: &'static str,
    },

    /// Neither axis holds numeric data.
    #[error("neither the `x` nor `y` variable appears to be numeric")]
    AmbiguousOrientation,

    /// Two roles resolved to the same column name with different data.
    #[error("roles '{first}' and '{second}' both resolve to column '{column}' with different data")]
    AmbiguousField {
        /// Resolved column name.
        column: String,
        /// Role that claimed the name first.
        first: String,
        /// Role that collided with it.
        second: String,
    },

    /// Referenced column does not exist in the table.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// Column is expected to be numeric.
    #[error("column '{0}' is not numeric")]
    NonNumericColumn(String),

    /// Plot kind name not recognized.
    #[error("plot kind '{0}' is not recognized")]
    UnknownPlotKind(String),

    /// A faceted chart cannot be placed inside another facet.
    #[error("cannot facet a chart that is already faceted")]
    NestedFacet,

    /// Column length does not match the table length.
    #[error("column '{column}' has {len} values, table has {expected} rows")]
    DataLengthMismatch {
        /// Offending column.
        column: String,
        /// Column length.
        len: usize,
        /// Table row count.
        expected: usize,
    },

    /// Empty data provided where non-empty is required.
    #[error("empty data provided")]
    EmptyData,

    /// Color parsing error.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Palette name not recognized.
    #[error("unknown palette: {0}")]
    UnknownPalette(String),

    /// Saturation outside (0, 1].
    #[error("saturation must be in (0, 1], got {0}")]
    InvalidSaturation(f64),

    /// Error raised by the regression routine.
    #[error("regression error: {0}")]
    Regression(String),

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),

    /// Invalid configuration value.
    #[error("invalid configuration value for '{key}': {message}")]
    ConfigInvalid {
        /// The configuration key with invalid value.
        key: &'static str,
        /// Why the value is invalid.
        message: String,
    },

    /// Malformed notebook document.
    #[error("malformed notebook: {0}")]
    Notebook(String),
}
