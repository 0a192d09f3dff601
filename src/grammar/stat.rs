//! Statistical transformations for encodings.
//!
//! Aggregates are named in the emitted specification and evaluated by the
//! renderer. [`Estimator`] is the closed set of central-tendency estimators
//! a plotting call may ask for.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Renderer-side aggregate operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregate {
    /// Arithmetic mean.
    Mean,
    /// Median.
    Median,
    /// Record count.
    Count,
    /// Lower bound of the 95% bootstrap confidence interval of the mean.
    Ci0,
    /// Upper bound of the 95% bootstrap confidence interval of the mean.
    Ci1,
    /// Lower quartile.
    Q1,
    /// Upper quartile.
    Q3,
    /// Minimum.
    Min,
    /// Maximum.
    Max,
}

/// Estimator applied to the value axis of aggregating plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Estimator {
    /// Mean, the only estimator with a confidence interval.
    #[default]
    Mean,
    /// Median.
    Median,
    /// Count.
    Count,
}

/// The only confidence level the renderer can compute.
pub const SUPPORTED_CI: f64 = 95.0;

impl Estimator {
    /// Lowercase name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Estimator::Mean => "mean",
            Estimator::Median => "median",
            Estimator::Count => "count",
        }
    }

    /// The aggregate computing this estimator.
    #[must_use]
    pub fn aggregate(self) -> Aggregate {
        match self {
            Estimator::Mean => Aggregate::Mean,
            Estimator::Median => Aggregate::Median,
            Estimator::Count => Aggregate::Count,
        }
    }

    /// Checks a confidence level against this estimator.
    ///
    /// Mean accepts no interval or exactly 95; median and count accept none.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfidence`] for any other combination.
    pub fn validate_ci(self, ci: Option<f64>) -> Result<()> {
        match (self, ci) {
            (_, None) => Ok(()),
            (Estimator::Mean, Some(level)) if (level - SUPPORTED_CI).abs() < f64::EPSILON => Ok(()),
            (Estimator::Mean, Some(level)) => Err(Error::InvalidConfidence {
                estimator: self.name(),
                ci: level,
                reason: "only a 95% interval is supported",
            }),
            (_, Some(level)) => Err(Error::InvalidConfidence {
                estimator: self.name(),
                ci: level,
                reason: "confidence intervals are only available for the mean",
            }),
        }
    }

    /// Apply the estimator to a slice of values.
    #[must_use]
    pub fn apply(self, values: &[f64]) -> f64 {
        match self {
            Estimator::Mean => crate::stats::mean(values),
            Estimator::Median => crate::stats::median(values),
            Estimator::Count => values.len() as f64,
        }
    }
}

impl FromStr for Estimator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mean" => Ok(Estimator::Mean),
            "median" => Ok(Estimator::Median),
            "count" => Ok(Estimator::Count),
            other => Err(Error::InvalidEstimator(other.to_string())),
        }
    }
}

impl fmt::Display for Estimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
