//! Statistics used while composing charts.
//!
//! Aggregates that appear in encodings are evaluated by the renderer; this
//! module covers what has to be computed up front: axis extents, binned
//! point estimates and regression fits.

mod regression;
mod summary;

pub use regression::{
    bin_predictor, linspace, BinnedEstimate, DefaultRegression, RegressionFit, RegressionOptions,
    RegressionRoutine, XCi, GRID_POINTS,
};
pub use summary::{
    bootstrap, ci, extent, mean, median, padded_extent, percentile, resample, std_dev, AXIS_PADDING,
};
