//! # Trueno-Vega
//!
//! Statistical plotting that compiles to [Vega-Lite](https://vega.github.io/vega-lite/)
//! v5 JSON.
//!
//! Plot builders take a [`grammar::Table`] (or bare sequences), normalize the
//! inputs, pick an orientation, and emit a declarative [`grammar::Chart`].
//! Aggregation, binning and layout are left to the Vega-Lite renderer; only
//! regression fits and point estimates are computed here, on
//! [nalgebra](https://crates.io/crates/nalgebra) least squares and the
//! [lowess](https://crates.io/crates/lowess) smoother.
//!
//! ## Plot Families
//!
//! - **Categorical**: bar, count, point, strip and box plots ([`plots::CategoricalPlot`])
//! - **Relational**: scatter, line, histogram and filled area plots
//! - **Regression**: fitted curves with bootstrap bands ([`plots::RegPlot`], [`plots::LmPlot`])
//! - **Facet grids**: small multiples by row and column ([`plots::FacetGrid`])
//!
//! ## Quick Start
//!
//! ```rust
//! use trueno_vega::prelude::*;
//!
//! let tips = Table::new()
//!     .with_column("day", vec!["thu", "fri", "thu", "fri"])?
//!     .with_column("tip", vec![1.5, 2.0, 3.5, 1.0])?;
//!
//! let chart = CategoricalPlot::new()
//!     .data(tips)
//!     .x("day")
//!     .y("tip")
//!     .build(PlotKind::Bar)?;
//!
//! let spec = chart.to_vega_lite(&PlotConfig::default());
//! assert_eq!(spec["$schema"], "https://vega.github.io/schema/vega-lite/v5.json");
//! # Ok::<(), trueno_vega::Error>(())
//! ```
//!
//! ## Notebook Export
//!
//! The `nb2html` and `docgen` binaries turn Jupyter notebooks holding
//! Vega-Lite outputs into standalone HTML pages; see [`notebook`] and
//! [`docgen`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types, parsing and Vega color strings.
pub mod color;

/// Named palettes and palette resolution.
pub mod palette;

/// Scale blocks and categorical color scales.
pub mod scale;

/// Styling and statistics defaults.
pub mod config;

// ============================================================================
// Chart Model
// ============================================================================

/// Vega-Lite grammar: data, encodings, marks, facets and charts.
pub mod grammar;

/// Input normalization into tables.
pub mod reshape;

/// Orientation inference for categorical plots.
pub mod orient;

/// Summary statistics and regression fitting.
pub mod stats;

/// High-level plot builders.
pub mod plots;

// ============================================================================
// Export
// ============================================================================

/// Jupyter notebook to HTML conversion.
pub mod notebook;

/// Documentation site generation.
pub mod docgen;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-vega operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types for convenient imports.
///
/// ```rust
/// use trueno_vega::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Rgba;
    pub use crate::config::PlotConfig;
    pub use crate::error::{Error, Result};
    pub use crate::grammar::{Chart, Column, ColumnData, Estimator, Table, Value};
    pub use crate::orient::Orientation;
    pub use crate::palette::Palette;
    pub use crate::plots::{
        factorplot, AreaPlot, CategoricalPlot, FacetGrid, Histogram, LinePlot, LmPlot, MarkProps,
        PlotKind, RegPlot, RelPlot, ScatterPlot,
    };
    pub use crate::reshape::Field;
    pub use crate::scale::ColorScale;
    pub use crate::stats::{RegressionOptions, RegressionRoutine, XCi};
}
