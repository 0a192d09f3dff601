//! Faceted grids of small multiples.
//!
//! A grid goes through two states. [`FacetGrid`] holds the table and the
//! row/column/hue assignments; [`FacetGrid::map_dataframe`] consumes it and
//! returns a [`PopulatedFacetGrid`], which has no way to be populated again.
//!
//! ```
//! use trueno_vega::grammar::Table;
//! use trueno_vega::plots::{CategoricalPlot, FacetGrid, PlotKind};
//!
//! let table = Table::new()
//!     .with_column("day", vec!["mon", "tue", "mon", "tue"]).unwrap()
//!     .with_column("tip", vec![1.0, 2.0, 1.5, 3.0]).unwrap()
//!     .with_column("smoker", vec!["yes", "yes", "no", "no"]).unwrap();
//!
//! let grid = FacetGrid::new(table)
//!     .col("smoker")
//!     .map_plot(PlotKind::Bar, CategoricalPlot::new().x("day").y("tip"))
//!     .unwrap();
//! assert!(grid.chart().is_faceted());
//! ```

use serde_json::Value as Json;

use crate::config::PlotConfig;
use crate::error::{Error, Result};
use crate::grammar::{Chart, Encoding, Estimator, Facet, Mark, Table};
use crate::palette::Palette;

use super::{CategoricalPlot, PlotKind};

/// Default cell height in inches.
pub const DEFAULT_GRID_SIZE: f64 = 3.0;

/// What an adapter sees when drawing one grid template.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    /// Full table of the grid.
    pub table: Table,
    /// Hue column, if any.
    pub hue: Option<String>,
    /// Palette, if any.
    pub palette: Option<Palette>,
    /// Cell height in inches.
    pub size: f64,
    /// Cell width-to-height ratio.
    pub aspect: f64,
    /// Plot configuration.
    pub config: PlotConfig,
}

/// An unpopulated facet grid.
#[derive(Debug, Clone, PartialEq)]
pub struct FacetGrid {
    table: Table,
    row: Option<String>,
    col: Option<String>,
    hue: Option<String>,
    palette: Option<Palette>,
    size: f64,
    aspect: f64,
    config: PlotConfig,
}

impl FacetGrid {
    /// Grid over `table` with no facets.
    #[must_use]
    pub fn new(table: Table) -> Self {
        Self {
            table,
            row: None,
            col: None,
            hue: None,
            palette: None,
            size: DEFAULT_GRID_SIZE,
            aspect: 1.0,
            config: PlotConfig::default(),
        }
    }

    /// One row of cells per level of `row`.
    #[must_use]
    pub fn row(mut self, row: &str) -> Self {
        self.row = Some(row.to_string());
        self
    }

    /// One column of cells per level of `col`.
    #[must_use]
    pub fn col(mut self, col: &str) -> Self {
        self.col = Some(col.to_string());
        self
    }

    /// Hue column passed to the adapter.
    #[must_use]
    pub fn hue(mut self, hue: &str) -> Self {
        self.hue = Some(hue.to_string());
        self
    }

    /// Palette passed to the adapter.
    #[must_use]
    pub fn palette(mut self, palette: impl Into<Palette>) -> Self {
        self.palette = Some(palette.into());
        self
    }

    /// Cell height in inches.
    #[must_use]
    pub fn size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Cell width-to-height ratio.
    #[must_use]
    pub fn aspect(mut self, aspect: f64) -> Self {
        self.aspect = aspect;
        self
    }

    /// Plot configuration.
    #[must_use]
    pub fn config(mut self, config: PlotConfig) -> Self {
        self.config = config;
        self
    }

    fn facet(&self) -> Option<Facet> {
        Facet::from_parts(self.row.as_deref(), self.col.as_deref())
    }

    /// The skeleton chart: a point mark over the table, faceted when a row
    /// or column is set.
    ///
    /// # Errors
    ///
    /// Only on a nested facet, which the skeleton never produces.
    pub fn chart(&self) -> Result<Chart> {
        let skeleton = Chart::unit(Mark::point(), Encoding::new()).data(self.table.clone());
        match self.facet() {
            Some(facet) => skeleton.facet(facet),
            None => Ok(skeleton),
        }
    }

    /// Populate the grid.
    ///
    /// `draw` is called once. Its chart becomes the template repeated in
    /// every cell: its configuration moves to the top level and its data is
    /// replaced by the grid's table.
    ///
    /// # Errors
    ///
    /// Whatever `draw` returns, or [`Error::NestedFacet`] when the template
    /// is itself faceted and the grid has a row or column.
    pub fn map_dataframe<F>(self, draw: F) -> Result<PopulatedFacetGrid>
    where
        F: FnOnce(&GridCell) -> Result<Chart>,
    {
        let facet = self.facet();
        let cell = GridCell {
            table: self.table,
            hue: self.hue,
            palette: self.palette,
            size: self.size,
            aspect: self.aspect,
            config: self.config,
        };
        let template = draw(&cell)?;

        let chart = match facet {
            Some(facet) => {
                if template.is_faceted() {
                    return Err(Error::NestedFacet);
                }
                let mut chart = template.facet(facet)?;
                chart.data = Some(cell.table);
                chart
            }
            None => {
                let mut chart = template;
                if chart.data.is_none() && !chart.is_faceted() {
                    chart.data = Some(cell.table);
                }
                chart
            }
        };
        log::debug!("populated facet grid");
        Ok(PopulatedFacetGrid { chart, config: cell.config })
    }

    /// Populate the grid with a categorical plot of `kind`.
    ///
    /// The plot receives the grid's table, size, aspect and configuration.
    /// Its own hue and palette win over the grid's.
    ///
    /// # Errors
    ///
    /// See [`FacetGrid::map_dataframe`] and [`CategoricalPlot::build`].
    pub fn map_plot(self, kind: PlotKind, plot: CategoricalPlot) -> Result<PopulatedFacetGrid> {
        self.map_dataframe(|cell| {
            let mut plot = plot
                .data(cell.table.clone())
                .size(cell.size)
                .aspect(cell.aspect)
                .config(cell.config.clone());
            if !plot.has_hue() {
                if let Some(hue) = &cell.hue {
                    plot = plot.hue(hue.as_str());
                }
            }
            if !plot.has_palette() {
                if let Some(palette) = &cell.palette {
                    plot = plot.palette(palette.clone());
                }
            }
            plot.build(kind)
        })
    }
}

/// A facet grid with its template drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulatedFacetGrid {
    chart: Chart,
    config: PlotConfig,
}

impl PopulatedFacetGrid {
    /// The grid chart.
    #[must_use]
    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    /// Take the grid chart.
    #[must_use]
    pub fn into_chart(self) -> Chart {
        self.chart
    }

    /// Complete Vega-Lite document.
    #[must_use]
    pub fn to_vega_lite(&self) -> Json {
        self.chart.to_vega_lite(&self.config)
    }
}

/// Draw a categorical plot of `kind` on a facet grid.
///
/// Only bar and point plots keep the plot's estimator and confidence level.
///
/// # Errors
///
/// [`Error::MissingParameter`] when the plot has no data, plus any error of
/// [`FacetGrid::map_plot`].
pub fn factorplot(
    plot: &CategoricalPlot,
    kind: PlotKind,
    row: Option<&str>,
    col: Option<&str>,
) -> Result<PopulatedFacetGrid> {
    let data = plot.data_ref().ok_or(Error::MissingParameter("data"))?.clone();
    let mut grid = FacetGrid::new(data)
        .size(plot.size_value().unwrap_or(DEFAULT_GRID_SIZE))
        .aspect(plot.aspect_value())
        .config(plot.config_ref().clone());
    if let Some(row) = row {
        grid = grid.row(row);
    }
    if let Some(col) = col {
        grid = grid.col(col);
    }

    let plot = if kind.uses_estimator() {
        plot.clone()
    } else {
        plot.clone().estimator(Estimator::default()).ci(Some(95.0))
    };
    grid.map_plot(kind, plot)
}
