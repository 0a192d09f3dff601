//! High-level plot types.
//!
//! Builders for each plot kind. Every builder normalizes its inputs with
//! [`crate::reshape::build_table`] and returns a [`Chart`].

mod area;
mod categorical;
mod facet_grid;
mod histogram;
mod line;
mod regression;
mod scatter;

pub use area::AreaPlot;
pub use categorical::{CategoricalPlot, PlotKind};
pub use facet_grid::{factorplot, FacetGrid, GridCell, PopulatedFacetGrid};
pub use histogram::Histogram;
pub use line::LinePlot;
pub use regression::{LmPlot, MarkProps, RegPlot};
pub use scatter::{RelPlot, ScatterPlot};

use crate::color::vega_color;
use crate::config::PlotConfig;
use crate::error::Result;
use crate::grammar::{Chart, ChannelDef, FieldDef, Table};
use crate::palette::{resolve_palette, Palette};

/// Color channel for a `color` argument: a column of the table becomes a
/// nominal field, anything else is parsed as a literal color.
pub(crate) fn color_channel(color: &str, table: &Table) -> Result<ChannelDef> {
    if table.has_column(color) {
        Ok(FieldDef::nominal(color).into())
    } else {
        Ok(ChannelDef::value(vega_color(color)?))
    }
}

/// Sizing and palette applied to every finished chart.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Finish<'a> {
    pub(crate) size: Option<f64>,
    pub(crate) aspect: f64,
    pub(crate) palette: Option<&'a Palette>,
    pub(crate) color: Option<&'a str>,
    pub(crate) saturation: f64,
    pub(crate) config: &'a PlotConfig,
}

impl Finish<'_> {
    pub(crate) fn apply(&self, chart: Chart) -> Result<Chart> {
        let chart = match self.size {
            Some(size) => chart.sized(size, self.aspect, self.config),
            None => chart,
        };
        let colors = resolve_palette(self.palette, self.color, self.saturation, self.config)?;
        Ok(chart.configure_range(colors))
    }
}
