//! Histograms.

use crate::config::PlotConfig;
use crate::error::{Error, Result};
use crate::grammar::{Bin, Channel, Chart, Encoding, FieldDef, Mark, Table};
use crate::palette::Palette;
use crate::reshape::{build_table, Field};

use super::{color_channel, Finish};

/// Builder for histograms.
///
/// Exactly one of x or y is binned; the other axis counts records.
#[derive(Debug, Clone)]
pub struct Histogram {
    x: Field,
    y: Field,
    data: Option<Table>,
    bins: Option<usize>,
    color: Option<String>,
    palette: Option<Palette>,
    size: Option<f64>,
    aspect: f64,
    config: PlotConfig,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    /// Create a new histogram builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            x: Field::None,
            y: Field::None,
            data: None,
            bins: None,
            color: None,
            palette: None,
            size: None,
            aspect: 1.0,
            config: PlotConfig::default(),
        }
    }

    /// Bin along x.
    #[must_use]
    pub fn x(mut self, x: impl Into<Field>) -> Self {
        self.x = x.into();
        self
    }

    /// Bin along y.
    #[must_use]
    pub fn y(mut self, y: impl Into<Field>) -> Self {
        self.y = y.into();
        self
    }

    /// Set the source table.
    #[must_use]
    pub fn data(mut self, data: Table) -> Self {
        self.data = Some(data);
        self
    }

    /// Maximum number of bins. Left unset, Vega-Lite picks the binning.
    #[must_use]
    pub fn bins(mut self, bins: usize) -> Self {
        self.bins = Some(bins);
        self
    }

    /// Bar color: a column name stacks one series per level.
    #[must_use]
    pub fn color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    /// Palette for a color column.
    #[must_use]
    pub fn palette(mut self, palette: impl Into<Palette>) -> Self {
        self.palette = Some(palette.into());
        self
    }

    /// Figure height in inches.
    #[must_use]
    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    /// Width-to-height ratio.
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

    /// Build the chart.
    ///
    /// # Errors
    ///
    /// [`Error::ConflictingParameters`] when both x and y are set,
    /// [`Error::MissingParameter`] when neither is.
    pub fn build(&self) -> Result<Chart> {
        let (binned, counted, field) = match (&self.x, &self.y) {
            (x, y) if x.is_some() && y.is_some() => {
                return Err(Error::ConflictingParameters { first: "`x`", second: "`y`" })
            }
            (x, _) if x.is_some() => (Channel::X, Channel::Y, ("x", x.clone())),
            (_, y) if y.is_some() => (Channel::Y, Channel::X, ("y", y.clone())),
            _ => return Err(Error::MissingParameter("`x` or `y`")),
        };
        let role = field.0;
        let (table, names) = build_table(self.data.as_ref(), &[field])?;
        let name = names.get(role).ok_or(Error::MissingParameter("`x` or `y`"))?;
        table.numeric(name)?;

        let bin = self.bins.map_or(Bin::Auto, Bin::MaxBins);
        let mut encoding = Encoding::new()
            .with(binned, FieldDef::quantitative(name).bin(bin))
            .with(counted, FieldDef::count());
        if let Some(color) = &self.color {
            encoding.set(Channel::Color, color_channel(color, &table)?);
        }

        let chart = Chart::unit(Mark::bar(), encoding).data(table);
        Finish {
            size: self.size,
            aspect: self.aspect,
            palette: self.palette.as_ref(),
            color: None,
            saturation: 1.0,
            config: &self.config,
        }
        .apply(chart)
    }
}
