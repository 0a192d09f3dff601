//! Filled areas between two curves.

use crate::config::PlotConfig;
use crate::error::{Error, Result};
use crate::grammar::{Channel, Chart, Encoding, FieldDef, Mark, Table};
use crate::palette::Palette;
use crate::reshape::{build_table, Field};

use super::{color_channel, Finish};

/// Builder for an area between `y1` and `y2` over `x`.
#[derive(Debug, Clone)]
pub struct AreaPlot {
    x: Field,
    y1: Field,
    y2: Field,
    data: Option<Table>,
    color: Option<String>,
    palette: Option<Palette>,
    size: Option<f64>,
    aspect: f64,
    config: PlotConfig,
}

impl Default for AreaPlot {
    fn default() -> Self {
        Self::new()
    }
}

impl AreaPlot {
    /// Create a new area builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            x: Field::None,
            y1: Field::None,
            y2: Field::None,
            data: None,
            color: None,
            palette: None,
            size: None,
            aspect: 1.0,
            config: PlotConfig::default(),
        }
    }

    /// Set the x data.
    #[must_use]
    pub fn x(mut self, x: impl Into<Field>) -> Self {
        self.x = x.into();
        self
    }

    /// Lower curve.
    #[must_use]
    pub fn y1(mut self, y1: impl Into<Field>) -> Self {
        self.y1 = y1.into();
        self
    }

    /// Upper curve.
    #[must_use]
    pub fn y2(mut self, y2: impl Into<Field>) -> Self {
        self.y2 = y2.into();
        self
    }

    /// Set the source table.
    #[must_use]
    pub fn data(mut self, data: Table) -> Self {
        self.data = Some(data);
        self
    }

    /// Fill color: a column name or a literal color.
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
    /// Any of x, y1 or y2 missing, unknown columns, or an unparseable color.
    pub fn build(&self) -> Result<Chart> {
        let (table, names) = build_table(
            self.data.as_ref(),
            &[("x", self.x.clone()), ("y1", self.y1.clone()), ("y2", self.y2.clone())],
        )?;
        let x = names.get("x").ok_or(Error::MissingParameter("x"))?;
        let y1 = names.get("y1").ok_or(Error::MissingParameter("y1"))?;
        let y2 = names.get("y2").ok_or(Error::MissingParameter("y2"))?;
        let x_type = table.require(x)?.kind().field_type();

        let mut encoding = Encoding::new()
            .with(Channel::X, FieldDef::new(x, x_type))
            .with(Channel::Y, FieldDef::quantitative(y1))
            .with(Channel::Y2, FieldDef::quantitative(y2));
        if let Some(color) = &self.color {
            encoding.set(Channel::Color, color_channel(color, &table)?);
        }

        let chart = Chart::unit(Mark::area(), encoding).data(table);
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
