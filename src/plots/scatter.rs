//! Scatter plots.
//!
//! [`ScatterPlot`] draws two quantitative columns as circles. [`RelPlot`]
//! adds hue, style and size semantics and accepts wide-form tables.

use crate::config::PlotConfig;
use crate::error::{Error, Result};
use crate::grammar::{Channel, Chart, Column, ColumnData, Encoding, FieldDef, FieldType, Mark, Table};
use crate::palette::Palette;
use crate::reshape::{build_table, Field};
use crate::scale::Scale;

use super::{color_channel, Finish};

/// Default size range of the size channel.
pub const DEFAULT_SIZES: (f64, f64) = (10.0, 80.0);

const SERIES: &str = "series";
const SERIES_VALUE: &str = "y";

/// Quantitative x and y with axis titles.
pub(crate) fn scatter_encoding(x: &str, y: &str) -> Encoding {
    Encoding::new()
        .with(Channel::X, FieldDef::quantitative(x).axis_title(x))
        .with(Channel::Y, FieldDef::quantitative(y).axis_title(y))
}

/// Builder for scatter plots.
#[derive(Debug, Clone)]
pub struct ScatterPlot {
    x: Field,
    y: Field,
    data: Option<Table>,
    color: Option<String>,
    palette: Option<Palette>,
    saturation: f64,
    size: Option<f64>,
    aspect: f64,
    config: PlotConfig,
}

impl Default for ScatterPlot {
    fn default() -> Self {
        Self::new()
    }
}

impl ScatterPlot {
    /// Create a new scatter plot builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            x: Field::None,
            y: Field::None,
            data: None,
            color: None,
            palette: None,
            saturation: 1.0,
            size: None,
            aspect: 1.0,
            config: PlotConfig::default(),
        }
    }

    /// Set the x-axis data.
    #[must_use]
    pub fn x(mut self, x: impl Into<Field>) -> Self {
        self.x = x.into();
        self
    }

    /// Set the y-axis data.
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

    /// Point color: a column name or a literal color.
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

    /// Palette saturation.
    #[must_use]
    pub fn saturation(mut self, saturation: f64) -> Self {
        self.saturation = saturation;
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
    /// Missing x or y, unknown columns, or an unparseable color.
    pub fn build(&self) -> Result<Chart> {
        let (table, names) =
            build_table(self.data.as_ref(), &[("x", self.x.clone()), ("y", self.y.clone())])?;
        let x = names.get("x").ok_or(Error::MissingParameter("x"))?;
        let y = names.get("y").ok_or(Error::MissingParameter("y"))?;

        let mut encoding = scatter_encoding(x, y);
        if let Some(color) = &self.color {
            encoding.set(Channel::Color, color_channel(color, &table)?);
        }

        let chart = Chart::unit(Mark::circle(), encoding).data(table);
        Finish {
            size: self.size,
            aspect: self.aspect,
            palette: self.palette.as_ref(),
            color: None,
            saturation: self.saturation,
            config: &self.config,
        }
        .apply(chart)
    }
}

/// Builder for scatter plots with semantic groupings.
#[derive(Debug, Clone)]
pub struct RelPlot {
    x: Field,
    y: Field,
    hue: Field,
    style: Field,
    size_by: Field,
    data: Option<Table>,
    palette: Option<Palette>,
    sizes: (f64, f64),
    size: Option<f64>,
    aspect: f64,
    config: PlotConfig,
}

impl Default for RelPlot {
    fn default() -> Self {
        Self::new()
    }
}

impl RelPlot {
    /// Create a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            x: Field::None,
            y: Field::None,
            hue: Field::None,
            style: Field::None,
            size_by: Field::None,
            data: None,
            palette: None,
            sizes: DEFAULT_SIZES,
            size: None,
            aspect: 1.0,
            config: PlotConfig::default(),
        }
    }

    /// Set the x role.
    #[must_use]
    pub fn x(mut self, x: impl Into<Field>) -> Self {
        self.x = x.into();
        self
    }

    /// Set the y role.
    #[must_use]
    pub fn y(mut self, y: impl Into<Field>) -> Self {
        self.y = y.into();
        self
    }

    /// Group by color.
    #[must_use]
    pub fn hue(mut self, hue: impl Into<Field>) -> Self {
        self.hue = hue.into();
        self
    }

    /// Group by point shape.
    #[must_use]
    pub fn style(mut self, style: impl Into<Field>) -> Self {
        self.style = style.into();
        self
    }

    /// Scale point size by a column.
    #[must_use]
    pub fn size_by(mut self, size_by: impl Into<Field>) -> Self {
        self.size_by = size_by.into();
        self
    }

    /// Range of point sizes.
    #[must_use]
    pub fn sizes(mut self, min: f64, max: f64) -> Self {
        self.sizes = (min, max);
        self
    }

    /// Set the source table.
    #[must_use]
    pub fn data(mut self, data: Table) -> Self {
        self.data = Some(data);
        self
    }

    /// Palette.
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
    /// With neither x nor y, every numeric column of the table becomes a
    /// series plotted against the row index.
    ///
    /// # Errors
    ///
    /// Unknown columns, mismatched lengths, or a wide-form call without data.
    pub fn build(&self) -> Result<Chart> {
        let (table, x, y, hue, style, size_by) = if self.x.is_none() && self.y.is_none() {
            let (table, index) = self.wide_to_long()?;
            (table, index, SERIES_VALUE.to_string(), Some(SERIES.to_string()), Some(SERIES.to_string()), None)
        } else {
            let (table, names) = build_table(
                self.data.as_ref(),
                &[
                    ("x", self.x.clone()),
                    ("y", self.y.clone()),
                    ("hue", self.hue.clone()),
                    ("style", self.style.clone()),
                    ("size", self.size_by.clone()),
                ],
            )?;
            let owned = |role: &str| names.get(role).map(str::to_string);
            let x = owned("x").ok_or(Error::MissingParameter("x"))?;
            let y = owned("y").ok_or(Error::MissingParameter("y"))?;
            (table, x, y, owned("hue"), owned("style"), owned("size"))
        };

        let field_type = |name: &str| -> Result<FieldType> { Ok(table.require(name)?.kind().field_type()) };

        let mut encoding = Encoding::new()
            .with(Channel::X, FieldDef::new(&x, field_type(&x)?).axis_title(&x))
            .with(Channel::Y, FieldDef::quantitative(&y).axis_title(&y));
        if let Some(hue) = &hue {
            encoding.set(Channel::Color, FieldDef::new(hue, field_type(hue)?));
        }
        if let Some(style) = &style {
            table.require(style)?;
            encoding.set(Channel::Shape, FieldDef::nominal(style));
        }
        if let Some(size_by) = &size_by {
            encoding.set(
                Channel::Size,
                FieldDef::new(size_by, field_type(size_by)?)
                    .scale(Scale::size_range(self.sizes.0, self.sizes.1)),
            );
        }

        let chart = Chart::unit(Mark::circle(), encoding).data(table);
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

    /// Melt every numeric column against the row index.
    fn wide_to_long(&self) -> Result<(Table, String)> {
        let data = self.data.as_ref().ok_or(Error::MissingParameter("data"))?;
        let series = data.numeric_column_names();
        if series.is_empty() {
            return Err(Error::EmptyData);
        }
        let index = index_name(data);

        let mut wide = Table::new();
        let rows: Vec<f64> = (0..data.nrow()).map(|i| i as f64).collect();
        wide.push_column(Column::new(index.as_str(), ColumnData::Numeric(rows)))?;
        for name in &series {
            wide.push_column(data.require(name)?.clone())?;
        }
        let long = wide.melt(Some(&index), &series, SERIES, SERIES_VALUE)?;
        Ok((long, index))
    }
}

/// Name for the synthetic row-index column: `x`, else the first of
/// `index`, `index_1`, `index_2`, ... not already in `data`.
fn index_name(data: &Table) -> String {
    if !data.has_column("x") {
        return "x".to_string();
    }
    let mut name = "index".to_string();
    let mut suffix = 0;
    while data.has_column(&name) {
        suffix += 1;
        name = format!("index_{suffix}");
    }
    name
}
