//! Line plots.

use crate::config::PlotConfig;
use crate::error::{Error, Result};
use crate::grammar::{Channel, Chart, Encoding, FieldDef, Mark, Table};
use crate::palette::Palette;
use crate::reshape::{build_table, Field};

use super::{color_channel, Finish};

/// Builder for line plots.
///
/// The x field type follows the column kind, so temporal and categorical
/// x values keep their ordering semantics. y is always quantitative.
#[derive(Debug, Clone)]
pub struct LinePlot {
    x: Field,
    y: Field,
    data: Option<Table>,
    color: Option<String>,
    palette: Option<Palette>,
    size: Option<f64>,
    aspect: f64,
    config: PlotConfig,
}

impl Default for LinePlot {
    fn default() -> Self {
        Self::new()
    }
}

impl LinePlot {
    /// Create a new line plot builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            x: Field::None,
            y: Field::None,
            data: None,
            color: None,
            palette: None,
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

    /// Line color: a column name splits one line per level.
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
    /// Missing x or y, unknown columns, or an unparseable color.
    pub fn build(&self) -> Result<Chart> {
        let (table, names) =
            build_table(self.data.as_ref(), &[("x", self.x.clone()), ("y", self.y.clone())])?;
        let x = names.get("x").ok_or(Error::MissingParameter("x"))?;
        let y = names.get("y").ok_or(Error::MissingParameter("y"))?;
        let x_type = table.require(x)?.kind().field_type();

        let mut encoding = Encoding::new()
            .with(Channel::X, FieldDef::new(x, x_type))
            .with(Channel::Y, FieldDef::quantitative(y));
        if let Some(color) = &self.color {
            encoding.set(Channel::Color, color_channel(color, &table)?);
        }

        let chart = Chart::unit(Mark::line(), encoding).data(table);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{ColumnData, FieldType, MarkType};

    #[test]
    fn test_line_types_follow_columns() {
        let table = Table::new()
            .with_column("t", ColumnData::Temporal(vec![0, 1000, 2000]))
            .unwrap()
            .with_column("v", vec![1.0, 3.0, 2.0])
            .unwrap();
        let chart = LinePlot::new().data(table).x("t").y("v").build().unwrap();
        assert_eq!(chart.mark().unwrap().mark_type, MarkType::Line);
        let enc = chart.encoding().unwrap();
        assert_eq!(enc.field(Channel::X).unwrap().field_type, FieldType::Temporal);
        assert_eq!(enc.field(Channel::Y).unwrap().field_type, FieldType::Quantitative);
    }

    #[test]
    fn test_line_color_column_sets_palette() {
        let table = Table::new()
            .with_column("a", vec![1.0, 2.0, 1.0, 2.0])
            .unwrap()
            .with_column("b", vec![1.0, 2.0, 2.0, 1.0])
            .unwrap()
            .with_column("g", vec!["p", "p", "q", "q"])
            .unwrap();
        let chart = LinePlot::new()
            .data(table)
            .x("a")
            .y("b")
            .color("g")
            .palette("muted")
            .size(4.0)
            .build()
            .unwrap();
        let v = chart.to_json();
        assert_eq!(v["encoding"]["color"]["field"], "g");
        assert!(v["config"]["range"]["category"].is_array());
        assert!(v["width"].is_number());
    }

    #[test]
    fn test_line_unknown_color_is_error() {
        let err = LinePlot::new()
            .x(vec![1.0])
            .y(vec![1.0])
            .color("not-a-color")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidColor(_)));
    }
}
