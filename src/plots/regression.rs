//! Regression plots.
//!
//! Fitting is delegated to a [`RegressionRoutine`]; this module only lays
//! out what it returns. A [`RegPlot`] is a layer stack: every scatter layer
//! first, then every fit line with its confidence band. [`LmPlot`] repeats a
//! regression plot over the cells of a row/column grid with shared axes and
//! one shared color scale.

use crate::color::vega_color;
use crate::config::PlotConfig;
use crate::error::{Error, Result};
use crate::grammar::{
    Channel, ChannelDef, Chart, Column, ColumnData, Estimator, FieldDef, Mark, Table, Value,
};
use crate::palette::{resolve_palette, Palette};
use crate::reshape::{build_table, Field};
use crate::scale::{ColorScale, Scale};
use crate::stats::{padded_extent, DefaultRegression, RegressionOptions, RegressionRoutine, XCi};

use super::scatter::scatter_encoding;

/// Opacity of the confidence band.
pub const BAND_OPACITY: f64 = 0.15;

/// Default lmplot cell height in inches.
pub const DEFAULT_LM_SIZE: f64 = 5.0;

/// Extra mark properties for scatter or fit layers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkProps {
    /// Mark size.
    pub size: Option<f64>,
    /// Mark opacity.
    pub opacity: Option<f64>,
}

impl MarkProps {
    /// Set the mark size.
    #[must_use]
    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the mark opacity.
    #[must_use]
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    fn apply(&self, mut mark: Mark) -> Mark {
        if let Some(size) = self.size {
            mark = mark.size(size);
        }
        if let Some(opacity) = self.opacity {
            mark = mark.opacity(opacity);
        }
        mark
    }
}

/// How the layers of one group are colored.
enum GroupColor<'a> {
    None,
    Literal(String),
    Hue {
        column: &'a str,
        value: Value,
        scale: &'a ColorScale,
    },
}

impl GroupColor<'_> {
    fn channel(&self) -> Option<ChannelDef> {
        match self {
            GroupColor::None => None,
            GroupColor::Literal(color) => Some(ChannelDef::value(color.as_str())),
            GroupColor::Hue { column, scale, .. } => {
                Some(FieldDef::nominal(*column).scale(scale.to_scale()).into())
            }
        }
    }

    /// Add the constant hue column to a derived table.
    fn tag(&self, mut table: Table) -> Result<Table> {
        if let GroupColor::Hue { column, value, .. } = self {
            if !table.has_column(column) {
                let n = table.nrow();
                table.push_column(Column::new(*column, ColumnData::repeat(value, n)))?;
            }
        }
        Ok(table)
    }
}

/// Builder for a regression plot.
#[derive(Debug, Clone)]
pub struct RegPlot {
    x: Field,
    y: Field,
    data: Option<Table>,
    hue: Option<String>,
    color: Option<String>,
    palette: Option<Palette>,
    color_scale: Option<ColorScale>,
    options: RegressionOptions,
    x_range: Option<(f64, f64)>,
    y_range: Option<(f64, f64)>,
    scatter: bool,
    fit_reg: bool,
    units: Option<String>,
    scatter_kws: MarkProps,
    line_kws: MarkProps,
    size: Option<f64>,
    aspect: f64,
    config: PlotConfig,
}

impl Default for RegPlot {
    fn default() -> Self {
        Self::new()
    }
}

impl RegPlot {
    /// Create a new builder with a linear fit and a 95% band.
    #[must_use]
    pub fn new() -> Self {
        let config = PlotConfig::default();
        Self {
            x: Field::None,
            y: Field::None,
            data: None,
            hue: None,
            color: None,
            palette: None,
            color_scale: None,
            options: RegressionOptions {
                n_boot: config.n_boot,
                seed: config.seed,
                ..RegressionOptions::default()
            },
            x_range: None,
            y_range: None,
            scatter: true,
            fit_reg: true,
            units: None,
            scatter_kws: MarkProps::default(),
            line_kws: MarkProps::default(),
            size: None,
            aspect: 1.0,
            config,
        }
    }

    /// Set the predictor.
    #[must_use]
    pub fn x(mut self, x: impl Into<Field>) -> Self {
        self.x = x.into();
        self
    }

    /// Set the response.
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

    /// Fit one model per level of this column.
    #[must_use]
    pub fn hue(mut self, hue: &str) -> Self {
        self.hue = Some(hue.to_string());
        self
    }

    /// Literal color used when there is no hue.
    #[must_use]
    pub fn color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    /// Palette for hue levels.
    #[must_use]
    pub fn palette(mut self, palette: impl Into<Palette>) -> Self {
        self.palette = Some(palette.into());
        self
    }

    /// Reuse a color scale built elsewhere, so colors match across charts.
    #[must_use]
    pub fn color_scale(mut self, scale: ColorScale) -> Self {
        self.color_scale = Some(scale);
        self
    }

    /// Replace all fitting options.
    #[must_use]
    pub fn options(mut self, options: RegressionOptions) -> Self {
        self.options = options;
        self
    }

    /// Polynomial order.
    #[must_use]
    pub fn order(mut self, order: usize) -> Self {
        self.options.order = order;
        self
    }

    /// Logistic regression.
    #[must_use]
    pub fn logistic(mut self, logistic: bool) -> Self {
        self.options.logistic = logistic;
        self
    }

    /// Lowess smoother.
    #[must_use]
    pub fn lowess(mut self, lowess: bool) -> Self {
        self.options.lowess = lowess;
        self
    }

    /// Robust regression.
    #[must_use]
    pub fn robust(mut self, robust: bool) -> Self {
        self.options.robust = robust;
        self
    }

    /// Fit against `ln x`.
    #[must_use]
    pub fn logx(mut self, logx: bool) -> Self {
        self.options.logx = logx;
        self
    }

    /// Confidence band level; `None` draws no band.
    #[must_use]
    pub fn ci(mut self, ci: Option<f64>) -> Self {
        self.options.ci = ci;
        self
    }

    /// Bootstrap resamples.
    #[must_use]
    pub fn n_boot(mut self, n_boot: usize) -> Self {
        self.options.n_boot = n_boot;
        self
    }

    /// Limit the fit to the data range.
    #[must_use]
    pub fn truncate(mut self, truncate: bool) -> Self {
        self.options.truncate = truncate;
        self
    }

    /// Plot point estimates per distinct x instead of raw points.
    #[must_use]
    pub fn x_estimator(mut self, estimator: Estimator) -> Self {
        self.options.x_estimator = Some(estimator);
        self
    }

    /// Bin x before estimating.
    #[must_use]
    pub fn x_bins(mut self, bins: usize) -> Self {
        self.options.x_bins = Some(bins);
        self
    }

    /// Interval around point estimates.
    #[must_use]
    pub fn x_ci(mut self, x_ci: XCi) -> Self {
        self.options.x_ci = x_ci;
        self
    }

    /// x axis domain and fit range.
    #[must_use]
    pub fn x_range(mut self, lo: f64, hi: f64) -> Self {
        self.x_range = Some((lo, hi));
        self
    }

    /// y axis domain.
    #[must_use]
    pub fn y_range(mut self, lo: f64, hi: f64) -> Self {
        self.y_range = Some((lo, hi));
        self
    }

    /// Draw the scatter layers.
    #[must_use]
    pub fn scatter(mut self, scatter: bool) -> Self {
        self.scatter = scatter;
        self
    }

    /// Draw the fit layers.
    #[must_use]
    pub fn fit_reg(mut self, fit_reg: bool) -> Self {
        self.fit_reg = fit_reg;
        self
    }

    /// Sampling units. Accepted but not used for resampling.
    #[must_use]
    pub fn units(mut self, units: &str) -> Self {
        self.units = Some(units.to_string());
        self
    }

    /// Mark properties of scatter layers.
    #[must_use]
    pub fn scatter_kws(mut self, props: MarkProps) -> Self {
        self.scatter_kws = props;
        self
    }

    /// Mark properties of fit lines.
    #[must_use]
    pub fn line_kws(mut self, props: MarkProps) -> Self {
        self.line_kws = props;
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

    /// Plot configuration. Also resets the bootstrap count and seed.
    #[must_use]
    pub fn config(mut self, config: PlotConfig) -> Self {
        self.options.n_boot = config.n_boot;
        self.options.seed = config.seed;
        self.config = config;
        self
    }

    /// Build with the built-in fitting routine.
    ///
    /// # Errors
    ///
    /// See [`RegPlot::build_with`].
    pub fn build(&self) -> Result<Chart> {
        self.build_with(&DefaultRegression)
    }

    /// Build with a custom fitting routine.
    ///
    /// # Errors
    ///
    /// Missing or non-numeric x/y, an unknown hue column, an unparseable
    /// color, or any error of the routine.
    pub fn build_with<R: RegressionRoutine + ?Sized>(&self, routine: &R) -> Result<Chart> {
        let (table, names) =
            build_table(self.data.as_ref(), &[("x", self.x.clone()), ("y", self.y.clone())])?;
        let x = names.get("x").ok_or(Error::MissingParameter("x"))?;
        let y = names.get("y").ok_or(Error::MissingParameter("y"))?;
        let x_range = match self.x_range {
            Some(range) => Some(range),
            None => padded_extent(table.numeric(x)?),
        };
        table.numeric(y)?;
        if self.units.is_some() {
            log::warn!("units are accepted for compatibility and do not affect resampling");
        }

        let scale;
        let groups: Vec<(GroupColor<'_>, Table)> = match &self.hue {
            Some(hue) => {
                let levels = table.unique(hue)?;
                scale = match &self.color_scale {
                    Some(scale) => scale.clone(),
                    None => ColorScale::new(
                        levels.clone(),
                        resolve_palette(self.palette.as_ref(), None, 1.0, &self.config)?,
                    )?,
                };
                levels
                    .into_iter()
                    .map(|value| {
                        let part = table.filter_eq(hue, &value)?;
                        Ok((GroupColor::Hue { column: hue, value, scale: &scale }, part))
                    })
                    .collect::<Result<_>>()?
            }
            None => {
                let color = match &self.color {
                    Some(color) => GroupColor::Literal(vega_color(color)?),
                    None => GroupColor::None,
                };
                vec![(color, table.clone())]
            }
        };

        let layout = Layout { x, y, x_range, y_range: self.y_range };
        let mut layers = Vec::new();
        if self.scatter {
            for (color, part) in &groups {
                layers.extend(self.scatter_layers(routine, &layout, color, part)?);
            }
        }
        if self.fit_reg {
            for (color, part) in &groups {
                layers.extend(self.fit_layers(routine, &layout, color, part)?);
            }
        }
        log::debug!("regression plot with {} layers over {} groups", layers.len(), groups.len());

        let chart = Chart::layer(layers);
        Ok(match self.size {
            Some(size) => chart.sized(size, self.aspect, &self.config),
            None => chart,
        })
    }

    fn scatter_layers<R: RegressionRoutine + ?Sized>(
        &self,
        routine: &R,
        layout: &Layout<'_>,
        color: &GroupColor<'_>,
        part: &Table,
    ) -> Result<Vec<Chart>> {
        let circle = self.scatter_kws.apply(Mark::circle());
        if self.options.x_estimator.is_none() {
            return Ok(vec![layout.layer(circle, color, part.clone())]);
        }
        if part.nrow() == 0 {
            return Ok(Vec::new());
        }

        let estimate = routine.estimate_data(&self.options, part.numeric(layout.x)?, part.numeric(layout.y)?)?;
        let mut layers = Vec::new();
        for (&xv, ci) in estimate.x.iter().zip(&estimate.ci) {
            if let Some((lo, hi)) = ci {
                let rule = Table::new()
                    .with_column(layout.x, vec![xv, xv])?
                    .with_column(layout.y, vec![*lo, *hi])?;
                layers.push(layout.layer(Mark::line(), color, color.tag(rule)?));
            }
        }
        let points = Table::new()
            .with_column(layout.x, estimate.x)?
            .with_column(layout.y, estimate.y)?;
        layers.push(layout.layer(circle, color, color.tag(points)?));
        Ok(layers)
    }

    fn fit_layers<R: RegressionRoutine + ?Sized>(
        &self,
        routine: &R,
        layout: &Layout<'_>,
        color: &GroupColor<'_>,
        part: &Table,
    ) -> Result<Vec<Chart>> {
        if part.nrow() == 0 {
            log::debug!("skipping fit of an empty group");
            return Ok(Vec::new());
        }
        let fit = routine.fit_regression(
            &self.options,
            part.numeric(layout.x)?,
            part.numeric(layout.y)?,
            layout.x_range,
        )?;

        let line = Table::new()
            .with_column(layout.x, fit.grid.clone())?
            .with_column(layout.y, fit.yhat)?;
        let mut layers = vec![layout.layer(self.line_kws.apply(Mark::line()), color, color.tag(line)?)];

        if let Some((lower, upper)) = fit.bands {
            let upper_name = format!("{}_upper", layout.y);
            let band = Table::new()
                .with_column(layout.x, fit.grid)?
                .with_column(layout.y, lower)?
                .with_column(upper_name.as_str(), upper)?;
            let mut layer = layout.layer(Mark::area(), color, color.tag(band)?);
            if let Some(encoding) = layer.encoding_mut() {
                encoding.set(Channel::Y2, FieldDef::quantitative(&upper_name));
                encoding.set(Channel::Opacity, ChannelDef::value(BAND_OPACITY));
            }
            layers.push(layer);
        }
        Ok(layers)
    }
}

/// Shared axes of every layer.
struct Layout<'a> {
    x: &'a str,
    y: &'a str,
    x_range: Option<(f64, f64)>,
    y_range: Option<(f64, f64)>,
}

impl Layout<'_> {
    fn layer(&self, mark: Mark, color: &GroupColor<'_>, data: Table) -> Chart {
        let mut encoding = scatter_encoding(self.x, self.y);
        for (channel, range) in [(Channel::X, self.x_range), (Channel::Y, self.y_range)] {
            if let (Some((lo, hi)), Some(field)) =
                (range, encoding.get_mut(channel).and_then(ChannelDef::as_field_mut))
            {
                field.scale = Some(Scale::fixed_domain(lo, hi));
            }
        }
        if let Some(channel) = color.channel() {
            encoding.set(Channel::Color, channel);
        }
        Chart::unit(mark.clip(true), encoding).data(data)
    }
}

/// Builder for regression plots across a row/column grid.
#[derive(Debug, Clone)]
pub struct LmPlot {
    data: Table,
    x: String,
    y: String,
    hue: Option<String>,
    row: Option<String>,
    col: Option<String>,
    hue_order: Vec<Value>,
    row_order: Vec<Value>,
    col_order: Vec<Value>,
    col_wrap: Option<usize>,
    palette: Option<Palette>,
    size: f64,
    aspect: f64,
    regression: RegPlot,
}

impl LmPlot {
    /// Plot `y` against `x` from `data`.
    #[must_use]
    pub fn new(data: Table, x: &str, y: &str) -> Self {
        Self {
            data,
            x: x.to_string(),
            y: y.to_string(),
            hue: None,
            row: None,
            col: None,
            hue_order: Vec::new(),
            row_order: Vec::new(),
            col_order: Vec::new(),
            col_wrap: None,
            palette: None,
            size: DEFAULT_LM_SIZE,
            aspect: 1.0,
            regression: RegPlot::new(),
        }
    }

    /// Fit one model per level of this column within each cell.
    #[must_use]
    pub fn hue(mut self, hue: &str) -> Self {
        self.hue = Some(hue.to_string());
        self
    }

    /// One row of cells per level.
    #[must_use]
    pub fn row(mut self, row: &str) -> Self {
        self.row = Some(row.to_string());
        self
    }

    /// One column of cells per level.
    #[must_use]
    pub fn col(mut self, col: &str) -> Self {
        self.col = Some(col.to_string());
        self
    }

    /// Hue levels to place first.
    #[must_use]
    pub fn hue_order<V: Into<Value>>(mut self, order: impl IntoIterator<Item = V>) -> Self {
        self.hue_order = order.into_iter().map(Into::into).collect();
        self
    }

    /// Row levels to place first.
    #[must_use]
    pub fn row_order<V: Into<Value>>(mut self, order: impl IntoIterator<Item = V>) -> Self {
        self.row_order = order.into_iter().map(Into::into).collect();
        self
    }

    /// Column levels to place first.
    #[must_use]
    pub fn col_order<V: Into<Value>>(mut self, order: impl IntoIterator<Item = V>) -> Self {
        self.col_order = order.into_iter().map(Into::into).collect();
        self
    }

    /// Start a new row of cells after this many.
    #[must_use]
    pub fn col_wrap(mut self, col_wrap: usize) -> Self {
        self.col_wrap = Some(col_wrap.max(1));
        self
    }

    /// Palette for hue levels.
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

    /// Fitting and mark settings shared by every cell. Data, axes, hue and
    /// sizing of `regression` are ignored.
    #[must_use]
    pub fn regression(mut self, regression: RegPlot) -> Self {
        self.regression = regression;
        self
    }

    /// Build with the built-in fitting routine.
    ///
    /// # Errors
    ///
    /// See [`LmPlot::build_with`].
    pub fn build(&self) -> Result<Chart> {
        self.build_with(&DefaultRegression)
    }

    /// Build with a custom fitting routine.
    ///
    /// # Errors
    ///
    /// Unknown or non-numeric columns, or any error of [`RegPlot::build_with`].
    pub fn build_with<R: RegressionRoutine + ?Sized>(&self, routine: &R) -> Result<Chart> {
        let x_range = padded_extent(self.data.numeric(&self.x)?);
        let y_range = padded_extent(self.data.numeric(&self.y)?);
        let config = &self.regression.config;

        let rows = levels(&self.data, self.row.as_deref(), &self.row_order)?;
        let cols = levels(&self.data, self.col.as_deref(), &self.col_order)?;
        let scale = match &self.hue {
            Some(hue) => {
                let hues = levels(&self.data, Some(hue), &self.hue_order)?;
                let colors = resolve_palette(self.palette.as_ref(), None, 1.0, config)?;
                Some(ColorScale::new(hues.into_iter().flatten().collect(), colors)?)
            }
            None => None,
        };

        let mut grid: Vec<Vec<Chart>> = Vec::new();
        for r in &rows {
            let row_part = match (&self.row, r) {
                (Some(row), Some(r)) => self.data.filter_eq(row, r)?,
                _ => self.data.clone(),
            };
            let mut chart_row = Vec::new();
            for c in &cols {
                let part = match (&self.col, c) {
                    (Some(col), Some(c)) => row_part.filter_eq(col, c)?,
                    _ => row_part.clone(),
                };

                let mut cell = self.regression.clone();
                cell.data = Some(part);
                cell.x = Field::from(self.x.as_str());
                cell.y = Field::from(self.y.as_str());
                cell.hue = self.hue.clone();
                cell.color_scale = scale.clone();
                cell.x_range = x_range;
                cell.y_range = y_range;
                cell.size = None;

                let mut chart = cell.build_with(routine)?.sized(self.size, self.aspect, config);
                if let Some(title) = cell_title(self.row.as_deref(), r, self.col.as_deref(), c) {
                    chart = chart.title(title);
                }
                chart_row.push(chart);
                if self.col_wrap.is_some_and(|wrap| chart_row.len() >= wrap) {
                    grid.push(std::mem::take(&mut chart_row));
                }
            }
            if !chart_row.is_empty() {
                grid.push(chart_row);
            }
        }
        log::debug!("lmplot with {} rows of cells", grid.len());

        if grid.len() == 1 && grid[0].len() == 1 {
            if let Some(chart) = grid.pop().and_then(|mut row| row.pop()) {
                return Ok(chart);
            }
        }
        Ok(Chart::vconcat(grid.into_iter().map(Chart::hconcat).collect()))
    }
}

/// Levels of `column`: the explicit order first, then the remaining values
/// in order of appearance. A missing column yields one unnamed level.
fn levels(table: &Table, column: Option<&str>, order: &[Value]) -> Result<Vec<Option<Value>>> {
    let Some(column) = column else {
        return Ok(vec![None]);
    };
    let mut out: Vec<Value> = order.to_vec();
    for value in table.unique(column)? {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    Ok(out.into_iter().map(Some).collect())
}

fn cell_title(
    row: Option<&str>,
    r: &Option<Value>,
    col: Option<&str>,
    c: &Option<Value>,
) -> Option<String> {
    let part = |name: Option<&str>, level: &Option<Value>| match (name, level) {
        (Some(name), Some(level)) => Some(format!("{name} = {}", level.label())),
        _ => None,
    };
    match (part(row, r), part(col, c)) {
        (Some(r), Some(c)) => Some(format!("{r} | {c}")),
        (Some(t), None) | (None, Some(t)) => Some(t),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{ChartBody, MarkType};
    use crate::stats::RegressionFit;
    use serde_json::json;

    fn linear() -> Table {
        Table::new()
            .with_column("x", vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0])
            .unwrap()
            .with_column("y", vec![1.0, 3.0, 5.0, 7.0, 9.0, 11.0])
            .unwrap()
            .with_column("g", vec!["a", "b", "c", "a", "b", "c"])
            .unwrap()
            .with_column("side", vec!["l", "l", "l", "r", "r", "r"])
            .unwrap()
    }

    /// Routine returning a flat line without touching the data.
    struct FlatLine;

    impl RegressionRoutine for FlatLine {
        fn fit_regression(
            &self,
            _opts: &RegressionOptions,
            _x: &[f64],
            _y: &[f64],
            x_range: Option<(f64, f64)>,
        ) -> Result<RegressionFit> {
            let (lo, hi) = x_range.unwrap_or((0.0, 1.0));
            Ok(RegressionFit {
                grid: vec![lo, hi],
                yhat: vec![0.0, 0.0],
                bands: Some((vec![-1.0, -1.0], vec![1.0, 1.0])),
            })
        }
    }

    fn marks(chart: &Chart) -> Vec<MarkType> {
        chart.layers().iter().map(|l| l.mark().unwrap().mark_type).collect()
    }

    #[test]
    fn test_regplot_layers() {
        let chart = RegPlot::new().data(linear()).x("x").y("y").n_boot(50).build().unwrap();
        assert_eq!(marks(&chart), vec![MarkType::Circle, MarkType::Line, MarkType::Area]);
        for layer in chart.layers() {
            assert_eq!(layer.mark().unwrap().clip, Some(true));
            let x = layer.encoding().unwrap().field(Channel::X).unwrap();
            assert_eq!(x.scale.as_ref().unwrap().nice, Some(false));
        }
        let band = chart.layers()[2].to_json();
        assert_eq!(band["encoding"]["opacity"], json!({"value": 0.15}));
        assert_eq!(band["encoding"]["y2"]["field"], "y_upper");
        assert!(chart.config.is_none());
    }

    #[test]
    fn test_regplot_default_x_range_is_padded() {
        let chart = RegPlot::new().data(linear()).x("x").y("y").ci(None).build().unwrap();
        let v = chart.layers()[0].to_json();
        assert_eq!(v["encoding"]["x"]["scale"]["domain"], json!([-0.25, 5.25]));
        assert!(v["encoding"]["y"]["scale"].is_null());
    }

    #[test]
    fn test_regplot_toggles() {
        let base = RegPlot::new().data(linear()).x("x").y("y").ci(None);
        assert_eq!(marks(&base.clone().scatter(false).build().unwrap()), vec![MarkType::Line]);
        assert_eq!(marks(&base.fit_reg(false).build().unwrap()), vec![MarkType::Circle]);
    }

    #[test]
    fn test_regplot_hue_shares_scale() {
        let chart = RegPlot::new()
            .data(linear())
            .x("x")
            .y("y")
            .hue("g")
            .build_with(&FlatLine)
            .unwrap();
        // 3 scatter layers, then 3 (line, band) pairs.
        assert_eq!(chart.layers().len(), 9);
        assert!(marks(&chart)[..3].iter().all(|m| *m == MarkType::Circle));

        let scales: Vec<_> = chart
            .layers()
            .iter()
            .map(|l| l.encoding().unwrap().field(Channel::Color).unwrap().scale.clone())
            .collect();
        assert!(scales.windows(2).all(|w| w[0] == w[1]));
        let domain = scales[0].as_ref().unwrap().domain.clone().unwrap();
        assert_eq!(domain, json!(["a", "b", "c"]));

        let fit = chart.layers()[3].data.as_ref().unwrap();
        assert!(fit.has_column("g"));
    }

    #[test]
    fn test_regplot_literal_color() {
        let chart = RegPlot::new()
            .x(vec![1.0, 2.0, 3.0])
            .y(vec![2.0, 4.0, 7.0])
            .color("k")
            .build_with(&FlatLine)
            .unwrap();
        for layer in chart.layers() {
            let color = layer.encoding().unwrap().get(Channel::Color).unwrap();
            assert_eq!(color.as_value().unwrap(), &json!("rgba(0,0,0,1)"));
        }
    }

    #[test]
    fn test_regplot_x_estimator() {
        let table = Table::new()
            .with_column("x", vec![1.0, 1.0, 2.0, 2.0])
            .unwrap()
            .with_column("y", vec![1.0, 3.0, 2.0, 4.0])
            .unwrap();
        let chart = RegPlot::new()
            .data(table)
            .x("x")
            .y("y")
            .x_estimator(Estimator::Mean)
            .x_ci(XCi::Sd)
            .fit_reg(false)
            .build()
            .unwrap();
        assert_eq!(marks(&chart), vec![MarkType::Line, MarkType::Line, MarkType::Circle]);
        let points = chart.layers()[2].data.as_ref().unwrap();
        assert_eq!(points.numeric("y").unwrap(), &[2.0, 3.0]);
    }

    #[test]
    fn test_regplot_propagates_conflicts() {
        let err = RegPlot::new()
            .data(linear())
            .x("x")
            .y("y")
            .robust(true)
            .lowess(true)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::ConflictingParameters { .. }));
    }

    #[test]
    fn test_lmplot_single_cell_is_bare() {
        let chart = LmPlot::new(linear(), "x", "y").build_with(&FlatLine).unwrap();
        assert!(matches!(chart.body, ChartBody::Layer(_)));
        assert!(chart.title.is_none());
        let (w, h) = PlotConfig::default().dimensions(DEFAULT_LM_SIZE, 1.0);
        assert_eq!((chart.width, chart.height), (Some(w), Some(h)));
        let y = chart.layers()[0].encoding().unwrap().field(Channel::Y).unwrap();
        assert_eq!(y.scale.as_ref().unwrap().domain, Some(json!([0.5, 11.5])));
    }

    #[test]
    fn test_lmplot_grid_titles_and_wrap() {
        let chart = LmPlot::new(linear(), "x", "y")
            .row("side")
            .col("g")
            .col_order(["c"])
            .build_with(&FlatLine)
            .unwrap();
        let rows = chart.concat();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].concat().len(), 3);
        assert_eq!(rows[0].concat()[0].title.as_deref(), Some("side = l | g = c"));

        let wrapped = LmPlot::new(linear(), "x", "y")
            .col("g")
            .col_wrap(2)
            .build_with(&FlatLine)
            .unwrap();
        let rows = wrapped.concat();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].concat().len(), 2);
        assert_eq!(rows[1].concat().len(), 1);
        assert_eq!(rows[1].concat()[0].title.as_deref(), Some("g = c"));
    }

    #[test]
    fn test_lmplot_hue_scale_covers_all_levels() {
        let chart = LmPlot::new(linear(), "x", "y")
            .col("side")
            .hue("g")
            .hue_order(["b"])
            .regression(RegPlot::new().ci(None))
            .build_with(&FlatLine)
            .unwrap();
        let cell = &chart.concat()[0].concat()[0];
        let color = cell.layers()[0].encoding().unwrap().field(Channel::Color).unwrap();
        assert_eq!(color.scale.as_ref().unwrap().domain, Some(json!(["b", "a", "c"])));
    }

    #[test]
    fn test_lmplot_domain_contains_large_magnitudes() {
        let xs: Vec<f64> = (0..8).map(|i| 1_700_000_100.0 + f64::from(i)).collect();
        let ys: Vec<f64> = (0..8).map(|i| 2.5e6 + 3.0 * f64::from(i)).collect();
        let table = Table::new()
            .with_column("x", xs.clone())
            .unwrap()
            .with_column("y", ys.clone())
            .unwrap();
        let chart = LmPlot::new(table, "x", "y")
            .regression(RegPlot::new().ci(None))
            .build()
            .unwrap();
        assert_eq!(marks(&chart), vec![MarkType::Circle, MarkType::Line]);

        let fit = chart.layers()[1].data.as_ref().unwrap();
        let grid = fit.numeric("x").unwrap().to_vec();
        for layer in chart.layers() {
            let encoding = layer.encoding().unwrap();
            for (channel, values) in [(Channel::X, &xs), (Channel::Y, &ys), (Channel::X, &grid)] {
                let scale = encoding.field(channel).unwrap().scale.as_ref().unwrap();
                let domain = scale.domain.clone().unwrap();
                let (lo, hi) = (domain[0].as_f64().unwrap(), domain[1].as_f64().unwrap());
                assert!(lo < hi);
                assert!(values.iter().all(|v| (lo..=hi).contains(v)), "{values:?} outside [{lo}, {hi}]");
            }
        }
    }

    #[test]
    fn test_cell_title() {
        let l = Some(Value::from("l"));
        assert_eq!(cell_title(Some("side"), &l, None, &None).as_deref(), Some("side = l"));
        assert_eq!(cell_title(None, &None, None, &None), None);
    }
}
