//! Categorical plots: bar, count, point, strip and box.
//!
//! One builder carries the arguments shared by every kind; the kind is
//! picked by calling the matching method or by [`CategoricalPlot::build`].

use std::fmt;
use std::str::FromStr;

use crate::config::PlotConfig;
use crate::error::{Error, Result};
use crate::grammar::{
    Aggregate, Channel, ChannelDef, Chart, Encoding, Estimator, FieldDef, Mark, Table,
};
use crate::orient::{infer_orient, Orientation};
use crate::palette::{resolve_palette, Palette};
use crate::reshape::{build_table, Field, FieldNames};

use super::Finish;

/// Column names produced when a box plot melts every numeric column.
const MELT_VAR: &str = "column";
const MELT_VALUE: &str = "value";

/// Median tick of a box plot.
const MEDIAN_TICK_SIZE: f64 = 18.0;

/// Categorical plot kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotKind {
    /// Aggregated bars.
    Bar,
    /// Bars of record counts.
    Count,
    /// Aggregated points, optionally joined.
    Point,
    /// Raw values as ticks.
    Strip,
    /// Quartile boxes.
    Box,
}

impl PlotKind {
    /// Lowercase name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            PlotKind::Bar => "bar",
            PlotKind::Count => "count",
            PlotKind::Point => "point",
            PlotKind::Strip => "strip",
            PlotKind::Box => "box",
        }
    }

    /// Whether this kind aggregates with an estimator and confidence interval.
    #[must_use]
    pub fn uses_estimator(self) -> bool {
        matches!(self, PlotKind::Bar | PlotKind::Point)
    }
}

impl FromStr for PlotKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bar" => Ok(PlotKind::Bar),
            "count" => Ok(PlotKind::Count),
            "point" => Ok(PlotKind::Point),
            "strip" => Ok(PlotKind::Strip),
            "box" => Ok(PlotKind::Box),
            other => Err(Error::UnknownPlotKind(other.to_string())),
        }
    }
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Builder for categorical plots.
#[derive(Debug, Clone)]
pub struct CategoricalPlot {
    x: Field,
    y: Field,
    hue: Field,
    data: Option<Table>,
    estimator: Estimator,
    ci: Option<f64>,
    join: bool,
    dodge: Option<bool>,
    orient: Option<String>,
    color: Option<String>,
    palette: Option<Palette>,
    saturation: Option<f64>,
    size: Option<f64>,
    aspect: f64,
    jitter: Option<f64>,
    whis: Option<f64>,
    config: PlotConfig,
}

impl Default for CategoricalPlot {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolved roles of one call.
struct Resolved {
    table: Table,
    names: FieldNames,
}

impl Resolved {
    fn get(&self, role: &str) -> Option<String> {
        self.names.get(role).map(str::to_string)
    }
}

impl CategoricalPlot {
    /// Create a builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            x: Field::None,
            y: Field::None,
            hue: Field::None,
            data: None,
            estimator: Estimator::Mean,
            ci: Some(95.0),
            join: true,
            dodge: None,
            orient: None,
            color: None,
            palette: None,
            saturation: None,
            size: None,
            aspect: 1.0,
            jitter: None,
            whis: None,
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

    /// Set the hue role.
    #[must_use]
    pub fn hue(mut self, hue: impl Into<Field>) -> Self {
        self.hue = hue.into();
        self
    }

    /// Set the source table.
    #[must_use]
    pub fn data(mut self, data: Table) -> Self {
        self.data = Some(data);
        self
    }

    /// Set the estimator.
    #[must_use]
    pub fn estimator(mut self, estimator: Estimator) -> Self {
        self.estimator = estimator;
        self
    }

    /// Set the confidence level (`None` disables the interval).
    #[must_use]
    pub fn ci(mut self, ci: Option<f64>) -> Self {
        self.ci = ci;
        self
    }

    /// Join point estimates with a line.
    #[must_use]
    pub fn join(mut self, join: bool) -> Self {
        self.join = join;
        self
    }

    /// Separate hue levels into facets.
    #[must_use]
    pub fn dodge(mut self, dodge: bool) -> Self {
        self.dodge = Some(dodge);
        self
    }

    /// Force the orientation (`"v"` or `"h"`).
    #[must_use]
    pub fn orient(mut self, orient: &str) -> Self {
        self.orient = Some(orient.to_string());
        self
    }

    /// Single color for the palette.
    #[must_use]
    pub fn color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    /// Palette.
    #[must_use]
    pub fn palette(mut self, palette: impl Into<Palette>) -> Self {
        self.palette = Some(palette.into());
        self
    }

    /// Saturation of the palette colors.
    #[must_use]
    pub fn saturation(mut self, saturation: f64) -> Self {
        self.saturation = Some(saturation);
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

    /// Accepted for compatibility; strip plots are drawn without jitter.
    #[must_use]
    pub fn jitter(mut self, jitter: f64) -> Self {
        self.jitter = Some(jitter);
        self
    }

    /// Accepted for compatibility; whiskers always span min to max.
    #[must_use]
    pub fn whis(mut self, whis: f64) -> Self {
        self.whis = Some(whis);
        self
    }

    /// Plot configuration.
    #[must_use]
    pub fn config(mut self, config: PlotConfig) -> Self {
        self.config = config;
        self
    }

    pub(crate) fn has_hue(&self) -> bool {
        self.hue.is_some()
    }

    pub(crate) fn has_palette(&self) -> bool {
        self.palette.is_some()
    }

    pub(crate) fn size_value(&self) -> Option<f64> {
        self.size
    }

    pub(crate) fn aspect_value(&self) -> f64 {
        self.aspect
    }

    pub(crate) fn data_ref(&self) -> Option<&Table> {
        self.data.as_ref()
    }

    pub(crate) fn config_ref(&self) -> &PlotConfig {
        &self.config
    }

    /// Build the chart for `kind`.
    ///
    /// # Errors
    ///
    /// See the method of each kind.
    pub fn build(&self, kind: PlotKind) -> Result<Chart> {
        match kind {
            PlotKind::Bar => self.bar(),
            PlotKind::Count => self.count(),
            PlotKind::Point => self.point(),
            PlotKind::Strip => self.strip(),
            PlotKind::Box => self.boxplot(),
        }
    }

    fn resolve(&self) -> Result<Resolved> {
        let (table, names) = build_table(
            self.data.as_ref(),
            &[("x", self.x.clone()), ("y", self.y.clone()), ("hue", self.hue.clone())],
        )?;
        Ok(Resolved { table, names })
    }

    fn orientation(&self, r: &Resolved, x: &str, y: &str) -> Result<Orientation> {
        infer_orient(r.table.column(x), r.table.column(y), self.orient.as_deref())
    }

    fn finish(&self, chart: Chart) -> Result<Chart> {
        Finish {
            size: self.size,
            aspect: self.aspect,
            palette: self.palette.as_ref(),
            color: self.color.as_deref(),
            saturation: self.saturation.unwrap_or(self.config.saturation),
            config: &self.config,
        }
        .apply(chart)
    }

    /// Aggregated bars with an optional confidence rule.
    ///
    /// # Errors
    ///
    /// Missing x or y, an invalid estimator/ci combination, ambiguous
    /// orientation or unknown columns.
    pub fn bar(&self) -> Result<Chart> {
        let r = self.resolve()?;
        let x = r.get("x").ok_or(Error::MissingParameter("x"))?;
        let y = r.get("y").ok_or(Error::MissingParameter("y"))?;
        let orient = self.orientation(&r, &x, &y)?;
        let (category, value) = match orient {
            Orientation::Vertical => (x, y),
            Orientation::Horizontal => (y, x),
        };
        self.estimator.validate_ci(self.ci)?;
        self.bar_chart(r, &category, Some(&value), orient, self.estimator, self.ci)
    }

    /// Bars counting records per category. Exactly one of x and y is used.
    ///
    /// # Errors
    ///
    /// [`Error::MissingParameter`] when neither is given,
    /// [`Error::ConflictingParameters`] when both are.
    pub fn count(&self) -> Result<Chart> {
        let orient = match (self.x.is_some(), self.y.is_some()) {
            (true, false) => Orientation::Vertical,
            (false, true) => Orientation::Horizontal,
            (true, true) => {
                return Err(Error::ConflictingParameters {
                    first: "`x`",
                    second: "`y`",
                })
            }
            (false, false) => return Err(Error::MissingParameter("`x` or `y`")),
        };
        let r = self.resolve()?;
        let role = match orient {
            Orientation::Vertical => "x",
            Orientation::Horizontal => "y",
        };
        let category = r.get(role).ok_or(Error::MissingParameter("`x` or `y`"))?;
        self.bar_chart(r, &category, None, orient, Estimator::Count, None)
    }

    fn bar_chart(
        &self,
        r: Resolved,
        category: &str,
        value: Option<&str>,
        orient: Orientation,
        estimator: Estimator,
        ci: Option<f64>,
    ) -> Result<Chart> {
        let hue = r.get("hue");
        let dodge = self.dodge.unwrap_or(true);
        let cat_channel = orient.category_channel();
        let value_channel = orient.value_channel();
        let cat_field = match (&hue, dodge) {
            (Some(h), true) => h.as_str(),
            _ => category,
        };

        let value_def = match value {
            Some(v) => FieldDef::quantitative(v).aggregate(estimator.aggregate()).axis_title(v),
            None => FieldDef::count().axis_title("count"),
        };
        let color = match &hue {
            Some(h) => FieldDef::nominal(h).legend_hidden(dodge),
            None => FieldDef::nominal(category).hide_legend(),
        };
        let encoding = Encoding::new()
            .with(value_channel, value_def)
            .with(Channel::Color, color)
            .with(cat_channel, FieldDef::nominal(cat_field));
        let bars = Chart::unit(Mark::bar(), encoding);

        let chart = match (ci, value) {
            (Some(_), Some(v)) => {
                let rule = Chart::unit(Mark::rule(), ci_encoding(v, orient, cat_field));
                Chart::layer(vec![bars, rule])
            }
            _ => bars,
        };
        let chart = chart.data(r.table);
        let chart = match hue {
            Some(_) if dodge => chart.facet(orient.dodge_facet(category))?,
            _ => chart,
        };
        self.finish(chart)
    }

    /// Aggregated points, an optional joining line and an optional
    /// confidence rule.
    ///
    /// # Errors
    ///
    /// Missing x or y, an invalid estimator/ci combination, ambiguous
    /// orientation or unknown columns.
    pub fn point(&self) -> Result<Chart> {
        let r = self.resolve()?;
        let x = r.get("x").ok_or(Error::MissingParameter("x"))?;
        let y = r.get("y").ok_or(Error::MissingParameter("y"))?;
        let orient = self.orientation(&r, &x, &y)?;
        let (category, value) = match orient {
            Orientation::Vertical => (x, y),
            Orientation::Horizontal => (y, x),
        };
        self.estimator.validate_ci(self.ci)?;

        let color: ChannelDef = match r.get("hue") {
            Some(h) => FieldDef::nominal(&h).into(),
            None => {
                let saturation = self.saturation.unwrap_or(self.config.saturation);
                let palette = resolve_palette(
                    self.palette.as_ref(),
                    self.color.as_deref(),
                    saturation,
                    &self.config,
                )?;
                ChannelDef::value(palette.into_iter().next().unwrap_or_default())
            }
        };

        let encoding = Encoding::new()
            .with(
                orient.value_channel(),
                FieldDef::quantitative(&value).aggregate(self.estimator.aggregate()),
            )
            .with(orient.category_channel(), FieldDef::nominal(&category))
            .with(Channel::Color, color.clone());

        let mut layers = vec![Chart::unit(Mark::circle(), encoding.clone())];
        if self.join {
            layers.push(Chart::unit(Mark::line(), encoding));
        }
        if self.ci.is_some() {
            let mut rule = ci_encoding(&value, orient, &category);
            rule.set(Channel::Color, color);
            layers.push(Chart::unit(Mark::rule(), rule));
        }

        let chart = if layers.len() == 1 {
            layers.remove(0)
        } else {
            Chart::layer(layers)
        };
        self.finish(chart.data(r.table))
    }

    /// Raw values drawn as ticks. Dodging is off unless requested.
    ///
    /// # Errors
    ///
    /// Missing x and y, ambiguous orientation or unknown columns.
    pub fn strip(&self) -> Result<Chart> {
        if self.jitter.is_some() {
            log::warn!("stripplot: jitter is not supported and will be ignored");
        }
        let r = self.resolve()?;
        let hue = r.get("hue");
        let dodge = self.dodge.unwrap_or(false);

        let (encoding, facet) = match (r.get("x"), r.get("y")) {
            (Some(x), Some(y)) => {
                let orient = self.orientation(&r, &x, &y)?;
                let (category, value) = match orient {
                    Orientation::Vertical => (x, y),
                    Orientation::Horizontal => (y, x),
                };
                let cat_field = match (&hue, dodge) {
                    (Some(h), true) => h.clone(),
                    _ => category.clone(),
                };
                let mut encoding = Encoding::new()
                    .with(orient.value_channel(), FieldDef::quantitative(&value))
                    .with(orient.category_channel(), FieldDef::nominal(&cat_field))
                    .with(Channel::Color, FieldDef::nominal(&category).hide_legend());
                if let Some(h) = &hue {
                    encoding.set(Channel::Color, FieldDef::nominal(h).legend_hidden(dodge));
                }
                let facet = (hue.is_some() && dodge).then(|| orient.dodge_facet(&category));
                (encoding, facet)
            }
            (Some(single), None) | (None, Some(single)) => {
                let mut encoding =
                    Encoding::new().with(Channel::X, FieldDef::quantitative(&single));
                if let Some(h) = &hue {
                    encoding.set(Channel::Color, FieldDef::nominal(h).legend_hidden(dodge));
                }
                (encoding, None)
            }
            (None, None) => return Err(Error::MissingParameter("`x` or `y`")),
        };

        let chart = Chart::unit(Mark::tick(), encoding).data(r.table);
        let chart = match facet {
            Some(facet) => chart.facet(facet)?,
            None => chart,
        };
        self.finish(chart)
    }

    /// Box plot as layered rule (min to max), bar (q1 to q3) and median tick.
    ///
    /// With neither x nor y, every numeric column of the table is drawn as
    /// its own box.
    ///
    /// # Errors
    ///
    /// Ambiguous orientation, unknown columns or no data to melt.
    pub fn boxplot(&self) -> Result<Chart> {
        if self.whis.is_some() {
            log::warn!("boxplot: whis is not supported; whiskers span the full range");
        }
        let r = if self.x.is_none() && self.y.is_none() {
            let table = self.data.as_ref().ok_or(Error::MissingParameter("data"))?;
            let numeric = table.numeric_column_names();
            if numeric.is_empty() {
                return Err(Error::EmptyData);
            }
            let melted = table.melt(None, &numeric, MELT_VAR, MELT_VALUE)?;
            let (x, y) = match self.orient.as_deref().and_then(Orientation::parse) {
                Some(Orientation::Horizontal) => (MELT_VALUE, MELT_VAR),
                _ => (MELT_VAR, MELT_VALUE),
            };
            let (table, names) = build_table(
                Some(&melted),
                &[("x", x.into()), ("y", y.into()), ("hue", self.hue.clone())],
            )?;
            Resolved { table, names }
        } else {
            self.resolve()?
        };

        let (category, value, orient) = match (r.get("x"), r.get("y")) {
            (Some(x), Some(y)) => match self.orientation(&r, &x, &y)? {
                Orientation::Vertical => (Some(x), y, Orientation::Vertical),
                Orientation::Horizontal => (Some(y), x, Orientation::Horizontal),
            },
            (Some(single), None) | (None, Some(single)) => {
                match self.orient.as_deref().and_then(Orientation::parse) {
                    Some(Orientation::Vertical) => (None, single, Orientation::Vertical),
                    _ => (None, single, Orientation::Horizontal),
                }
            }
            (None, None) => return Err(Error::MissingParameter("`x` or `y`")),
        };

        let hue = r.get("hue");
        let dodge = self.dodge.unwrap_or(true);
        let value_channel = orient.value_channel();
        let cat_channel = orient.category_channel();
        let cat_field = match (&hue, dodge) {
            (Some(h), true) => Some(h.clone()),
            _ => category.clone(),
        };

        let layer = |lower: Aggregate, upper: Option<Aggregate>| {
            let mut enc = Encoding::new().with(value_channel, FieldDef::quantitative(&value).aggregate(lower));
            if let Some(upper) = upper {
                enc.set(value_channel.secondary(), FieldDef::quantitative(&value).aggregate(upper));
            }
            if let Some(c) = &cat_field {
                enc.set(cat_channel, FieldDef::nominal(c));
            }
            enc
        };

        let range = layer(Aggregate::Min, Some(Aggregate::Max));
        let mut boxes = layer(Aggregate::Q1, Some(Aggregate::Q3));
        if let Some(def) = boxes.get_mut(value_channel).and_then(ChannelDef::as_field_mut) {
            def.axis = Some(crate::grammar::Axis {
                title: value.clone(),
            });
        }
        if let Some(c) = &category {
            boxes.set(Channel::Color, FieldDef::nominal(c).hide_legend());
        }
        if let Some(h) = &hue {
            boxes.set(Channel::Color, FieldDef::nominal(h).legend_hidden(dodge));
        }
        let median = layer(Aggregate::Median, None);

        let chart = Chart::layer(vec![
            Chart::unit(Mark::rule(), range),
            Chart::unit(Mark::bar(), boxes),
            Chart::unit(Mark::tick().size(MEDIAN_TICK_SIZE).color("black"), median),
        ])
        .data(r.table);
        let chart = match (&hue, &category) {
            (Some(_), Some(c)) if dodge => chart.facet(orient.dodge_facet(c))?,
            _ => chart,
        };
        self.finish(chart)
    }
}

/// Rule spanning the 95% confidence bounds of `value`.
fn ci_encoding(value: &str, orient: Orientation, category: &str) -> Encoding {
    let value_channel = orient.value_channel();
    Encoding::new()
        .with(value_channel, FieldDef::quantitative(value).aggregate(Aggregate::Ci0))
        .with(value_channel.secondary(), FieldDef::quantitative(value).aggregate(Aggregate::Ci1))
        .with(orient.category_channel(), FieldDef::nominal(category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{ChartBody, MarkType};
    use serde_json::json;

    fn sample() -> Table {
        Table::new()
            .with_column("group", vec!["a", "a", "b", "b"])
            .unwrap()
            .with_column("value", vec![1.0, 3.0, 2.0, 4.0])
            .unwrap()
            .with_column("kind", vec!["u", "v", "u", "v"])
            .unwrap()
    }

    fn plot() -> CategoricalPlot {
        CategoricalPlot::new().data(sample()).x("group").y("value")
    }

    #[test]
    fn test_plot_kind_from_str() {
        assert_eq!("box".parse::<PlotKind>().unwrap(), PlotKind::Box);
        assert_eq!("strip".parse::<PlotKind>().unwrap(), PlotKind::Strip);
        assert!(matches!("violin".parse::<PlotKind>(), Err(Error::UnknownPlotKind(_))));
        assert!(PlotKind::Point.uses_estimator());
        assert!(!PlotKind::Count.uses_estimator());
    }

    #[test]
    fn test_bar_without_ci() {
        let chart = plot().ci(None).bar().unwrap();
        assert_eq!(chart.mark().unwrap().mark_type, MarkType::Bar);
        let v = chart.to_json();
        assert_eq!(
            v["encoding"]["y"],
            json!({"field": "value", "type": "quantitative", "aggregate": "mean", "axis": {"title": "value"}})
        );
        assert_eq!(v["encoding"]["x"]["field"], "group");
        assert!(v["encoding"]["color"]["legend"].is_null());
        assert_eq!(v["config"]["range"]["category"].as_array().unwrap().len(), 10);
    }

    #[test]
    fn test_bar_with_ci_layers_rule() {
        let chart = plot().bar().unwrap();
        let layers = chart.layers();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[1].mark().unwrap().mark_type, MarkType::Rule);
        let enc = layers[1].encoding().unwrap();
        assert_eq!(enc.field(Channel::Y).unwrap().aggregate, Some(Aggregate::Ci0));
        assert_eq!(enc.field(Channel::Y2).unwrap().aggregate, Some(Aggregate::Ci1));
        assert!(chart.data.is_some());
        assert!(layers[0].data.is_none());
    }

    #[test]
    fn test_bar_horizontal() {
        let chart = CategoricalPlot::new()
            .data(sample())
            .x("value")
            .y("group")
            .ci(None)
            .bar()
            .unwrap();
        let enc = chart.encoding().unwrap();
        assert_eq!(enc.field(Channel::X).unwrap().aggregate, Some(Aggregate::Mean));
        assert_eq!(enc.field(Channel::Y).unwrap().field.as_deref(), Some("group"));
    }

    #[test]
    fn test_bar_rejects_bad_ci() {
        assert!(matches!(
            plot().estimator(Estimator::Median).bar(),
            Err(Error::InvalidConfidence { .. })
        ));
        assert!(plot().estimator(Estimator::Median).ci(None).bar().is_ok());
        assert!(matches!(plot().ci(Some(90.0)).bar(), Err(Error::InvalidConfidence { .. })));
    }

    #[test]
    fn test_bar_missing_y() {
        let err = CategoricalPlot::new().data(sample()).x("group").bar().unwrap_err();
        assert!(matches!(err, Error::MissingParameter("y")));
    }

    #[test]
    fn test_bar_dodge_facets_by_category() {
        let chart = plot().hue("kind").ci(None).size(2.0).bar().unwrap();
        assert!(chart.is_faceted());
        let v = chart.to_json();
        assert_eq!(v["facet"]["column"]["field"], "group");
        assert_eq!(v["spec"]["encoding"]["x"]["field"], "kind");
        assert!(v["spec"]["encoding"]["color"]["legend"].is_null());
        assert_eq!(v["spec"]["height"], 200.0);
        assert!(v.get("height").is_none());
    }

    #[test]
    fn test_bar_hue_without_dodge() {
        let chart = plot().hue("kind").dodge(false).ci(None).bar().unwrap();
        assert!(!chart.is_faceted());
        let color = chart.encoding().unwrap().field(Channel::Color).unwrap();
        assert_eq!(color.field.as_deref(), Some("kind"));
        assert!(color.legend.is_none());
    }

    #[test]
    fn test_count_requires_exactly_one() {
        let both = CategoricalPlot::new().data(sample()).x("group").y("kind");
        assert!(matches!(both.count(), Err(Error::ConflictingParameters { .. })));
        let neither = CategoricalPlot::new().data(sample());
        assert!(matches!(neither.count(), Err(Error::MissingParameter(_))));
    }

    #[test]
    fn test_count_orientation() {
        let chart = CategoricalPlot::new().data(sample()).y("group").count().unwrap();
        let enc = chart.encoding().unwrap();
        assert_eq!(enc.field(Channel::X).unwrap().aggregate, Some(Aggregate::Count));
        assert!(enc.field(Channel::X).unwrap().field.is_none());
        assert_eq!(enc.field(Channel::Y).unwrap().field.as_deref(), Some("group"));
        assert!(chart.layers().is_empty());
    }

    #[test]
    fn test_point_layers() {
        let chart = plot().point().unwrap();
        let marks: Vec<MarkType> =
            chart.layers().iter().map(|l| l.mark().unwrap().mark_type).collect();
        assert_eq!(marks, vec![MarkType::Circle, MarkType::Line, MarkType::Rule]);
        let expected = resolve_palette(None, None, 0.75, &PlotConfig::default()).unwrap();
        for layer in chart.layers() {
            let color = layer.encoding().unwrap().get(Channel::Color).unwrap();
            assert_eq!(color.as_value().unwrap(), &json!(expected[0]));
        }
    }

    #[test]
    fn test_point_without_join_or_ci_is_unit() {
        let chart = plot().join(false).ci(None).point().unwrap();
        assert!(matches!(chart.body, ChartBody::Unit { .. }));
        assert_eq!(chart.mark().unwrap().mark_type, MarkType::Circle);
    }

    #[test]
    fn test_point_hue_colors_layers() {
        let chart = plot().hue("kind").ci(None).point().unwrap();
        for layer in chart.layers() {
            let color = layer.encoding().unwrap().field(Channel::Color).unwrap();
            assert_eq!(color.field.as_deref(), Some("kind"));
        }
    }

    #[test]
    fn test_strip() {
        let chart = plot().jitter(0.1).strip().unwrap();
        assert!(!chart.is_faceted());
        assert_eq!(chart.mark().unwrap().mark_type, MarkType::Tick);
        let enc = chart.encoding().unwrap();
        assert!(enc.field(Channel::Y).unwrap().aggregate.is_none());

        let single = CategoricalPlot::new().x(vec![1.0, 2.0]).strip().unwrap();
        let x = single.encoding().unwrap().field(Channel::X).unwrap();
        assert_eq!(x.field_type, crate::grammar::FieldType::Quantitative);

        let dodged = plot().hue("kind").dodge(true).strip().unwrap();
        assert!(dodged.is_faceted());
    }

    #[test]
    fn test_boxplot_layers() {
        let chart = plot().boxplot().unwrap();
        let layers = chart.layers();
        let marks: Vec<MarkType> = layers.iter().map(|l| l.mark().unwrap().mark_type).collect();
        assert_eq!(marks, vec![MarkType::Rule, MarkType::Bar, MarkType::Tick]);
        let bar = layers[1].encoding().unwrap();
        assert_eq!(bar.field(Channel::Y).unwrap().aggregate, Some(Aggregate::Q1));
        assert_eq!(bar.field(Channel::Y2).unwrap().aggregate, Some(Aggregate::Q3));
        let tick = layers[2].mark().unwrap();
        assert_eq!(tick.size, Some(18.0));
        assert_eq!(tick.color.as_deref(), Some("black"));
    }

    #[test]
    fn test_boxplot_melts_numeric_columns() {
        let table = Table::new()
            .with_column("a", vec![1.0, 2.0])
            .unwrap()
            .with_column("label", vec!["p", "q"])
            .unwrap()
            .with_column("b", vec![3.0, 4.0])
            .unwrap();
        let chart = CategoricalPlot::new().data(table).boxplot().unwrap();
        let data = chart.data.as_ref().unwrap();
        assert_eq!(data.column_names(), vec!["column", "value"]);
        assert_eq!(data.nrow(), 4);
        let bar = chart.layers()[1].encoding().unwrap();
        assert_eq!(bar.field(Channel::X).unwrap().field.as_deref(), Some("column"));
    }

    #[test]
    fn test_boxplot_single_variable_is_horizontal() {
        let chart = CategoricalPlot::new().x(vec![1.0, 2.0, 3.0]).whis(1.5).boxplot().unwrap();
        let range = chart.layers()[0].encoding().unwrap();
        assert_eq!(range.field(Channel::X).unwrap().aggregate, Some(Aggregate::Min));
        assert_eq!(range.field(Channel::X2).unwrap().aggregate, Some(Aggregate::Max));
        assert!(range.get(Channel::Y).is_none());
    }

    #[test]
    fn test_build_dispatch() {
        let p = plot().ci(None);
        assert_eq!(p.build(PlotKind::Bar).unwrap(), p.bar().unwrap());
        assert_eq!(p.build(PlotKind::Box).unwrap(), p.boxplot().unwrap());
    }
}
