//! Chart specification builder.
//!
//! Combines data, marks, encodings, layers, facets and concatenation into a
//! complete Vega-Lite v5 specification.

use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value as Json};

use crate::config::PlotConfig;
use crate::error::{Error, Result};

use super::data::Table;
use super::encoding::Encoding;
use super::facet::Facet;
use super::mark::Mark;

/// Top-level `config` block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartConfig {
    /// Default categorical color range.
    pub category: Option<Vec<String>>,
}

impl ChartConfig {
    fn to_json(&self) -> Option<Json> {
        self.category
            .as_ref()
            .map(|colors| json!({ "range": { "category": colors } }))
    }
}

/// Composition structure of a chart.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartBody {
    /// A single mark with its encoding.
    Unit {
        /// The mark.
        mark: Mark,
        /// Channel encodings.
        encoding: Encoding,
    },
    /// Stacked layers sharing one coordinate system; later layers draw on top.
    Layer(Vec<Chart>),
    /// A template repeated per facet value.
    Facet {
        /// Grouping columns.
        facet: Facet,
        /// The repeated template.
        spec: Box<Chart>,
    },
    /// Side-by-side charts.
    HConcat(Vec<Chart>),
    /// Stacked charts.
    VConcat(Vec<Chart>),
}

/// A chart specification.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    /// Inline data.
    pub data: Option<Table>,
    /// Title.
    pub title: Option<String>,
    /// Width in pixels.
    pub width: Option<f64>,
    /// Height in pixels.
    pub height: Option<f64>,
    /// Top-level configuration.
    pub config: Option<ChartConfig>,
    /// Composition.
    pub body: ChartBody,
}

impl Chart {
    fn from_body(body: ChartBody) -> Self {
        Self {
            data: None,
            title: None,
            width: None,
            height: None,
            config: None,
            body,
        }
    }

    /// Unit chart.
    #[must_use]
    pub fn unit(mark: Mark, encoding: Encoding) -> Self {
        Self::from_body(ChartBody::Unit { mark, encoding })
    }

    /// Layered chart.
    #[must_use]
    pub fn layer(layers: Vec<Chart>) -> Self {
        Self::from_body(ChartBody::Layer(layers))
    }

    /// Horizontal concatenation.
    #[must_use]
    pub fn hconcat(charts: Vec<Chart>) -> Self {
        Self::from_body(ChartBody::HConcat(charts))
    }

    /// Vertical concatenation.
    #[must_use]
    pub fn vconcat(charts: Vec<Chart>) -> Self {
        Self::from_body(ChartBody::VConcat(charts))
    }

    /// Attach inline data.
    #[must_use]
    pub fn data(mut self, table: Table) -> Self {
        self.data = Some(table);
        self
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the pixel dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set dimensions from a figure size in inches.
    ///
    /// A faceted chart is sized per cell, on its template.
    #[must_use]
    pub fn sized(mut self, size: f64, aspect: f64, config: &PlotConfig) -> Self {
        let (width, height) = config.dimensions(size, aspect);
        match &mut self.body {
            ChartBody::Facet { spec, .. } => {
                spec.width = Some(width);
                spec.height = Some(height);
                self
            }
            _ => self.dimensions(width, height),
        }
    }

    /// Set the default categorical color range.
    #[must_use]
    pub fn configure_range(mut self, colors: Vec<String>) -> Self {
        self.config.get_or_insert_with(ChartConfig::default).category = Some(colors);
        self
    }

    /// Wrap this chart as the template of a facet.
    ///
    /// Data and configuration move to the outer chart.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NestedFacet`] if the chart is already faceted.
    pub fn facet(mut self, facet: Facet) -> Result<Chart> {
        if self.is_faceted() {
            return Err(Error::NestedFacet);
        }
        log::debug!("faceting chart by {facet:?}");
        let data = self.data.take();
        let config = self.config.take();
        let title = self.title.take();
        Ok(Chart {
            data,
            title,
            width: None,
            height: None,
            config,
            body: ChartBody::Facet {
                facet,
                spec: Box::new(self),
            },
        })
    }

    /// Whether the body is a facet.
    #[must_use]
    pub fn is_faceted(&self) -> bool {
        matches!(self.body, ChartBody::Facet { .. })
    }

    /// Mark of a unit chart.
    #[must_use]
    pub fn mark(&self) -> Option<&Mark> {
        match &self.body {
            ChartBody::Unit { mark, .. } => Some(mark),
            _ => None,
        }
    }

    /// Mutable mark of a unit chart.
    pub fn mark_mut(&mut self) -> Option<&mut Mark> {
        match &mut self.body {
            ChartBody::Unit { mark, .. } => Some(mark),
            _ => None,
        }
    }

    /// Encoding of a unit chart.
    #[must_use]
    pub fn encoding(&self) -> Option<&Encoding> {
        match &self.body {
            ChartBody::Unit { encoding, .. } => Some(encoding),
            _ => None,
        }
    }

    /// Mutable encoding of a unit chart.
    pub fn encoding_mut(&mut self) -> Option<&mut Encoding> {
        match &mut self.body {
            ChartBody::Unit { encoding, .. } => Some(encoding),
            _ => None,
        }
    }

    /// Layers of a layered chart.
    #[must_use]
    pub fn layers(&self) -> &[Chart] {
        match &self.body {
            ChartBody::Layer(layers) => layers,
            _ => &[],
        }
    }

    /// Template of a faceted chart.
    #[must_use]
    pub fn facet_spec(&self) -> Option<&Chart> {
        match &self.body {
            ChartBody::Facet { spec, .. } => Some(spec),
            _ => None,
        }
    }

    /// Facet definition of a faceted chart.
    #[must_use]
    pub fn facet_def(&self) -> Option<&Facet> {
        match &self.body {
            ChartBody::Facet { facet, .. } => Some(facet),
            _ => None,
        }
    }

    /// Concatenated sub-charts.
    #[must_use]
    pub fn concat(&self) -> &[Chart] {
        match &self.body {
            ChartBody::HConcat(charts) | ChartBody::VConcat(charts) => charts,
            _ => &[],
        }
    }

    /// JSON specification without `$schema`.
    #[must_use]
    pub fn to_json(&self) -> Json {
        let mut obj = Map::new();
        if let Some(title) = &self.title {
            obj.insert("title".into(), Json::String(title.clone()));
        }
        if let Some(data) = &self.data {
            obj.insert("data".into(), json!({ "values": data.to_values() }));
        }
        match &self.body {
            ChartBody::Unit { mark, encoding } => {
                obj.insert("mark".into(), to_json_value(mark));
                obj.insert("encoding".into(), to_json_value(encoding));
            }
            ChartBody::Layer(layers) => {
                obj.insert("layer".into(), layers.iter().map(Chart::to_json).collect());
            }
            ChartBody::Facet { facet, spec } => {
                obj.insert("facet".into(), to_json_value(facet));
                obj.insert("spec".into(), spec.to_json());
            }
            ChartBody::HConcat(charts) => {
                obj.insert("hconcat".into(), charts.iter().map(Chart::to_json).collect());
            }
            ChartBody::VConcat(charts) => {
                obj.insert("vconcat".into(), charts.iter().map(Chart::to_json).collect());
            }
        }
        if let Some(width) = self.width {
            obj.insert("width".into(), json!(width));
        }
        if let Some(height) = self.height {
            obj.insert("height".into(), json!(height));
        }
        if let Some(config) = self.config.as_ref().and_then(ChartConfig::to_json) {
            obj.insert("config".into(), config);
        }
        Json::Object(obj)
    }

    /// Complete Vega-Lite document with `$schema`.
    #[must_use]
    pub fn to_vega_lite(&self, config: &PlotConfig) -> Json {
        let mut obj = Map::new();
        obj.insert("$schema".into(), Json::String(config.schema_url.clone()));
        if let Json::Object(body) = self.to_json() {
            obj.extend(body);
        }
        Json::Object(obj)
    }
}

fn to_json_value<T: Serialize>(value: &T) -> Json {
    serde_json::to_value(value).unwrap_or(Json::Null)
}

impl Serialize for Chart {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
