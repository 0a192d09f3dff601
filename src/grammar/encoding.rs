//! Encoding descriptors.
//!
//! Maps visual channels to data fields (with a field type, optional
//! aggregate and bin) or to literal values.

use serde::{Serialize, Serializer};
use serde_json::Value as Json;

use crate::scale::Scale;

use super::stat::Aggregate;

/// Vega-Lite measurement type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Continuous numbers.
    Quantitative,
    /// Unordered categories.
    Nominal,
    /// Ordered categories.
    Ordinal,
    /// Dates and times.
    Temporal,
}

/// Binning of a positional field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bin {
    /// Renderer default binning (`"bin": true`).
    Auto,
    /// At most this many bins.
    MaxBins(usize),
}

impl Serialize for Bin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Bin::Auto => serializer.serialize_bool(true),
            Bin::MaxBins(n) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("maxbins", n)?;
                map.end()
            }
        }
    }
}

/// Axis properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Axis {
    /// Axis title.
    pub title: String,
}

/// Legend setting; only hiding is expressed, absence means renderer default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Legend {
    /// `"legend": null`.
    Hidden,
}

impl Serialize for Legend {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_none()
    }
}

/// A channel bound to a data field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDef {
    /// Field name. Only a bare `count` aggregate may omit it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Measurement type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Aggregate applied by the renderer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<Aggregate>,
    /// Binning.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin: Option<Bin>,
    /// Axis properties.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis: Option<Axis>,
    /// Legend properties.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    /// Explicit scale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Scale>,
}

impl FieldDef {
    /// Reference `field` with the given type.
    #[must_use]
    pub fn new(field: &str, field_type: FieldType) -> Self {
        Self {
            field: Some(field.to_string()),
            field_type,
            aggregate: None,
            bin: None,
            axis: None,
            legend: None,
            scale: None,
        }
    }

    /// Quantitative field.
    #[must_use]
    pub fn quantitative(field: &str) -> Self {
        Self::new(field, FieldType::Quantitative)
    }

    /// Nominal field.
    #[must_use]
    pub fn nominal(field: &str) -> Self {
        Self::new(field, FieldType::Nominal)
    }

    /// Record count without a field.
    #[must_use]
    pub fn count() -> Self {
        Self {
            field: None,
            field_type: FieldType::Quantitative,
            aggregate: Some(Aggregate::Count),
            bin: None,
            axis: None,
            legend: None,
            scale: None,
        }
    }

    /// Set the aggregate.
    #[must_use]
    pub fn aggregate(mut self, aggregate: Aggregate) -> Self {
        self.aggregate = Some(aggregate);
        self
    }

    /// Set binning.
    #[must_use]
    pub fn bin(mut self, bin: Bin) -> Self {
        self.bin = Some(bin);
        self
    }

    /// Set the axis title.
    #[must_use]
    pub fn axis_title(mut self, title: &str) -> Self {
        self.axis = Some(Axis {
            title: title.to_string(),
        });
        self
    }

    /// Hide the legend.
    #[must_use]
    pub fn hide_legend(mut self) -> Self {
        self.legend = Some(Legend::Hidden);
        self
    }

    /// Hide the legend when `hidden` is true.
    #[must_use]
    pub fn legend_hidden(self, hidden: bool) -> Self {
        if hidden {
            self.hide_legend()
        } else {
            self
        }
    }

    /// Set an explicit scale.
    #[must_use]
    pub fn scale(mut self, scale: Scale) -> Self {
        self.scale = Some(scale);
        self
    }
}

/// A channel bound to a literal value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueDef {
    /// Literal value.
    pub value: Json,
}

/// Encoding descriptor: either a field reference or a literal, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChannelDef {
    /// Data-driven channel.
    Field(FieldDef),
    /// Constant channel.
    Value(ValueDef),
}

impl ChannelDef {
    /// Literal value channel.
    #[must_use]
    pub fn value(value: impl Into<Json>) -> Self {
        ChannelDef::Value(ValueDef {
            value: value.into(),
        })
    }

    /// The field definition, if data-driven.
    #[must_use]
    pub fn as_field(&self) -> Option<&FieldDef> {
        match self {
            ChannelDef::Field(f) => Some(f),
            ChannelDef::Value(_) => None,
        }
    }

    /// Mutable field definition, if data-driven.
    pub fn as_field_mut(&mut self) -> Option<&mut FieldDef> {
        match self {
            ChannelDef::Field(f) => Some(f),
            ChannelDef::Value(_) => None,
        }
    }

    /// The literal, if constant.
    #[must_use]
    pub fn as_value(&self) -> Option<&Json> {
        match self {
            ChannelDef::Field(_) => None,
            ChannelDef::Value(v) => Some(&v.value),
        }
    }
}

impl From<FieldDef> for ChannelDef {
    fn from(f: FieldDef) -> Self {
        ChannelDef::Field(f)
    }
}

/// Visual channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Horizontal position.
    X,
    /// Vertical position.
    Y,
    /// Secondary horizontal position (range end).
    X2,
    /// Secondary vertical position (range end).
    Y2,
    /// Color.
    Color,
    /// Opacity.
    Opacity,
    /// Mark size.
    Size,
    /// Point shape.
    Shape,
}

impl Channel {
    /// The range-end companion of a position channel.
    #[must_use]
    pub fn secondary(self) -> Channel {
        match self {
            Channel::X => Channel::X2,
            Channel::Y => Channel::Y2,
            other => other,
        }
    }
}

/// Channel-to-descriptor mapping of one mark.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Encoding {
    /// Horizontal position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<ChannelDef>,
    /// Vertical position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<ChannelDef>,
    /// Secondary horizontal position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x2: Option<ChannelDef>,
    /// Secondary vertical position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y2: Option<ChannelDef>,
    /// Color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ChannelDef>,
    /// Opacity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<ChannelDef>,
    /// Size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<ChannelDef>,
    /// Shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<ChannelDef>,
}

impl Encoding {
    /// Create an empty encoding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, channel: Channel) -> &mut Option<ChannelDef> {
        match channel {
            Channel::X => &mut self.x,
            Channel::Y => &mut self.y,
            Channel::X2 => &mut self.x2,
            Channel::Y2 => &mut self.y2,
            Channel::Color => &mut self.color,
            Channel::Opacity => &mut self.opacity,
            Channel::Size => &mut self.size,
            Channel::Shape => &mut self.shape,
        }
    }

    /// Bind a channel.
    #[must_use]
    pub fn with(mut self, channel: Channel, def: impl Into<ChannelDef>) -> Self {
        self.set(channel, def);
        self
    }

    /// Bind a channel in place.
    pub fn set(&mut self, channel: Channel, def: impl Into<ChannelDef>) {
        *self.slot(channel) = Some(def.into());
    }

    /// Unbind a channel.
    pub fn clear(&mut self, channel: Channel) {
        *self.slot(channel) = None;
    }

    /// Descriptor bound to a channel.
    #[must_use]
    pub fn get(&self, channel: Channel) -> Option<&ChannelDef> {
        match channel {
            Channel::X => self.x.as_ref(),
            Channel::Y => self.y.as_ref(),
            Channel::X2 => self.x2.as_ref(),
            Channel::Y2 => self.y2.as_ref(),
            Channel::Color => self.color.as_ref(),
            Channel::Opacity => self.opacity.as_ref(),
            Channel::Size => self.size.as_ref(),
            Channel::Shape => self.shape.as_ref(),
        }
    }

    /// Mutable descriptor bound to a channel.
    pub fn get_mut(&mut self, channel: Channel) -> Option<&mut ChannelDef> {
        self.slot(channel).as_mut()
    }

    /// Field definition bound to a channel.
    #[must_use]
    pub fn field(&self, channel: Channel) -> Option<&FieldDef> {
        self.get(channel).and_then(ChannelDef::as_field)
    }

    /// Merge another encoding, with `other` taking precedence.
    #[must_use]
    pub fn merge(&self, other: &Encoding) -> Encoding {
        Encoding {
            x: other.x.clone().or_else(|| self.x.clone()),
            y: other.y.clone().or_else(|| self.y.clone()),
            x2: other.x2.clone().or_else(|| self.x2.clone()),
            y2: other.y2.clone().or_else(|| self.y2.clone()),
            color: other.color.clone().or_else(|| self.color.clone()),
            opacity: other.opacity.clone().or_else(|| self.opacity.clone()),
            size: other.size.clone().or_else(|| self.size.clone()),
            shape: other.shape.clone().or_else(|| self.shape.clone()),
        }
    }
}
