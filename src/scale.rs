//! Scale definitions for data-to-visual mappings.
//!
//! [`Scale`] is the scale block of an encoding. [`ColorScale`] is an explicit
//! categorical color mapping shared between sub-charts so that a hue level
//! keeps its color across layers and facet cells.

use serde::Serialize;
use serde_json::Value as Json;

use crate::error::{Error, Result};
use crate::grammar::Value;

/// Scale block of an encoding channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scale {
    /// Input domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<Json>,
    /// Output range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<Json>,
    /// Extend the domain to round values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nice: Option<bool>,
    /// Include zero in the domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zero: Option<bool>,
}

impl Scale {
    /// Fixed continuous domain, not rounded outward.
    #[must_use]
    pub fn fixed_domain(min: f64, max: f64) -> Self {
        Self {
            domain: Some(Json::from(vec![min, max])),
            nice: Some(false),
            ..Self::default()
        }
    }

    /// Continuous range for size-like channels.
    #[must_use]
    pub fn size_range(min: f64, max: f64) -> Self {
        Self {
            range: Some(Json::from(vec![min, max])),
            ..Self::default()
        }
    }
}

/// Categorical color mapping with an explicit domain.
///
/// Colors are assigned by position; the range cycles when the domain is
/// longer than the palette.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    domain: Vec<Value>,
    colors: Vec<String>,
}

impl ColorScale {
    /// Create a color scale.
    ///
    /// # Errors
    ///
    /// Returns an error if `colors` is empty.
    pub fn new(domain: Vec<Value>, colors: Vec<String>) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::EmptyData);
        }
        Ok(Self { domain, colors })
    }

    /// Domain values, in order.
    #[must_use]
    pub fn domain(&self) -> &[Value] {
        &self.domain
    }

    /// One color per domain value.
    #[must_use]
    pub fn range(&self) -> Vec<&str> {
        (0..self.domain.len()).map(|i| self.colors[i % self.colors.len()].as_str()).collect()
    }

    /// Color assigned to a domain value.
    #[must_use]
    pub fn color_for(&self, value: &Value) -> Option<&str> {
        self.domain
            .iter()
            .position(|v| v == value)
            .map(|i| self.colors[i % self.colors.len()].as_str())
    }

    /// The encoding scale block.
    #[must_use]
    pub fn to_scale(&self) -> Scale {
        Scale {
            domain: Some(Json::Array(self.domain.iter().map(Value::to_json).collect())),
            range: Some(Json::Array(self.range().into_iter().map(Json::from).collect())),
            ..Scale::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn levels(names: &[&str]) -> Vec<Value> {
        names.iter().map(|n| Value::Text((*n).to_string())).collect()
    }

    #[test]
    fn test_fixed_domain() {
        assert_eq!(
            serde_json::to_value(Scale::fixed_domain(0.0, 2.5)).unwrap(),
            json!({"domain": [0.0, 2.5], "nice": false})
        );
    }

    #[test]
    fn test_color_scale_mapping() {
        let scale =
            ColorScale::new(levels(&["a", "b"]), vec!["red".into(), "blue".into()]).unwrap();
        assert_eq!(scale.color_for(&Value::Text("b".into())), Some("blue"));
        assert_eq!(scale.color_for(&Value::Text("z".into())), None);
        assert_eq!(
            serde_json::to_value(scale.to_scale()).unwrap(),
            json!({"domain": ["a", "b"], "range": ["red", "blue"]})
        );
    }

    #[test]
    fn test_color_scale_cycles() {
        let scale = ColorScale::new(levels(&["a", "b", "c"]), vec!["red".into(), "blue".into()])
            .unwrap();
        assert_eq!(scale.range(), vec!["red", "blue", "red"]);
    }

    #[test]
    fn test_color_scale_requires_colors() {
        assert!(matches!(ColorScale::new(levels(&["a"]), vec![]), Err(Error::EmptyData)));
    }
}
