//! Mark types.
//!
//! A mark is the visual primitive a unit chart draws for each datum.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Visual primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkType {
    /// Bars.
    Bar,
    /// Lines connecting points.
    Line,
    /// Hollow points.
    Point,
    /// Filled circles.
    Circle,
    /// Short ticks.
    Tick,
    /// Filled area between two positions.
    Area,
    /// Line segments between two positions.
    Rule,
}

/// A mark with optional properties.
///
/// Serializes as a bare string when no property is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    /// The primitive.
    pub mark_type: MarkType,
    /// Clip to the plotting area.
    pub clip: Option<bool>,
    /// Literal color.
    pub color: Option<String>,
    /// Size (area for points, thickness for ticks).
    pub size: Option<f64>,
    /// Opacity in `[0, 1]`.
    pub opacity: Option<f64>,
}

impl Mark {
    /// Mark without properties.
    #[must_use]
    pub fn new(mark_type: MarkType) -> Self {
        Self {
            mark_type,
            clip: None,
            color: None,
            size: None,
            opacity: None,
        }
    }

    /// Bar mark.
    #[must_use]
    pub fn bar() -> Self {
        Self::new(MarkType::Bar)
    }

    /// Line mark.
    #[must_use]
    pub fn line() -> Self {
        Self::new(MarkType::Line)
    }

    /// Point mark.
    #[must_use]
    pub fn point() -> Self {
        Self::new(MarkType::Point)
    }

    /// Circle mark.
    #[must_use]
    pub fn circle() -> Self {
        Self::new(MarkType::Circle)
    }

    /// Tick mark.
    #[must_use]
    pub fn tick() -> Self {
        Self::new(MarkType::Tick)
    }

    /// Area mark.
    #[must_use]
    pub fn area() -> Self {
        Self::new(MarkType::Area)
    }

    /// Rule mark.
    #[must_use]
    pub fn rule() -> Self {
        Self::new(MarkType::Rule)
    }

    /// Set clipping.
    #[must_use]
    pub fn clip(mut self, clip: bool) -> Self {
        self.clip = Some(clip);
        self
    }

    /// Set a literal color.
    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the size.
    #[must_use]
    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the opacity.
    #[must_use]
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    fn has_properties(&self) -> bool {
        self.clip.is_some() || self.color.is_some() || self.size.is_some() || self.opacity.is_some()
    }
}

impl From<MarkType> for Mark {
    fn from(mark_type: MarkType) -> Self {
        Mark::new(mark_type)
    }
}

impl Serialize for Mark {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if !self.has_properties() {
            return self.mark_type.serialize(serializer);
        }
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", &self.mark_type)?;
        if let Some(clip) = self.clip {
            map.serialize_entry("clip", &clip)?;
        }
        if let Some(color) = &self.color {
            map.serialize_entry("color", color)?;
        }
        if let Some(size) = self.size {
            map.serialize_entry("size", &size)?;
        }
        if let Some(opacity) = self.opacity {
            map.serialize_entry("opacity", &opacity)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_mark_is_string() {
        assert_eq!(serde_json::to_value(Mark::bar()).unwrap(), json!("bar"));
        assert_eq!(serde_json::to_value(Mark::rule()).unwrap(), json!("rule"));
    }

    #[test]
    fn test_mark_with_properties() {
        let mark = Mark::tick().size(18.0).color("black");
        assert_eq!(
            serde_json::to_value(&mark).unwrap(),
            json!({"type": "tick", "color": "black", "size": 18.0})
        );
    }

    #[test]
    fn test_mark_clip() {
        let mark = Mark::area().clip(true).opacity(0.15);
        let v = serde_json::to_value(&mark).unwrap();
        assert_eq!(v["type"], "area");
        assert_eq!(v["clip"], true);
        assert_eq!(v["opacity"], 0.15);
    }
}
