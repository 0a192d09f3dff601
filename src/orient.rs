//! Orientation of categorical plots.

use crate::error::{Error, Result};
use crate::grammar::{Channel, Column, Facet};

/// Direction of the categorical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Categories along y, values along x.
    Horizontal,
    /// Categories along x, values along y.
    Vertical,
}

impl Orientation {
    /// Short form, `"h"` or `"v"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Horizontal => "h",
            Orientation::Vertical => "v",
        }
    }

    /// Channel carrying the categories.
    #[must_use]
    pub fn category_channel(self) -> Channel {
        match self {
            Orientation::Horizontal => Channel::Y,
            Orientation::Vertical => Channel::X,
        }
    }

    /// Channel carrying the values.
    #[must_use]
    pub fn value_channel(self) -> Channel {
        match self {
            Orientation::Horizontal => Channel::X,
            Orientation::Vertical => Channel::Y,
        }
    }

    /// Facet that dodges hue levels: one row per category when horizontal,
    /// one column per category when vertical.
    #[must_use]
    pub fn dodge_facet(self, category: &str) -> Facet {
        match self {
            Orientation::Horizontal => Facet::row(category),
            Orientation::Vertical => Facet::col(category),
        }
    }

    /// Parse an explicit orientation by its first letter.
    #[must_use]
    pub fn parse(orient: &str) -> Option<Self> {
        if orient.starts_with('v') {
            Some(Orientation::Vertical)
        } else if orient.starts_with('h') {
            Some(Orientation::Horizontal)
        } else {
            None
        }
    }
}

/// Decide the orientation of a categorical plot.
///
/// Checks, in order: an explicit `orient`; a missing side; a categorical
/// y; a non-numeric y. Anything else is vertical.
///
/// # Errors
///
/// [`Error::AmbiguousOrientation`] when both sides are categorical, or both
/// are non-numeric.
pub fn infer_orient(x: Option<&Column>, y: Option<&Column>, orient: Option<&str>) -> Result<Orientation> {
    if let Some(explicit) = orient.and_then(Orientation::parse) {
        return Ok(explicit);
    }
    let (x, y) = match (x, y) {
        (None, _) => return Ok(Orientation::Vertical),
        (_, None) => return Ok(Orientation::Horizontal),
        (Some(x), Some(y)) => (x, y),
    };

    let decided = if y.is_categorical() {
        if x.is_categorical() {
            return Err(Error::AmbiguousOrientation);
        }
        Orientation::Horizontal
    } else if y.is_not_numeric() {
        if x.is_not_numeric() {
            return Err(Error::AmbiguousOrientation);
        }
        Orientation::Horizontal
    } else {
        Orientation::Vertical
    };
    log::debug!("inferred {} orientation for {} / {}", decided.as_str(), x.name(), y.name());
    Ok(decided)
}
