//! Faceting.
//!
//! Creates small multiples by splitting data on one or two grouping columns.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::encoding::FieldDef;

/// Faceting specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Facet {
    /// One panel per row.
    Row {
        /// Column to facet by.
        var: String,
    },
    /// One panel per column.
    Col {
        /// Column to facet by.
        var: String,
    },
    /// A grid of panels.
    Grid {
        /// Row variable.
        row: String,
        /// Column variable.
        col: String,
    },
}

impl Facet {
    /// Facet into rows.
    #[must_use]
    pub fn row(var: &str) -> Self {
        Facet::Row {
            var: var.to_string(),
        }
    }

    /// Facet into columns.
    #[must_use]
    pub fn col(var: &str) -> Self {
        Facet::Col {
            var: var.to_string(),
        }
    }

    /// Facet into a grid.
    #[must_use]
    pub fn grid(row: &str, col: &str) -> Self {
        Facet::Grid {
            row: row.to_string(),
            col: col.to_string(),
        }
    }

    /// Build from optional row and column variables.
    #[must_use]
    pub fn from_parts(row: Option<&str>, col: Option<&str>) -> Option<Self> {
        match (row, col) {
            (Some(r), Some(c)) => Some(Facet::grid(r, c)),
            (Some(r), None) => Some(Facet::row(r)),
            (None, Some(c)) => Some(Facet::col(c)),
            (None, None) => None,
        }
    }
}

impl Serialize for Facet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self {
            Facet::Row { var } => map.serialize_entry("row", &FieldDef::nominal(var))?,
            Facet::Col { var } => map.serialize_entry("column", &FieldDef::nominal(var))?,
            Facet::Grid { row, col } => {
                map.serialize_entry("row", &FieldDef::nominal(row))?;
                map.serialize_entry("column", &FieldDef::nominal(col))?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_facet_grid() {
        let f = Facet::grid("category", "year");
        match &f {
            Facet::Grid { row, col } => {
                assert_eq!(row, "category");
                assert_eq!(col, "year");
            }
            _ => panic!("Expected Grid"),
        }
        assert_eq!(
            serde_json::to_value(&f).unwrap(),
            json!({
                "row": {"field": "category", "type": "nominal"},
                "column": {"field": "year", "type": "nominal"}
            })
        );
    }

    #[test]
    fn test_facet_from_parts() {
        assert_eq!(Facet::from_parts(Some("r"), None), Some(Facet::row("r")));
        assert_eq!(Facet::from_parts(None, Some("c")), Some(Facet::col("c")));
        assert_eq!(Facet::from_parts(None, None), None);
    }

    #[test]
    fn test_facet_col_serialization() {
        assert_eq!(
            serde_json::to_value(Facet::col("g")).unwrap(),
            json!({"column": {"field": "g", "type": "nominal"}})
        );
    }
}
