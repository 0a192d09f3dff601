//! Input normalization.
//!
//! Plotting calls accept either column names in a caller-supplied table or
//! bare sequences. [`build_table`] folds both conventions into one [`Table`]
//! and records which column each role resolved to.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::grammar::{Column, ColumnData, Table};

/// A role argument of a plotting call.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Field {
    /// Not supplied.
    #[default]
    None,
    /// Name of a column in the call's table.
    Column(String),
    /// Anonymous sequence, named after its role.
    Values(ColumnData),
    /// Sequence carrying its own name.
    Named(Column),
}

impl Field {
    /// Whether the role was left out.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Field::None)
    }

    /// Whether the role was supplied.
    #[must_use]
    pub fn is_some(&self) -> bool {
        !self.is_none()
    }
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        Field::Column(name.to_string())
    }
}

impl From<String> for Field {
    fn from(name: String) -> Self {
        Field::Column(name)
    }
}

impl From<Option<&str>> for Field {
    fn from(name: Option<&str>) -> Self {
        name.map_or(Field::None, Field::from)
    }
}

impl From<Vec<f64>> for Field {
    fn from(values: Vec<f64>) -> Self {
        Field::Values(ColumnData::Numeric(values))
    }
}

impl From<&[f64]> for Field {
    fn from(values: &[f64]) -> Self {
        Field::Values(ColumnData::Numeric(values.to_vec()))
    }
}

impl From<ColumnData> for Field {
    fn from(data: ColumnData) -> Self {
        Field::Values(data)
    }
}

impl From<Column> for Field {
    fn from(column: Column) -> Self {
        Field::Named(column)
    }
}

/// Role to resolved column name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldNames {
    names: Vec<(String, String)>,
}

impl FieldNames {
    /// Column name a role resolved to.
    #[must_use]
    pub fn get(&self, role: &str) -> Option<&str> {
        self.names.iter().find(|(r, _)| r == role).map(|(_, c)| c.as_str())
    }

    /// Roles that were supplied, in input order.
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|(r, _)| r.as_str())
    }
}

/// Normalize role arguments into one table.
///
/// Column references are resolved against `base` (or columns contributed by
/// earlier roles). Sequences are added under their own name or their role.
/// Two roles may share a column name only when they carry identical data.
///
/// # Errors
///
/// [`Error::UnknownColumn`], [`Error::AmbiguousField`] or
/// [`Error::DataLengthMismatch`].
pub fn build_table(base: Option<&Table>, fields: &[(&str, Field)]) -> Result<(Table, FieldNames)> {
    let mut table = base.cloned().unwrap_or_default();
    let mut owners: HashMap<String, String> = HashMap::new();
    let mut names = FieldNames::default();

    for (role, field) in fields {
        let column = match field {
            Field::None => continue,
            Field::Column(name) => {
                table.require(name)?;
                names.names.push(((*role).to_string(), name.clone()));
                continue;
            }
            Field::Values(data) => Column::new(*role, data.clone()),
            Field::Named(column) => column.clone(),
        };

        let name = column.name().to_string();
        if let Some(existing) = table.column(&name) {
            if existing.data() != column.data() {
                return Err(Error::AmbiguousField {
                    column: name.clone(),
                    first: owners.get(&name).cloned().unwrap_or_else(|| "data".to_string()),
                    second: (*role).to_string(),
                });
            }
        } else {
            table.push_column(column)?;
        }
        owners.entry(name.clone()).or_insert_with(|| (*role).to_string());
        names.names.push(((*role).to_string(), name));
    }

    Ok((table, names))
}
