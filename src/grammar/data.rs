//! Tabular data for chart specifications.
//!
//! A [`Table`] is an ordered set of equally long, named columns. Column order
//! is preserved in the inline `data.values` of the emitted specification.

use serde_json::{Map, Value as Json};

use crate::error::{Error, Result};

use super::encoding::FieldType;

/// A scalar cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A numeric value.
    Number(f64),
    /// A text or category label.
    Text(String),
    /// Milliseconds since the Unix epoch.
    Timestamp(i64),
}

impl Value {
    /// Get as f64, or None if not a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// JSON representation (NaN becomes null).
    #[must_use]
    pub fn to_json(&self) -> Json {
        match self {
            Value::Number(n) => serde_json::Number::from_f64(*n).map_or(Json::Null, Json::Number),
            Value::Text(s) => Json::String(s.clone()),
            Value::Timestamp(t) => Json::from(*t),
        }
    }

    /// Human-readable label, used in facet titles.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Value::Number(n) => n.to_string(),
            Value::Text(s) => s.clone(),
            Value::Timestamp(t) => t.to_string(),
        }
    }

    fn matches(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            _ => self == other,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// Value kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Floating-point numbers.
    Numeric,
    /// Labels with categorical semantics.
    Categorical,
    /// Free text.
    Text,
    /// Timestamps.
    Temporal,
}

impl ValueKind {
    /// The Vega-Lite field type for this kind.
    #[must_use]
    pub fn field_type(self) -> FieldType {
        match self {
            ValueKind::Numeric => FieldType::Quantitative,
            ValueKind::Temporal => FieldType::Temporal,
            ValueKind::Categorical | ValueKind::Text => FieldType::Nominal,
        }
    }
}

/// Column storage. Every column holds values of exactly one kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// Numeric values (NaN marks a missing value).
    Numeric(Vec<f64>),
    /// Categorical labels.
    Categorical(Vec<String>),
    /// Free-text values.
    Text(Vec<String>),
    /// Epoch-millisecond timestamps.
    Temporal(Vec<i64>),
}

impl ColumnData {
    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Categorical(v) | ColumnData::Text(v) => v.len(),
            ColumnData::Temporal(v) => v.len(),
        }
    }

    /// True when there are no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value kind.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            ColumnData::Numeric(_) => ValueKind::Numeric,
            ColumnData::Categorical(_) => ValueKind::Categorical,
            ColumnData::Text(_) => ValueKind::Text,
            ColumnData::Temporal(_) => ValueKind::Temporal,
        }
    }

    /// Value at `row`.
    #[must_use]
    pub fn get(&self, row: usize) -> Option<Value> {
        match self {
            ColumnData::Numeric(v) => v.get(row).map(|&n| Value::Number(n)),
            ColumnData::Categorical(v) | ColumnData::Text(v) => {
                v.get(row).map(|s| Value::Text(s.clone()))
            }
            ColumnData::Temporal(v) => v.get(row).map(|&t| Value::Timestamp(t)),
        }
    }

    /// A constant column of `n` copies of `value`.
    #[must_use]
    pub fn repeat(value: &Value, n: usize) -> ColumnData {
        match value {
            Value::Number(v) => ColumnData::Numeric(vec![*v; n]),
            Value::Text(s) => ColumnData::Categorical(vec![s.clone(); n]),
            Value::Timestamp(t) => ColumnData::Temporal(vec![*t; n]),
        }
    }

    fn select(&self, rows: &[usize]) -> ColumnData {
        match self {
            ColumnData::Numeric(v) => ColumnData::Numeric(rows.iter().map(|&i| v[i]).collect()),
            ColumnData::Categorical(v) => {
                ColumnData::Categorical(rows.iter().map(|&i| v[i].clone()).collect())
            }
            ColumnData::Text(v) => ColumnData::Text(rows.iter().map(|&i| v[i].clone()).collect()),
            ColumnData::Temporal(v) => ColumnData::Temporal(rows.iter().map(|&i| v[i]).collect()),
        }
    }
}

impl From<Vec<f64>> for ColumnData {
    fn from(v: Vec<f64>) -> Self {
        ColumnData::Numeric(v)
    }
}

impl From<&[f64]> for ColumnData {
    fn from(v: &[f64]) -> Self {
        ColumnData::Numeric(v.to_vec())
    }
}

impl From<Vec<String>> for ColumnData {
    fn from(v: Vec<String>) -> Self {
        ColumnData::Text(v)
    }
}

impl From<Vec<&str>> for ColumnData {
    fn from(v: Vec<&str>) -> Self {
        ColumnData::Text(v.into_iter().map(str::to_string).collect())
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    /// Create a column.
    #[must_use]
    pub fn new(name: impl Into<String>, data: impl Into<ColumnData>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column values.
    #[must_use]
    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    /// Value kind.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.data.kind()
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the column is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether the column has categorical semantics.
    #[must_use]
    pub fn is_categorical(&self) -> bool {
        matches!(self.data, ColumnData::Categorical(_))
    }

    /// Whether the values cannot be read as numbers.
    ///
    /// Text columns count as numeric when every value parses as a float.
    #[must_use]
    pub fn is_not_numeric(&self) -> bool {
        match &self.data {
            ColumnData::Numeric(_) => false,
            ColumnData::Categorical(v) | ColumnData::Text(v) => {
                v.iter().any(|s| s.trim().parse::<f64>().is_err())
            }
            ColumnData::Temporal(_) => true,
        }
    }

    /// Numeric values, if this is a numeric column.
    #[must_use]
    pub fn as_f64(&self) -> Option<&[f64]> {
        match &self.data {
            ColumnData::Numeric(v) => Some(v),
            _ => None,
        }
    }
}

/// An ordered, column-oriented table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Table::push_column`].
    pub fn with_column(mut self, name: impl Into<String>, data: impl Into<ColumnData>) -> Result<Self> {
        self.push_column(Column::new(name, data))?;
        Ok(self)
    }

    /// Append a column, replacing an existing column of the same name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLengthMismatch`] if the column length differs from
    /// the table's row count.
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        let replacing_only = self.columns.len() == 1 && self.columns[0].name == column.name;
        if !self.columns.is_empty() && !replacing_only && column.len() != self.n_rows {
            return Err(Error::DataLengthMismatch {
                len: column.len(),
                column: column.name,
                expected: self.n_rows,
            });
        }
        self.n_rows = column.len();
        if let Some(existing) = self.columns.iter_mut().find(|c| c.name == column.name) {
            *existing = column;
        } else {
            self.columns.push(column);
        }
        Ok(())
    }

    /// Get a column.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get a column, failing with [`Error::UnknownColumn`].
    pub fn require(&self, name: &str) -> Result<&Column> {
        self.column(name).ok_or_else(|| Error::UnknownColumn(name.to_string()))
    }

    /// Numeric values of a column.
    pub fn numeric(&self, name: &str) -> Result<&[f64]> {
        self.require(name)?
            .as_f64()
            .ok_or_else(|| Error::NonNumericColumn(name.to_string()))
    }

    /// Check if a column exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Columns in order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Names of numeric columns in order.
    #[must_use]
    pub fn numeric_column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.kind() == ValueKind::Numeric)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Number of rows.
    #[must_use]
    pub fn nrow(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    #[must_use]
    pub fn ncol(&self) -> usize {
        self.columns.len()
    }

    /// Distinct values of a column in order of first appearance.
    pub fn unique(&self, name: &str) -> Result<Vec<Value>> {
        let column = self.require(name)?;
        let mut seen: Vec<Value> = Vec::new();
        for row in 0..column.len() {
            if let Some(v) = column.data.get(row) {
                if !seen.iter().any(|s| s.matches(&v)) {
                    seen.push(v);
                }
            }
        }
        Ok(seen)
    }

    /// Rows where `name` equals `value`.
    pub fn filter_eq(&self, name: &str, value: &Value) -> Result<Table> {
        let column = self.require(name)?;
        let rows: Vec<usize> = (0..self.n_rows)
            .filter(|&row| column.data.get(row).is_some_and(|v| v.matches(value)))
            .collect();
        Ok(Table {
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    data: c.data.select(&rows),
                })
                .collect(),
            n_rows: rows.len(),
        })
    }

    /// Unpivot `value_columns` into long form.
    ///
    /// The result has the `id` column repeated per melted column, a
    /// categorical `var_name` column holding the source column name, and a
    /// numeric `value_name` column.
    pub fn melt(
        &self,
        id: Option<&str>,
        value_columns: &[&str],
        var_name: &str,
        value_name: &str,
    ) -> Result<Table> {
        let mut vars = Vec::with_capacity(self.n_rows * value_columns.len());
        let mut values = Vec::with_capacity(vars.capacity());
        let mut id_rows = Vec::with_capacity(vars.capacity());
        for &name in value_columns {
            let data = self.numeric(name)?;
            vars.extend(std::iter::repeat(name.to_string()).take(data.len()));
            values.extend_from_slice(data);
            id_rows.extend(0..data.len());
        }

        let mut out = Table::new();
        if let Some(id) = id {
            let column = self.require(id)?;
            out.push_column(Column::new(id, column.data.select(&id_rows)))?;
        }
        out.push_column(Column::new(var_name, ColumnData::Categorical(vars)))?;
        out.push_column(Column::new(value_name, ColumnData::Numeric(values)))?;
        Ok(out)
    }

    /// Rows as JSON objects, for inline `data.values`.
    #[must_use]
    pub fn to_values(&self) -> Vec<Json> {
        (0..self.n_rows)
            .map(|row| {
                let mut obj = Map::with_capacity(self.columns.len());
                for c in &self.columns {
                    let v = c.data.get(row).map_or(Json::Null, |v| v.to_json());
                    obj.insert(c.name.clone(), v);
                }
                Json::Object(obj)
            })
            .collect()
    }
}
