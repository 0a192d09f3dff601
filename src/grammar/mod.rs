//! Declarative chart grammar.
//!
//! An in-memory model of the Vega-Lite v5 specification language.
//!
//! # Components
//!
//! - **Data**: ordered, typed columns ([`Table`])
//! - **Encodings**: channel-to-field or channel-to-literal bindings
//! - **Marks**: visual primitives (bar, line, circle, tick, area, rule)
//! - **Statistics**: renderer-side aggregates and the [`Estimator`] set
//! - **Facets**: small multiples by one or two grouping columns
//! - **Charts**: unit, layer, facet and concatenation composition
//!
//! # Example
//!
//! ```rust
//! use trueno_vega::grammar::*;
//!
//! let table = Table::new()
//!     .with_column("x", vec![1.0, 2.0, 3.0])
//!     .unwrap()
//!     .with_column("y", vec![4.0, 5.0, 6.0])
//!     .unwrap();
//! let chart = Chart::unit(
//!     Mark::circle(),
//!     Encoding::new()
//!         .with(Channel::X, FieldDef::quantitative("x"))
//!         .with(Channel::Y, FieldDef::quantitative("y")),
//! )
//! .data(table);
//! assert_eq!(chart.to_json()["mark"], "circle");
//! ```

mod chart;
mod data;
mod encoding;
mod facet;
mod mark;
mod stat;

pub use chart::{Chart, ChartBody, ChartConfig};
pub use data::{Column, ColumnData, Table, Value, ValueKind};
pub use encoding::{Axis, Bin, Channel, ChannelDef, Encoding, FieldDef, FieldType, Legend, ValueDef};
pub use facet::Facet;
pub use mark::{Mark, MarkType};
pub use stat::{Aggregate, Estimator, SUPPORTED_CI};
