//! End-to-end chart scenarios.
//!
//! Each test builds a chart through the public API and inspects the
//! emitted Vega-Lite JSON.
//!
//! Run: cargo test --test scenarios_test

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use serde_json::{json, Value as Json};
use trueno_vega::grammar::{Channel, MarkType};
use trueno_vega::plots::GridCell;
use trueno_vega::prelude::*;

fn groups() -> Table {
    Table::new()
        .with_column("group", vec!["a", "a", "b", "b"])
        .unwrap()
        .with_column("value", vec![1.0, 3.0, 2.0, 4.0])
        .unwrap()
}

fn mark_types(chart: &Chart) -> Vec<MarkType> {
    chart.layers().iter().map(|l| l.mark().unwrap().mark_type).collect()
}

// ============================================================================
// Bar charts
// ============================================================================

#[test]
fn bar_mean_without_ci_is_single_mark() {
    let chart = CategoricalPlot::new()
        .data(groups())
        .x("group")
        .y("value")
        .estimator("mean".parse().unwrap())
        .ci(None)
        .build(PlotKind::Bar)
        .unwrap();

    assert!(chart.layers().is_empty());
    let spec = chart.to_vega_lite(&PlotConfig::default());
    assert_eq!(spec["mark"], "bar");
    assert_eq!(spec["encoding"]["y"]["field"], "value");
    assert_eq!(spec["encoding"]["y"]["aggregate"], "mean");
    assert_eq!(spec["encoding"]["x"]["field"], "group");
    assert!(spec.get("layer").is_none());
}

#[test]
fn bar_with_ci_adds_rule_over_bounds() {
    let chart = CategoricalPlot::new()
        .data(groups())
        .x("group")
        .y("value")
        .ci(Some(95.0))
        .build(PlotKind::Bar)
        .unwrap();

    assert_eq!(mark_types(&chart), vec![MarkType::Bar, MarkType::Rule]);
    let rule = chart.layers()[1].to_json();
    assert_eq!(rule["encoding"]["y"]["aggregate"], "ci0");
    assert_eq!(rule["encoding"]["y2"]["aggregate"], "ci1");
    assert_eq!(rule["encoding"]["y"]["field"], "value");
}

#[test]
fn bar_rejects_ci_other_than_95() {
    let err = CategoricalPlot::new()
        .data(groups())
        .x("group")
        .y("value")
        .ci(Some(68.0))
        .build(PlotKind::Bar)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidConfidence { .. }));
}

// ============================================================================
// Histogram
// ============================================================================

#[test]
fn histogram_default_binning() {
    let chart = Histogram::new().x(vec![1.0, 2.0, 2.0, 3.0, 3.0, 3.0]).build().unwrap();
    let spec = chart.to_json();

    assert_eq!(spec["mark"], "bar");
    assert_eq!(spec["encoding"]["x"]["bin"], json!(true));
    assert_eq!(spec["encoding"]["x"]["type"], "quantitative");
    assert_eq!(spec["encoding"]["y"]["aggregate"], "count");
    assert_eq!(spec["data"]["values"].as_array().unwrap().len(), 6);
}

// ============================================================================
// Regression
// ============================================================================

#[test]
fn regplot_three_groups_share_one_color_scale() {
    let table = Table::new()
        .with_column("x", vec![0.0, 1.0, 2.0, 3.0, 0.0, 1.0, 2.0, 3.0, 0.0, 1.0, 2.0, 3.0])
        .unwrap()
        .with_column("y", vec![0.0, 1.0, 2.1, 2.9, 1.0, 3.0, 5.2, 7.0, 3.0, 2.0, 1.1, 0.0])
        .unwrap()
        .with_column("g", vec!["p", "p", "p", "p", "q", "q", "q", "q", "r", "r", "r", "r"])
        .unwrap();

    let chart = RegPlot::new().data(table).x("x").y("y").hue("g").ci(None).build().unwrap();

    assert_eq!(
        mark_types(&chart),
        vec![
            MarkType::Circle,
            MarkType::Circle,
            MarkType::Circle,
            MarkType::Line,
            MarkType::Line,
            MarkType::Line,
        ]
    );

    let scales: Vec<Json> = chart
        .layers()
        .iter()
        .map(|l| l.to_json()["encoding"]["color"]["scale"].clone())
        .collect();
    assert!(scales.iter().all(|s| *s == scales[0]));
    assert_eq!(scales[0]["domain"], json!(["p", "q", "r"]));
    let range: HashSet<&str> =
        scales[0]["range"].as_array().unwrap().iter().map(|c| c.as_str().unwrap()).collect();
    assert_eq!(range.len(), 3);
}

#[test]
fn lmplot_pads_axes_five_percent() {
    let table = Table::new()
        .with_column("x", vec![0.0, 10.0, 20.0])
        .unwrap()
        .with_column("y", vec![100.0, 200.0, 300.0])
        .unwrap();
    let chart = LmPlot::new(table, "x", "y")
        .regression(RegPlot::new().ci(None))
        .build()
        .unwrap();

    let scatter = chart.layers()[0].to_json();
    assert_eq!(scatter["encoding"]["x"]["scale"]["domain"], json!([-1.0, 21.0]));
    assert_eq!(scatter["encoding"]["y"]["scale"]["domain"], json!([90.0, 310.0]));
    assert_eq!(scatter["encoding"]["x"]["scale"]["nice"], json!(false));
}

// ============================================================================
// Facet grids
// ============================================================================

fn tips() -> Table {
    Table::new()
        .with_column("day", vec!["thu", "fri", "thu", "fri", "thu", "fri"])
        .unwrap()
        .with_column("tip", vec![1.0, 2.0, 1.5, 3.0, 2.5, 1.0])
        .unwrap()
        .with_column("smoker", vec!["yes", "yes", "no", "no", "yes", "no"])
        .unwrap()
}

#[test]
fn facet_grid_population_is_structurally_idempotent() {
    let grid = FacetGrid::new(tips()).col("smoker").palette("muted");
    let draw = |cell: &GridCell| {
        CategoricalPlot::new()
            .data(cell.table.clone())
            .x("day")
            .y("tip")
            .size(cell.size)
            .config(cell.config.clone())
            .build(PlotKind::Point)
    };

    let first = grid.clone().map_dataframe(draw).unwrap();
    let second = grid.map_dataframe(draw).unwrap();
    assert_eq!(first.chart(), second.chart());
    assert_eq!(
        first.chart().facet_spec().unwrap().to_json(),
        second.chart().facet_spec().unwrap().to_json()
    );
}

#[test]
fn factorplot_rejects_unknown_kind_names() {
    assert!(matches!("swarm".parse::<PlotKind>(), Err(Error::UnknownPlotKind(_))));

    let plot = CategoricalPlot::new().data(tips()).x("day").y("tip");
    let grid = factorplot(&plot, "strip".parse().unwrap(), None, Some("smoker")).unwrap();
    let spec = grid.to_vega_lite();
    assert_eq!(spec["facet"]["column"]["field"], "smoker");
    assert!(spec["data"]["values"].is_array());
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn config_drives_palette_and_schema() {
    let config = PlotConfig::parse("palette: colorblind\nschema_url: https://example.org/vl.json\n")
        .unwrap();
    let chart = CategoricalPlot::new()
        .data(groups())
        .x("group")
        .y("value")
        .ci(None)
        .config(config.clone())
        .build(PlotKind::Bar)
        .unwrap();
    let spec = chart.to_vega_lite(&config);
    assert_eq!(spec["$schema"], "https://example.org/vl.json");
    assert!(spec["config"]["range"]["category"].is_array());
}
