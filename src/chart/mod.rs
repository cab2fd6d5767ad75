//! Lays out an aggregation result as a smooth multi-series line chart.
//!
//! The output is plain geometry (points, path commands and label text) that
//! any 2-D drawing surface can draw:
//! - **Grid**: evenly spaced horizontal lines from zero to the top of the scale
//! - **Curves**: one Catmull-Rom curve per visible series, with the area beneath filled
//! - **Markers**: one per bucket per visible series
//! - **Labels**: a value label per grid line and a date label per bucket
//!
//! See [crate::svg] for drawing the geometry as an SVG document.

pub mod scale;
pub mod spline;

use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::{
    aggregation::{AggregationResult, Bucket},
    chart::{
        scale::{Canvas, CoordinateMapper, ValueScale},
        spline::{Path, Point, area_path, smooth_path},
    },
    format::{format_currency, format_currency_rounded},
    movement::{MovementKind, SeriesFilter},
};

/// The number of horizontal grid lines, including the one at zero.
pub const GRID_LINE_COUNT: usize = 5;

/// The gap between the graph and its axis labels, in drawing units.
const LABEL_GAP: f64 = 8.0;

/// The result of laying out a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartGeometry {
    /// There were no buckets to draw. Callers should show a placeholder.
    NoData { canvas: Canvas },
    Chart(Chart),
}

impl ChartGeometry {
    pub fn canvas(&self) -> Canvas {
        match self {
            Self::NoData { canvas } => *canvas,
            Self::Chart(chart) => chart.canvas,
        }
    }

    /// The laid out chart, or `None` if there was no data.
    pub fn chart(&self) -> Option<&Chart> {
        match self {
            Self::NoData { .. } => None,
            Self::Chart(chart) => Some(chart),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub canvas: Canvas,
    /// The value at the top of the vertical axis.
    pub max_value: f64,
    /// From the baseline upwards.
    pub grid_lines: Vec<GridLine>,
    /// One per bucket, from left to right.
    pub x_labels: Vec<AxisLabel>,
    /// Only the visible series, inflow first.
    pub series: Vec<SeriesGeometry>,
    pub legend: Vec<LegendEntry>,
}

impl Chart {
    /// The geometry of the `kind` series, if it is visible.
    pub fn series(&self, kind: MovementKind) -> Option<&SeriesGeometry> {
        self.series.iter().find(|series| series.kind == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridLine {
    pub value: f64,
    pub y: f64,
    pub x_start: f64,
    pub x_end: f64,
    /// Positioned to the left of `x_start`.
    pub label: AxisLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLabel {
    pub text: String,
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesGeometry {
    pub kind: MovementKind,
    /// The curve passes through these points, one per bucket.
    pub points: Vec<Point>,
    pub stroke: Path,
    /// The region between the curve and the baseline.
    pub fill: Path,
    pub markers: Vec<Marker>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub center: Point,
    pub value: f64,
    /// e.g. "10 Mar: $100.00"
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub kind: MovementKind,
    pub label: &'static str,
}

/// Lays out the buckets of `result` on `canvas`.
///
/// Only the series included by `series_filter` produce curves, fills,
/// markers and legend entries. The vertical scale always covers both series
/// so toggling a series does not rescale the other.
///
/// Returns [ChartGeometry::NoData] if `result` has no buckets.
pub fn render(
    result: &AggregationResult,
    series_filter: SeriesFilter,
    canvas: &Canvas,
) -> ChartGeometry {
    let buckets = result.buckets();

    if buckets.is_empty() {
        tracing::debug!("No buckets to render");
        return ChartGeometry::NoData { canvas: *canvas };
    }

    let scale = ValueScale::fit(buckets.iter().flat_map(|bucket| {
        [
            bucket_value(bucket, MovementKind::Inflow),
            bucket_value(bucket, MovementKind::Outflow),
        ]
    }));
    let mapper = CoordinateMapper::new(*canvas, scale, buckets.len());

    let grid_lines = scale
        .ticks(GRID_LINE_COUNT)
        .into_iter()
        .map(|value| grid_line(canvas, &mapper, value))
        .collect();

    let x_labels = buckets
        .iter()
        .enumerate()
        .map(|(index, bucket)| AxisLabel {
            text: bucket.period_label().to_owned(),
            position: Point::new(mapper.x(index), canvas.baseline() + LABEL_GAP),
        })
        .collect();

    let visible_kinds = series_filter.kinds();

    let series = visible_kinds
        .iter()
        .map(|&kind| series_geometry(kind, buckets, canvas, &mapper))
        .collect();

    let legend = visible_kinds
        .iter()
        .map(|&kind| LegendEntry {
            kind,
            label: kind.label(),
        })
        .collect();

    tracing::debug!(
        "Rendered {} buckets of {} series with a scale of 0 to {}",
        buckets.len(),
        visible_kinds.len(),
        scale.max_value()
    );

    ChartGeometry::Chart(Chart {
        canvas: *canvas,
        max_value: scale.max_value(),
        grid_lines,
        x_labels,
        series,
        legend,
    })
}

fn bucket_value(bucket: &Bucket, kind: MovementKind) -> f64 {
    bucket.total(kind).to_f64().unwrap_or_default()
}

fn grid_line(canvas: &Canvas, mapper: &CoordinateMapper, value: f64) -> GridLine {
    let y = mapper.y(value);

    GridLine {
        value,
        y,
        x_start: canvas.graph_left(),
        x_end: canvas.graph_right(),
        label: AxisLabel {
            text: format_currency_rounded(value),
            position: Point::new(canvas.graph_left() - LABEL_GAP, y),
        },
    }
}

fn series_geometry(
    kind: MovementKind,
    buckets: &[Bucket],
    canvas: &Canvas,
    mapper: &CoordinateMapper,
) -> SeriesGeometry {
    let values: Vec<f64> = buckets
        .iter()
        .map(|bucket| bucket_value(bucket, kind))
        .collect();

    let points: Vec<Point> = values
        .iter()
        .enumerate()
        .map(|(index, &value)| mapper.point(index, value))
        .collect();

    let markers = buckets
        .iter()
        .zip(&points)
        .zip(&values)
        .map(|((bucket, &center), &value)| Marker {
            center,
            value,
            tooltip: format!("{}: {}", bucket.period_label(), format_currency(value)),
        })
        .collect();

    SeriesGeometry {
        kind,
        stroke: smooth_path(&points),
        fill: area_path(&points, canvas.baseline()),
        points,
        markers,
    }
}
