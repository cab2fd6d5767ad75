//! Draws chart geometry as a standalone SVG document.

use maud::{Markup, html};

use crate::{
    chart::{Chart, ChartGeometry, SeriesGeometry, spline::format_coordinate},
    movement::MovementKind,
};

const GRID_COLOR: &str = "#e5e7eb";
const LABEL_COLOR: &str = "#6b7280";
const FILL_OPACITY: &str = "0.15";
const MARKER_RADIUS: &str = "3";
const LEGEND_SWATCH_SIZE: f64 = 10.0;
const LEGEND_ENTRY_WIDTH: f64 = 100.0;

/// The stroke and fill colour of a series.
pub fn series_color(kind: MovementKind) -> &'static str {
    match kind {
        MovementKind::Inflow => "#16a34a",
        MovementKind::Outflow => "#dc2626",
    }
}

/// Renders `geometry` as an `svg` element sized to its canvas.
///
/// Fills are drawn beneath strokes, and markers above both. A chart with no
/// data is drawn as a centred "No data" message.
pub fn chart_svg(geometry: &ChartGeometry) -> Markup {
    let canvas = geometry.canvas();
    let width = format_coordinate(canvas.width());
    let height = format_coordinate(canvas.height());

    html!(
        svg
            xmlns="http://www.w3.org/2000/svg"
            width=(width)
            height=(height)
            viewBox=(format!("0 0 {width} {height}"))
            font-family="sans-serif"
            font-size="12"
        {
            @match geometry {
                ChartGeometry::NoData { .. } => {
                    text
                        class="no-data"
                        x=(format_coordinate(canvas.width() / 2.0))
                        y=(format_coordinate(canvas.height() / 2.0))
                        text-anchor="middle"
                        fill=(LABEL_COLOR)
                    { "No data" }
                }
                ChartGeometry::Chart(chart) => {
                    (grid_view(chart))
                    (x_labels_view(chart))
                    @for series in &chart.series {
                        (fill_view(series))
                    }
                    @for series in &chart.series {
                        (stroke_view(series))
                    }
                    @for series in &chart.series {
                        (markers_view(series))
                    }
                    (legend_view(chart))
                }
            }
        }
    )
}

fn grid_view(chart: &Chart) -> Markup {
    html!(
        g class="grid" {
            @for line in &chart.grid_lines {
                line
                    class="grid-line"
                    x1=(format_coordinate(line.x_start))
                    y1=(format_coordinate(line.y))
                    x2=(format_coordinate(line.x_end))
                    y2=(format_coordinate(line.y))
                    stroke=(GRID_COLOR)
                {}
                text
                    class="grid-label"
                    x=(format_coordinate(line.label.position.x))
                    y=(format_coordinate(line.label.position.y))
                    text-anchor="end"
                    dominant-baseline="middle"
                    fill=(LABEL_COLOR)
                { (line.label.text) }
            }
        }
    )
}

fn x_labels_view(chart: &Chart) -> Markup {
    html!(
        g class="x-labels" {
            @for label in &chart.x_labels {
                text
                    class="x-label"
                    x=(format_coordinate(label.position.x))
                    y=(format_coordinate(label.position.y))
                    text-anchor="middle"
                    dominant-baseline="hanging"
                    fill=(LABEL_COLOR)
                { (label.text) }
            }
        }
    )
}

fn fill_view(series: &SeriesGeometry) -> Markup {
    html!(
        @if !series.fill.is_empty() {
            path
                class={ "fill series-" (series.kind.as_str()) }
                d=(series.fill)
                fill=(series_color(series.kind))
                fill-opacity=(FILL_OPACITY)
                stroke="none"
            {}
        }
    )
}

fn stroke_view(series: &SeriesGeometry) -> Markup {
    html!(
        @if !series.stroke.is_empty() {
            path
                class={ "stroke series-" (series.kind.as_str()) }
                d=(series.stroke)
                fill="none"
                stroke=(series_color(series.kind))
                stroke-width="2"
            {}
        }
    )
}

fn markers_view(series: &SeriesGeometry) -> Markup {
    html!(
        g class={ "markers series-" (series.kind.as_str()) } {
            @for marker in &series.markers {
                circle
                    class="marker"
                    cx=(format_coordinate(marker.center.x))
                    cy=(format_coordinate(marker.center.y))
                    r=(MARKER_RADIUS)
                    fill=(series_color(series.kind))
                {
                    title { (marker.tooltip) }
                }
            }
        }
    )
}

fn legend_view(chart: &Chart) -> Markup {
    let padding = chart.canvas.padding();
    let y = (padding.top - LEGEND_SWATCH_SIZE) / 2.0;

    html!(
        g class="legend" {
            @for (index, entry) in chart.legend.iter().enumerate() {
                @let x = padding.left + index as f64 * LEGEND_ENTRY_WIDTH;
                rect
                    class={ "legend-swatch series-" (entry.kind.as_str()) }
                    x=(format_coordinate(x))
                    y=(format_coordinate(y))
                    width=(format_coordinate(LEGEND_SWATCH_SIZE))
                    height=(format_coordinate(LEGEND_SWATCH_SIZE))
                    fill=(series_color(entry.kind))
                {}
                text
                    class="legend-label"
                    x=(format_coordinate(x + LEGEND_SWATCH_SIZE + 4.0))
                    y=(format_coordinate(y + LEGEND_SWATCH_SIZE / 2.0))
                    dominant-baseline="middle"
                { (entry.label) }
            }
        }
    )
}
