//! Cashflow charts turns a list of account movements into a smooth line chart
//! of money in and money out.
//!
//! The library is split into two pure steps:
//! 1. [aggregate] buckets movements by day, week or month and derives trends
//!    and averages.
//! 2. [render] lays the buckets out as drawing geometry: a value scale with
//!    grid lines, Catmull-Rom curves with filled areas, markers and labels.
//!
//! The geometry can be drawn on any 2-D surface. [svg::chart_svg] draws it as
//! an SVG document.
//!
//! ```no_run
//! use cashflow_charts::{
//!     AggregationOptions, Canvas, DateWindow, Granularity, SeriesFilter, aggregate,
//!     input::parse_movements_json, render, svg::chart_svg,
//! };
//! use time::macros::date;
//!
//! # fn main() -> Result<(), cashflow_charts::Error> {
//! let movements = parse_movements_json(&std::fs::read_to_string("movements.json").unwrap())?;
//! let window = DateWindow::new(date!(2025 - 03 - 10), date!(2025 - 03 - 16))?;
//! let result = aggregate(&movements, &AggregationOptions::new(Granularity::Day, window))?;
//! let geometry = render(&result, SeriesFilter::Both, &Canvas::default());
//! println!("{}", chart_svg(&geometry).into_string());
//! # Ok(())
//! # }
//! ```

pub mod aggregation;
pub mod chart;
pub mod config;
mod error;
pub mod format;
pub mod input;
pub mod logging;
pub mod movement;
pub mod svg;
pub mod timezone;
pub mod window;

#[cfg(test)]
mod test_utils;

pub use aggregation::{AggregationOptions, AggregationResult, Bucket, Trend, aggregate};
pub use chart::{
    ChartGeometry, render,
    scale::{Canvas, Padding},
};
pub use config::ChartConfig;
pub use error::{Error, ValidationError};
pub use movement::{Movement, MovementKind, SeriesFilter};
pub use timezone::LocalTimezone;
pub use window::{DateWindow, Granularity};
