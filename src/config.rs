//! Groups the per-call settings of a chart and validates them.

use rust_decimal::Decimal;
use time::{Date, OffsetDateTime, UtcOffset};

use crate::{
    Error, ValidationError,
    aggregation::{AggregationOptions, DEFAULT_TREND_THRESHOLD},
    chart::scale::{Canvas, Padding},
    movement::SeriesFilter,
    timezone::LocalTimezone,
    window::{DateWindow, Granularity},
};

/// Everything needed to turn a list of movements into a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub granularity: Granularity,
    /// How many calendar units to show, ending with the unit containing `end_date`.
    pub periods: u32,
    /// Defaults to today in `timezone`.
    pub end_date: Option<Date>,
    pub series: SeriesFilter,
    pub width: f64,
    pub height: f64,
    pub padding: Padding,
    /// A canonical timezone name, e.g. "Pacific/Auckland", or "UTC".
    pub timezone: String,
    pub trend_threshold: Decimal,
}

impl Default for ChartConfig {
    fn default() -> Self {
        let canvas = Canvas::default();

        Self {
            granularity: Granularity::Day,
            periods: 7,
            end_date: None,
            series: SeriesFilter::Both,
            width: canvas.width(),
            height: canvas.height(),
            padding: canvas.padding(),
            timezone: "UTC".to_owned(),
            trend_threshold: DEFAULT_TREND_THRESHOLD,
        }
    }
}

impl ChartConfig {
    /// # Errors
    /// Returns [Error::InvalidTimezone] if `timezone` is not a canonical timezone name.
    pub fn local_timezone(&self) -> Result<LocalTimezone, Error> {
        if self.timezone.eq_ignore_ascii_case("UTC") {
            return Ok(LocalTimezone::Fixed(UtcOffset::UTC));
        }

        LocalTimezone::from_name(&self.timezone)
    }

    /// Builds the aggregation options, using `now` to find today's date when
    /// no end date is set.
    ///
    /// # Errors
    /// Returns an error if the timezone is unknown or the window is invalid.
    pub fn aggregation_options(&self, now: OffsetDateTime) -> Result<AggregationOptions, Error> {
        let timezone = self.local_timezone()?;
        let end_date = match self.end_date {
            Some(date) => date,
            None => timezone
                .local_date(now)
                .ok_or_else(|| ValidationError::new("end_date", format!("{now} has no local date")))?,
        };
        let window = DateWindow::last_periods(self.granularity, self.periods, end_date)?;

        Ok(AggregationOptions::new(self.granularity, window)
            .with_series(self.series)
            .with_timezone(timezone)
            .with_trend_threshold(self.trend_threshold))
    }

    /// # Errors
    /// Returns an error if the dimensions or padding are invalid, see [Canvas::new].
    pub fn canvas(&self) -> Result<Canvas, Error> {
        Ok(Canvas::new(self.width, self.height, self.padding)?)
    }
}
