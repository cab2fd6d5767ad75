//! Calendar windows and the periods (days, weeks, months) they are split into.

use serde::{Deserialize, Serialize};
use time::{Date, Duration, Month, Weekday};

use crate::{ValidationError, format::format_period_label};

/// The weekday that every week bucket starts on.
pub const WEEK_START: Weekday = Weekday::Monday;

/// The calendar unit used to partition a window into buckets.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Granularity {
    /// One bucket per local calendar day.
    #[default]
    Day,
    /// One bucket per week, starting on [WEEK_START].
    Week,
    /// One bucket per calendar month.
    Month,
}

impl Granularity {
    /// The lowercase name of the unit, e.g. "week".
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

/// One calendar unit, from `start` to `end` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Period {
    pub start: Date,
    pub end: Date,
}

/// An inclusive range of local dates.
///
/// A window always has `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    start: Date,
    end: Date,
}

impl DateWindow {
    /// Create a window from `start` to `end` inclusive.
    ///
    /// # Errors
    /// Returns a [ValidationError] for the `window` field if `start` is after `end`.
    pub fn new(start: Date, end: Date) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::new(
                "window",
                format!("start {start} is after end {end}"),
            ));
        }

        Ok(Self { start, end })
    }

    /// Create the window covering the `count` calendar units of `granularity`
    /// that end with the unit containing `anchor`.
    ///
    /// For example, seven days ending today, or twelve months ending with the
    /// current month.
    ///
    /// # Errors
    /// Returns a [ValidationError] if `count` is zero or the window would start
    /// before the earliest representable date.
    pub fn last_periods(
        granularity: Granularity,
        count: u32,
        anchor: Date,
    ) -> Result<Self, ValidationError> {
        if count == 0 {
            return Err(ValidationError::new(
                "periods",
                "must cover at least one period",
            ));
        }

        let end = compute_period(granularity, anchor).end;
        let mut start = compute_period(granularity, anchor).start;

        for _ in 1..count {
            let previous_day = start.previous_day().ok_or_else(|| {
                ValidationError::new("periods", format!("{count} periods reach past {start}"))
            })?;
            start = compute_period(granularity, previous_day).start;
        }

        Self::new(start, end)
    }

    pub fn start(&self) -> Date {
        self.start
    }

    pub fn end(&self) -> Date {
        self.end
    }

    /// Whether `date` falls within the window.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Splits the window into every calendar unit it touches, in ascending order.
    ///
    /// The first and last periods may extend past the window when the window
    /// does not start or end on a unit boundary, e.g. a window starting on a
    /// Wednesday split into weeks starts with the week beginning on Monday.
    pub fn periods(&self, granularity: Granularity) -> Vec<Period> {
        let mut periods = Vec::new();
        let mut cursor = self.start;

        loop {
            let period = compute_period(granularity, cursor);
            periods.push(period);

            match period.end.next_day() {
                Some(next) if next <= self.end => cursor = next,
                _ => break,
            }
        }

        periods
    }
}

/// A calendar period together with its display label.
pub fn labelled_periods(window: &DateWindow, granularity: Granularity) -> Vec<(Period, String)> {
    window
        .periods(granularity)
        .into_iter()
        .map(|period| (period, format_period_label(granularity, period.start)))
        .collect()
}

/// Gets the calendar unit of `granularity` that contains `date`.
pub fn compute_period(granularity: Granularity, date: Date) -> Period {
    match granularity {
        Granularity::Day => Period {
            start: date,
            end: date,
        },
        Granularity::Week => week_bounds(date),
        Granularity::Month => month_bounds(date.year(), date.month()),
    }
}

fn week_bounds(anchor_date: Date) -> Period {
    let days_since_start = anchor_date.weekday().number_days_from_monday() as i64
        - WEEK_START.number_days_from_monday() as i64;
    let days_since_start = days_since_start.rem_euclid(7);
    let start = anchor_date
        .checked_sub(Duration::days(days_since_start))
        .unwrap_or(Date::MIN);
    let end = start.checked_add(Duration::days(6)).unwrap_or(Date::MAX);

    Period { start, end }
}

fn month_bounds(year: i32, month: Month) -> Period {
    let last_day = time::util::days_in_year_month(year, month);

    // Day 1 and the last day of the month are always valid for an existing date's month.
    let start = Date::from_calendar_date(year, month, 1).unwrap_or(Date::MIN);
    let end = Date::from_calendar_date(year, month, last_day).unwrap_or(Date::MAX);

    Period { start, end }
}
