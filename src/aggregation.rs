//! Movement aggregation for charts.
//!
//! Splits a date window into calendar buckets, sums the inflows and outflows
//! that fall into each bucket, and derives trends and averages from the
//! resulting bucket sequence.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use time::Date;

use crate::{
    Error, ValidationError,
    movement::{Movement, MovementKind, SeriesFilter, validate_movements},
    timezone::LocalTimezone,
    window::{DateWindow, Granularity, Period, labelled_periods},
};

/// The relative change between the first and second half of a bucket
/// sequence needed before a series is classified as rising or falling.
pub const DEFAULT_TREND_THRESHOLD: Decimal = dec!(0.05);

/// Controls how movements are split into buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationOptions {
    /// The calendar unit of each bucket.
    pub granularity: Granularity,
    /// The dates to produce buckets for. Movements outside the window are ignored.
    pub window: DateWindow,
    /// Which kinds of movement are summed.
    pub series: SeriesFilter,
    /// The timezone whose midnight separates one day from the next.
    pub timezone: LocalTimezone,
    /// See [DEFAULT_TREND_THRESHOLD].
    pub trend_threshold: Decimal,
}

impl AggregationOptions {
    /// Options for both series in UTC with the default trend threshold.
    pub fn new(granularity: Granularity, window: DateWindow) -> Self {
        Self {
            granularity,
            window,
            series: SeriesFilter::Both,
            timezone: LocalTimezone::default(),
            trend_threshold: DEFAULT_TREND_THRESHOLD,
        }
    }

    pub fn with_series(mut self, series: SeriesFilter) -> Self {
        self.series = series;
        self
    }

    pub fn with_timezone(mut self, timezone: LocalTimezone) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn with_trend_threshold(mut self, trend_threshold: Decimal) -> Self {
        self.trend_threshold = trend_threshold;
        self
    }
}

/// The movements that fell into one calendar unit.
///
/// `net_balance` always equals `total_inflow - total_outflow`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    period_label: String,
    period_start: Date,
    period_end: Date,
    total_inflow: Decimal,
    total_outflow: Decimal,
    net_balance: Decimal,
    movement_count: usize,
}

impl Bucket {
    pub fn new(
        period: Period,
        period_label: String,
        total_inflow: Decimal,
        total_outflow: Decimal,
        movement_count: usize,
    ) -> Self {
        Self {
            period_label,
            period_start: period.start,
            period_end: period.end,
            total_inflow,
            total_outflow,
            net_balance: total_inflow - total_outflow,
            movement_count,
        }
    }

    pub fn period_label(&self) -> &str {
        &self.period_label
    }

    pub fn period_start(&self) -> Date {
        self.period_start
    }

    pub fn period_end(&self) -> Date {
        self.period_end
    }

    pub fn total_inflow(&self) -> Decimal {
        self.total_inflow
    }

    pub fn total_outflow(&self) -> Decimal {
        self.total_outflow
    }

    pub fn net_balance(&self) -> Decimal {
        self.net_balance
    }

    pub fn movement_count(&self) -> usize {
        self.movement_count
    }

    /// The total of the series made up of `kind` movements.
    pub fn total(&self, kind: MovementKind) -> Decimal {
        match kind {
            MovementKind::Inflow => self.total_inflow,
            MovementKind::Outflow => self.total_outflow,
        }
    }
}

/// The direction a series moved over the window.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    Rising,
    Falling,
    #[default]
    Flat,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Trends {
    pub inflow: Trend,
    pub outflow: Trend,
    pub balance: Trend,
}

/// Arithmetic means over every bucket, empty buckets included.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Averages {
    pub inflow: Decimal,
    pub outflow: Decimal,
    pub balance: Decimal,
}

/// Sums over the whole window.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub inflow: Decimal,
    pub outflow: Decimal,
    pub net_balance: Decimal,
    pub movement_count: usize,
}

/// The bucket sequence and the statistics derived from it.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct AggregationResult {
    granularity: Granularity,
    buckets: Vec<Bucket>,
    trend: Trends,
    averages: Averages,
    totals: Totals,
}

impl AggregationResult {
    /// Derives trends, averages and totals from `buckets`.
    ///
    /// `buckets` must be in ascending time order.
    ///
    /// # Errors
    /// Returns a [ValidationError] for the `movements` field if a window total
    /// is too large to represent.
    pub fn from_buckets(
        granularity: Granularity,
        buckets: Vec<Bucket>,
        trend_threshold: Decimal,
    ) -> Result<Self, ValidationError> {
        let inflows: Vec<_> = buckets.iter().map(Bucket::total_inflow).collect();
        let outflows: Vec<_> = buckets.iter().map(Bucket::total_outflow).collect();
        let balances: Vec<_> = buckets.iter().map(Bucket::net_balance).collect();

        let trend = Trends {
            inflow: classify_trend(&inflows, trend_threshold),
            outflow: classify_trend(&outflows, trend_threshold),
            balance: classify_trend(&balances, trend_threshold),
        };

        let too_large = |series: &str| {
            ValidationError::new(
                "movements",
                format!("the total {series} of the window is too large to represent"),
            )
        };

        // Both totals fitting means every partial sum of the three series fits too.
        let inflow = checked_sum(&inflows).ok_or_else(|| too_large("inflow"))?;
        let outflow = checked_sum(&outflows).ok_or_else(|| too_large("outflow"))?;
        let totals = Totals {
            inflow,
            outflow,
            net_balance: inflow - outflow,
            movement_count: buckets.iter().map(Bucket::movement_count).sum(),
        };

        let averages = Averages {
            inflow: mean(&inflows).ok_or_else(|| too_large("inflow"))?,
            outflow: mean(&outflows).ok_or_else(|| too_large("outflow"))?,
            balance: mean(&balances).ok_or_else(|| too_large("balance"))?,
        };

        Ok(Self {
            granularity,
            buckets,
            trend,
            averages,
            totals,
        })
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn trend(&self) -> Trends {
        self.trend
    }

    pub fn averages(&self) -> Averages {
        self.averages
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }
}

/// Sums movements into one bucket per calendar unit of the window.
///
/// Every unit in the window gets a bucket, even if no movements fall into it.
/// Movements outside the window, or of a kind excluded by `options.series`, are
/// ignored.
///
/// # Errors
/// Returns [Error::Validation] if a movement has a negative amount or a
/// timestamp that has no local date, or if the trend threshold is negative.
pub fn aggregate(
    movements: &[Movement],
    options: &AggregationOptions,
) -> Result<AggregationResult, Error> {
    validate_movements(movements)?;

    if options.trend_threshold < Decimal::ZERO {
        return Err(ValidationError::new(
            "trend_threshold",
            format!("must not be negative, got {}", options.trend_threshold),
        )
        .into());
    }

    let periods = labelled_periods(&options.window, options.granularity);
    let mut totals = vec![BucketTotals::default(); periods.len()];
    let mut outside_window = 0;
    let mut filtered_out = 0;

    for (index, movement) in movements.iter().enumerate() {
        if !options.series.includes(movement.kind) {
            filtered_out += 1;
            continue;
        }

        let date = options
            .timezone
            .local_date(movement.timestamp)
            .ok_or_else(|| {
                ValidationError::movement(
                    index,
                    "timestamp",
                    format!("{} has no local date", movement.timestamp),
                )
            })?;

        if !options.window.contains(date) {
            outside_window += 1;
            continue;
        }

        let bucket_index = periods.partition_point(|(period, _)| period.end < date);
        totals[bucket_index].add(movement).ok_or_else(|| {
            ValidationError::movement(
                index,
                "amount",
                format!(
                    "{} takes the bucket total past the largest representable amount",
                    movement.amount
                ),
            )
        })?;
    }

    tracing::debug!(
        "Aggregated {} movements into {} {} buckets ({outside_window} outside the window, \
        {filtered_out} filtered out)",
        movements.len(),
        periods.len(),
        options.granularity.as_str(),
    );

    let buckets = periods
        .into_iter()
        .zip(totals)
        .map(|((period, label), totals)| {
            Bucket::new(period, label, totals.inflow, totals.outflow, totals.count)
        })
        .collect();

    Ok(AggregationResult::from_buckets(
        options.granularity,
        buckets,
        options.trend_threshold,
    )?)
}

#[derive(Debug, Default, Clone, Copy)]
struct BucketTotals {
    inflow: Decimal,
    outflow: Decimal,
    count: usize,
}

impl BucketTotals {
    /// Returns `None`, leaving the totals unchanged, if the sum overflows.
    fn add(&mut self, movement: &Movement) -> Option<()> {
        let total = match movement.kind {
            MovementKind::Inflow => &mut self.inflow,
            MovementKind::Outflow => &mut self.outflow,
        };
        *total = total.checked_add(movement.amount)?;
        self.count += 1;

        Some(())
    }
}

fn checked_sum(values: &[Decimal]) -> Option<Decimal> {
    values
        .iter()
        .try_fold(Decimal::ZERO, |sum, value| sum.checked_add(*value))
}

fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return Some(Decimal::ZERO);
    }

    checked_sum(values)?.checked_div(Decimal::from(values.len()))
}

/// Compares the mean of the first half of `values` to the mean of the second half.
///
/// The middle value of an odd-length sequence belongs to neither half.
/// Sequences shorter than two values are always [Trend::Flat].
fn classify_trend(values: &[Decimal], threshold: Decimal) -> Trend {
    let half = values.len() / 2;

    if half == 0 {
        return Trend::Flat;
    }

    let (Some(first), Some(second)) = (mean(&values[..half]), mean(&values[values.len() - half..]))
    else {
        return Trend::Flat;
    };

    // A difference too large to represent is far past any threshold.
    let Some(delta) = second.checked_sub(first) else {
        return if second > first {
            Trend::Rising
        } else {
            Trend::Falling
        };
    };

    // A zero baseline has no relative change, so any movement away from zero counts.
    let relative_change = if first.is_zero() {
        None
    } else {
        delta.checked_div(first.abs())
    };

    match relative_change {
        Some(change) if change > threshold => Trend::Rising,
        Some(change) if change < -threshold => Trend::Falling,
        Some(_) => Trend::Flat,
        None if delta > Decimal::ZERO => Trend::Rising,
        None if delta < Decimal::ZERO => Trend::Falling,
        None => Trend::Flat,
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use time::macros::{date, datetime, offset};

    use crate::{
        Error,
        movement::{Movement, SeriesFilter},
        timezone::LocalTimezone,
        window::{DateWindow, Granularity},
    };

    use super::{
        AggregationOptions, AggregationResult, DEFAULT_TREND_THRESHOLD, Trend, aggregate,
        classify_trend,
    };

    fn day_options(start: time::Date, end: time::Date) -> AggregationOptions {
        AggregationOptions::new(Granularity::Day, DateWindow::new(start, end).unwrap())
    }

    #[test]
    fn aggregate_sums_inflows_and_outflows_per_day() {
        let movements = vec![
            Movement::inflow(dec!(100), datetime!(2025-03-10 09:00 UTC)),
            Movement::outflow(dec!(40), datetime!(2025-03-10 18:00 UTC)),
            Movement::inflow(dec!(50), datetime!(2025-03-11 12:00 UTC)),
        ];
        let options = day_options(date!(2025 - 03 - 10), date!(2025 - 03 - 11));

        let result = aggregate(&movements, &options).unwrap();
        let buckets = result.buckets();

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].total_inflow(), dec!(100));
        assert_eq!(buckets[0].total_outflow(), dec!(40));
        assert_eq!(buckets[0].net_balance(), dec!(60));
        assert_eq!(buckets[0].movement_count(), 2);
        assert_eq!(buckets[1].total_inflow(), dec!(50));
        assert_eq!(buckets[1].total_outflow(), dec!(0));
        assert_eq!(buckets[1].net_balance(), dec!(50));
        assert_eq!(buckets[1].movement_count(), 1);
    }

    #[test]
    fn empty_movements_produce_zero_buckets_and_flat_trends() {
        let options = day_options(date!(2025 - 03 - 10), date!(2025 - 03 - 12));

        let result = aggregate(&[], &options).unwrap();

        assert_eq!(result.buckets().len(), 3);
        for bucket in result.buckets() {
            assert_eq!(bucket.total_inflow(), Decimal::ZERO);
            assert_eq!(bucket.total_outflow(), Decimal::ZERO);
            assert_eq!(bucket.net_balance(), Decimal::ZERO);
            assert_eq!(bucket.movement_count(), 0);
        }
        assert_eq!(result.trend().inflow, Trend::Flat);
        assert_eq!(result.trend().outflow, Trend::Flat);
        assert_eq!(result.trend().balance, Trend::Flat);
    }

    #[test]
    fn sparse_week_window_still_has_seven_day_buckets() {
        let movements = vec![Movement::outflow(
            dec!(12.50),
            datetime!(2025-03-13 08:00 UTC),
        )];
        let options = day_options(date!(2025 - 03 - 10), date!(2025 - 03 - 16));

        let result = aggregate(&movements, &options).unwrap();

        assert_eq!(result.buckets().len(), 7);
        assert_eq!(result.buckets()[3].total_outflow(), dec!(12.50));
        assert_eq!(result.buckets()[3].period_label(), "13 Mar");
    }

    #[test]
    fn movements_outside_window_are_ignored() {
        let movements = vec![
            Movement::inflow(dec!(10), datetime!(2025-03-09 23:59 UTC)),
            Movement::inflow(dec!(20), datetime!(2025-03-10 00:00 UTC)),
            Movement::inflow(dec!(30), datetime!(2025-03-12 00:00 UTC)),
        ];
        let options = day_options(date!(2025 - 03 - 10), date!(2025 - 03 - 11));

        let result = aggregate(&movements, &options).unwrap();

        assert_eq!(result.totals().inflow, dec!(20));
        assert_eq!(result.totals().movement_count, 1);
    }

    #[test]
    fn week_buckets_ignore_days_of_partial_weeks_outside_window() {
        // The window starts on a Wednesday, so the Monday movement is outside
        // the window even though it is in the first week bucket.
        let movements = vec![
            Movement::inflow(dec!(10), datetime!(2025-03-10 12:00 UTC)),
            Movement::inflow(dec!(20), datetime!(2025-03-12 12:00 UTC)),
            Movement::inflow(dec!(30), datetime!(2025-03-17 12:00 UTC)),
        ];
        let window = DateWindow::new(date!(2025 - 03 - 12), date!(2025 - 03 - 18)).unwrap();
        let options = AggregationOptions::new(Granularity::Week, window);

        let result = aggregate(&movements, &options).unwrap();

        assert_eq!(result.buckets().len(), 2);
        assert_eq!(result.buckets()[0].period_start(), date!(2025 - 03 - 10));
        assert_eq!(result.buckets()[0].total_inflow(), dec!(20));
        assert_eq!(result.buckets()[1].total_inflow(), dec!(30));
    }

    #[test]
    fn month_buckets_start_on_the_first() {
        let movements = vec![
            Movement::outflow(dec!(5), datetime!(2025-01-31 12:00 UTC)),
            Movement::outflow(dec!(7), datetime!(2025-02-01 12:00 UTC)),
        ];
        let window = DateWindow::new(date!(2025 - 01 - 01), date!(2025 - 02 - 28)).unwrap();
        let options = AggregationOptions::new(Granularity::Month, window);

        let result = aggregate(&movements, &options).unwrap();

        assert_eq!(result.buckets()[0].period_start(), date!(2025 - 01 - 01));
        assert_eq!(result.buckets()[0].period_end(), date!(2025 - 01 - 31));
        assert_eq!(result.buckets()[0].total_outflow(), dec!(5));
        assert_eq!(result.buckets()[1].total_outflow(), dec!(7));
        assert_eq!(result.buckets()[1].period_label(), "Feb 2025");
    }

    #[test]
    fn day_boundaries_use_local_midnight() {
        // 11:30 UTC is 00:30 the next day in UTC+13.
        let movements = vec![Movement::inflow(dec!(10), datetime!(2025-01-10 11:30 UTC))];
        let options = day_options(date!(2025 - 01 - 10), date!(2025 - 01 - 11))
            .with_timezone(LocalTimezone::Fixed(offset!(+13)));

        let result = aggregate(&movements, &options).unwrap();

        assert_eq!(result.buckets()[0].movement_count(), 0);
        assert_eq!(result.buckets()[1].movement_count(), 1);
    }

    #[test]
    fn series_filter_excludes_other_kind() {
        let movements = vec![
            Movement::inflow(dec!(100), datetime!(2025-03-10 09:00 UTC)),
            Movement::outflow(dec!(40), datetime!(2025-03-10 18:00 UTC)),
        ];
        let options = day_options(date!(2025 - 03 - 10), date!(2025 - 03 - 10))
            .with_series(SeriesFilter::Outflow);

        let result = aggregate(&movements, &options).unwrap();
        let bucket = &result.buckets()[0];

        assert_eq!(bucket.total_inflow(), dec!(0));
        assert_eq!(bucket.total_outflow(), dec!(40));
        assert_eq!(bucket.net_balance(), dec!(-40));
        assert_eq!(bucket.movement_count(), 1);
    }

    #[test]
    fn negative_amount_is_rejected_with_field() {
        let movements = vec![Movement::inflow(dec!(-1), datetime!(2025-03-10 09:00 UTC))];
        let options = day_options(date!(2025 - 03 - 10), date!(2025 - 03 - 10));

        let error = aggregate(&movements, &options).unwrap_err();

        match error {
            Error::Validation(error) => assert_eq!(error.field, "movements[0].amount"),
            error => panic!("expected a validation error, got {error:?}"),
        }
    }

    #[test]
    fn bucket_total_overflow_is_rejected_with_field() {
        let movements = vec![
            Movement::inflow(Decimal::MAX - dec!(1), datetime!(2025-03-10 09:00 UTC)),
            Movement::inflow(dec!(2), datetime!(2025-03-10 10:00 UTC)),
        ];
        let options = day_options(date!(2025 - 03 - 10), date!(2025 - 03 - 11));

        let error = aggregate(&movements, &options).unwrap_err();

        match error {
            Error::Validation(error) => assert_eq!(error.field, "movements[1].amount"),
            error => panic!("expected a validation error, got {error:?}"),
        }
    }

    #[test]
    fn window_total_overflow_is_rejected() {
        let movements = vec![
            Movement::outflow(Decimal::MAX - dec!(1), datetime!(2025-03-10 09:00 UTC)),
            Movement::outflow(dec!(2), datetime!(2025-03-11 09:00 UTC)),
        ];
        let options = day_options(date!(2025 - 03 - 10), date!(2025 - 03 - 11));

        let error = aggregate(&movements, &options).unwrap_err();

        match error {
            Error::Validation(error) => assert_eq!(error.field, "movements"),
            error => panic!("expected a validation error, got {error:?}"),
        }
    }

    #[test]
    fn largest_amounts_that_fit_are_aggregated() {
        let movements = vec![
            Movement::inflow(Decimal::MAX, datetime!(2025-03-10 09:00 UTC)),
            Movement::outflow(Decimal::MAX, datetime!(2025-03-11 09:00 UTC)),
        ];
        let options = day_options(date!(2025 - 03 - 10), date!(2025 - 03 - 11));

        let result = aggregate(&movements, &options).unwrap();

        assert_eq!(result.totals().inflow, Decimal::MAX);
        assert_eq!(result.totals().net_balance, Decimal::ZERO);
        assert_eq!(result.trend().balance, Trend::Falling);
    }

    #[test]
    fn negative_trend_threshold_is_rejected() {
        let options = day_options(date!(2025 - 03 - 10), date!(2025 - 03 - 10))
            .with_trend_threshold(dec!(-0.1));

        let error = aggregate(&[], &options).unwrap_err();

        match error {
            Error::Validation(error) => assert_eq!(error.field, "trend_threshold"),
            error => panic!("expected a validation error, got {error:?}"),
        }
    }

    #[test]
    fn aggregate_is_idempotent() {
        let movements = vec![
            Movement::inflow(dec!(100.10), datetime!(2025-03-10 09:00 UTC)),
            Movement::outflow(dec!(33.33), datetime!(2025-03-11 18:00 UTC)),
            Movement::outflow(dec!(0.01), datetime!(2025-03-12 18:00 UTC)),
        ];
        let options = day_options(date!(2025 - 03 - 10), date!(2025 - 03 - 12));

        let first = aggregate(&movements, &options).unwrap();
        let second = aggregate(&movements, &options).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn net_balance_is_inflow_minus_outflow_for_every_bucket() {
        let movements: Vec<_> = (0..30)
            .map(|i| {
                let timestamp = datetime!(2025-03-01 12:00 UTC) + time::Duration::days(i % 10);
                let amount = Decimal::from(i) * dec!(1.37);
                if i % 3 == 0 {
                    Movement::outflow(amount, timestamp)
                } else {
                    Movement::inflow(amount, timestamp)
                }
            })
            .collect();
        let options = day_options(date!(2025 - 03 - 01), date!(2025 - 03 - 10));

        let result = aggregate(&movements, &options).unwrap();

        for bucket in result.buckets() {
            assert_eq!(
                bucket.net_balance(),
                bucket.total_inflow() - bucket.total_outflow()
            );
        }
        assert_eq!(result.totals().movement_count, 30);
    }

    #[test]
    fn averages_include_empty_buckets() {
        let movements = vec![
            Movement::inflow(dec!(90), datetime!(2025-03-10 09:00 UTC)),
            Movement::outflow(dec!(30), datetime!(2025-03-12 09:00 UTC)),
        ];
        let options = day_options(date!(2025 - 03 - 10), date!(2025 - 03 - 12));

        let result = aggregate(&movements, &options).unwrap();

        assert_eq!(result.averages().inflow, dec!(30));
        assert_eq!(result.averages().outflow, dec!(10));
        assert_eq!(result.averages().balance, dec!(20));
    }

    #[test]
    fn trends_compare_first_and_second_half() {
        let movements = vec![
            Movement::inflow(dec!(100), datetime!(2025-03-10 09:00 UTC)),
            Movement::outflow(dec!(10), datetime!(2025-03-10 09:00 UTC)),
            Movement::inflow(dec!(50), datetime!(2025-03-13 09:00 UTC)),
            Movement::outflow(dec!(80), datetime!(2025-03-13 09:00 UTC)),
        ];
        let options = day_options(date!(2025 - 03 - 10), date!(2025 - 03 - 13));

        let result = aggregate(&movements, &options).unwrap();

        assert_eq!(result.trend().inflow, Trend::Falling);
        assert_eq!(result.trend().outflow, Trend::Rising);
        assert_eq!(result.trend().balance, Trend::Falling);
    }

    #[test]
    fn classify_trend_respects_threshold() {
        let values = [dec!(100), dec!(104)];

        assert_eq!(classify_trend(&values, DEFAULT_TREND_THRESHOLD), Trend::Flat);
        assert_eq!(classify_trend(&values, dec!(0.01)), Trend::Rising);
    }

    #[test]
    fn classify_trend_skips_middle_value_of_odd_sequence() {
        let values = [dec!(10), dec!(1000), dec!(10)];

        assert_eq!(classify_trend(&values, DEFAULT_TREND_THRESHOLD), Trend::Flat);
    }

    #[test]
    fn classify_trend_from_zero_baseline_uses_sign() {
        assert_eq!(
            classify_trend(&[dec!(0), dec!(5)], DEFAULT_TREND_THRESHOLD),
            Trend::Rising
        );
        assert_eq!(
            classify_trend(&[dec!(0), dec!(-5)], DEFAULT_TREND_THRESHOLD),
            Trend::Falling
        );
    }

    #[test]
    fn classify_trend_of_negative_balances_uses_magnitude() {
        // A deficit shrinking from -100 to -50 is an improvement.
        assert_eq!(
            classify_trend(&[dec!(-100), dec!(-50)], DEFAULT_TREND_THRESHOLD),
            Trend::Rising
        );
    }

    #[test]
    fn default_result_has_no_buckets() {
        let result = AggregationResult::default();

        assert!(result.buckets().is_empty());
        assert_eq!(result.averages().inflow, Decimal::ZERO);
    }
}
