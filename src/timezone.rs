//! Resolves instants to local calendar dates.

use std::fmt;

use time::{Date, Duration, OffsetDateTime, UtcOffset};
use time_tz::{Offset, OffsetResult, PrimitiveDateTimeExt, TimeZone, Tz};

use crate::Error;

/// The timezone whose midnight separates one day bucket from the next.
#[derive(Clone, Copy)]
pub enum LocalTimezone {
    /// A constant offset from UTC.
    Fixed(UtcOffset),
    /// A canonical timezone, e.g. "Pacific/Auckland", with daylight saving rules.
    Named(&'static Tz),
}

impl LocalTimezone {
    /// Looks up a canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezone] if the name is not a known canonical timezone.
    pub fn from_name(canonical_timezone: &str) -> Result<Self, Error> {
        time_tz::timezones::get_by_name(canonical_timezone)
            .map(Self::Named)
            .ok_or_else(|| Error::InvalidTimezone(canonical_timezone.to_owned()))
    }

    /// The offset from UTC in effect at `instant`.
    pub fn offset_at(&self, instant: OffsetDateTime) -> UtcOffset {
        match self {
            Self::Fixed(offset) => *offset,
            Self::Named(tz) => tz.get_offset_utc(&instant).to_utc(),
        }
    }

    /// The local calendar date of `instant`.
    ///
    /// Returns `None` if the local date cannot be represented.
    pub fn local_date(&self, instant: OffsetDateTime) -> Option<Date> {
        instant
            .checked_to_offset(self.offset_at(instant))
            .map(|local| local.date())
    }

    /// The first instant of `date` in this timezone, normally local midnight.
    ///
    /// When a daylight saving change repeats midnight, the day starts at the
    /// first of the two. When it skips midnight, the day starts at the moment
    /// the clocks jump forward.
    pub fn midnight(&self, date: Date) -> OffsetDateTime {
        let midnight = date.midnight();

        match self {
            Self::Fixed(offset) => midnight.assume_offset(*offset),
            Self::Named(tz) => match midnight.assume_timezone(*tz) {
                OffsetResult::Some(start) => start,
                OffsetResult::Ambiguous(first, second) => first.min(second),
                OffsetResult::None => {
                    // Midnight at the offset in effect the day before is the jump itself.
                    let day_before = midnight
                        .assume_utc()
                        .checked_sub(Duration::days(1))
                        .unwrap_or(OffsetDateTime::UNIX_EPOCH);

                    midnight.assume_offset(self.offset_at(day_before))
                }
            },
        }
    }
}

impl Default for LocalTimezone {
    fn default() -> Self {
        Self::Fixed(UtcOffset::UTC)
    }
}

impl fmt::Debug for LocalTimezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(offset) => f.debug_tuple("Fixed").field(offset).finish(),
            Self::Named(tz) => f.debug_tuple("Named").field(&tz.name()).finish(),
        }
    }
}

impl PartialEq for LocalTimezone {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Fixed(left), Self::Fixed(right)) => left == right,
            (Self::Named(left), Self::Named(right)) => left.name() == right.name(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime, offset};

    use crate::Error;

    use super::LocalTimezone;

    #[test]
    fn from_name_rejects_unknown_timezone() {
        let result = LocalTimezone::from_name("Middle/Earth");

        assert_eq!(result, Err(Error::InvalidTimezone("Middle/Earth".to_owned())));
    }

    #[test]
    fn fixed_offset_moves_late_utc_instants_to_next_day() {
        let timezone = LocalTimezone::Fixed(offset!(+12));

        let local = timezone.local_date(datetime!(2025-03-10 13:00 UTC));

        assert_eq!(local, Some(date!(2025 - 03 - 11)));
    }

    #[test]
    fn named_timezone_follows_daylight_saving() {
        let timezone = LocalTimezone::from_name("Pacific/Auckland").unwrap();

        // NZDT (+13) in January, NZST (+12) in July.
        assert_eq!(
            timezone.local_date(datetime!(2025-01-10 11:30 UTC)),
            Some(date!(2025 - 01 - 11))
        );
        assert_eq!(
            timezone.local_date(datetime!(2025-07-10 11:30 UTC)),
            Some(date!(2025 - 07 - 10))
        );
    }

    #[test]
    fn midnight_on_daylight_saving_start_stays_on_the_same_day() {
        // NZDT starts at 02:00 on 2025-09-28, so midnight is still NZST (+12).
        let timezone = LocalTimezone::from_name("Pacific/Auckland").unwrap();

        let midnight = timezone.midnight(date!(2025 - 09 - 28));

        assert_eq!(midnight, datetime!(2025-09-28 0:00 +12));
        assert_eq!(timezone.local_date(midnight), Some(date!(2025 - 09 - 28)));
    }

    #[test]
    fn midnight_on_daylight_saving_end_uses_local_offset() {
        // NZDT ends at 03:00 on 2025-04-06, so midnight is still NZDT (+13).
        let timezone = LocalTimezone::from_name("Pacific/Auckland").unwrap();

        let midnight = timezone.midnight(date!(2025 - 04 - 06));

        assert_eq!(midnight, datetime!(2025-04-06 0:00 +13));
        assert_eq!(timezone.local_date(midnight), Some(date!(2025 - 04 - 06)));
    }

    #[test]
    fn skipped_midnight_starts_the_day_when_clocks_jump() {
        // Chilean clocks jump from 00:00 to 01:00 on 2024-09-08.
        let timezone = LocalTimezone::from_name("America/Santiago").unwrap();

        let midnight = timezone.midnight(date!(2024 - 09 - 08));

        assert_eq!(timezone.local_date(midnight), Some(date!(2024 - 09 - 08)));
        assert_eq!(
            timezone.local_date(midnight - time::Duration::seconds(1)),
            Some(date!(2024 - 09 - 07))
        );
    }

    #[test]
    fn midnight_uses_local_offset() {
        let timezone = LocalTimezone::Fixed(offset!(-5));

        assert_eq!(
            timezone.midnight(date!(2025 - 03 - 10)),
            datetime!(2025-03-10 0:00 -5)
        );
    }
}
