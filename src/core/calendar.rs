//! Calendar arithmetic shared by the period operations.
//!
//! Fixed-length units (seconds, minutes, hours) move along the time line.
//! Days, weeks, months and years move the wall clock of the instant's own
//! zone and are localized again afterwards, so `+1 day` across a DST change
//! keeps the same local hour. Month and year steps clamp to the last day of
//! the target month (Jan 31 + 1 month = Feb 28/29).

use crate::domain::model::{DiffBreakdown, Unit};
use chrono::offset::LocalResult;
use chrono::{DateTime, Datelike, FixedOffset, Months, NaiveDateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

pub const WALL_CLOCK_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Reads a wall clock time in `tz`. Ambiguous times take the earlier
/// instant; times inside a DST gap are pushed forward past the gap.
pub fn localize(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => {
            let shifted = naive.checked_add_signed(TimeDelta::hours(1))?;
            tz.from_local_datetime(&shifted).earliest()
        }
    }
}

/// Named zone for a whole-hour UTC offset. `Etc/GMT` names carry the
/// inverted sign (`-03:00` is `Etc/GMT+3`).
pub fn zone_for_offset(offset: &FixedOffset) -> Option<Tz> {
    let seconds = offset.local_minus_utc();
    if seconds % 3_600 != 0 {
        return None;
    }
    match seconds / 3_600 {
        0 => Some(Tz::UTC),
        hours => format!("Etc/GMT{:+}", -hours).parse().ok(),
    }
}

/// Moves an offset-bearing instant into a named zone with the same wall
/// clock. Offsets without a named zone (`+05:30`) are converted into `fallback`.
pub fn keep_offset(instant: DateTime<FixedOffset>, fallback: &Tz) -> DateTime<Tz> {
    match zone_for_offset(instant.offset()) {
        Some(zone) => instant.with_timezone(&zone),
        None => {
            tracing::debug!(
                "No named zone for offset {}, reading {} in {}",
                instant.offset(),
                instant,
                fallback.name()
            );
            instant.with_timezone(fallback)
        }
    }
}

/// Rounds to the nearest whole second, half up.
pub fn round_to_second(instant: DateTime<Utc>) -> DateTime<Utc> {
    let nanos = instant.timestamp_subsec_nanos();
    let truncated = instant - TimeDelta::nanoseconds(i64::from(nanos));
    if nanos >= 500_000_000 {
        truncated + TimeDelta::seconds(1)
    } else {
        truncated
    }
}

/// Moves `instant` by `amount` units. `None` when the result leaves chrono's range.
pub fn shift(instant: &DateTime<Tz>, unit: Unit, amount: i64) -> Option<DateTime<Tz>> {
    match unit {
        Unit::Seconds | Unit::Minutes | Unit::Hours => {
            let factor = unit.fixed_seconds()?;
            let delta = TimeDelta::try_seconds(amount.checked_mul(factor)?)?;
            instant.checked_add_signed(delta)
        }
        Unit::Days | Unit::Weeks => {
            let days = if unit == Unit::Weeks {
                amount.checked_mul(7)?
            } else {
                amount
            };
            let naive = instant
                .naive_local()
                .checked_add_signed(TimeDelta::try_days(days)?)?;
            localize(&instant.timezone(), naive)
        }
        Unit::Months | Unit::Years => {
            let months = if unit == Unit::Years {
                amount.checked_mul(12)?
            } else {
                amount
            };
            let naive = add_months(instant.naive_local(), months)?;
            localize(&instant.timezone(), naive)
        }
    }
}

fn add_months(naive: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        naive.checked_add_months(magnitude)
    } else {
        naive.checked_sub_months(magnitude)
    }
}

/// Wall clock pair of `start`/`end` in `start`'s zone, earliest first.
fn ordered_wall_clocks(start: &DateTime<Tz>, end: &DateTime<Tz>) -> (NaiveDateTime, NaiveDateTime) {
    let a = start.naive_local();
    let b = end.with_timezone(&start.timezone()).naive_local();
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Cascading years/months/days/hours/minutes/seconds between two instants.
///
/// Whole months are counted first (the largest `n` with `a + n months <= b`),
/// the remainder is split into days and clock units. The result is the
/// absolute gap, whichever bound comes first.
pub fn breakdown(start: &DateTime<Tz>, end: &DateTime<Tz>) -> DiffBreakdown {
    let (a, b) = ordered_wall_clocks(start, end);

    let mut months =
        i64::from(b.year() - a.year()) * 12 + i64::from(b.month()) - i64::from(a.month());
    let mut anchor = add_months(a, months).unwrap_or(a);
    while anchor > b && months > 0 {
        months -= 1;
        anchor = add_months(a, months).unwrap_or(a);
    }

    let rest = b - anchor;
    DiffBreakdown {
        years: months / 12,
        months: months % 12,
        days: rest.num_days(),
        hours: rest.num_hours() % 24,
        minutes: rest.num_minutes() % 60,
        seconds: rest.num_seconds() % 60,
    }
}

/// Absolute difference in whole `unit`s.
pub fn diff_in(start: &DateTime<Tz>, end: &DateTime<Tz>, unit: Unit) -> i64 {
    match unit {
        Unit::Seconds | Unit::Minutes | Unit::Hours => {
            let seconds = end.signed_duration_since(start).num_seconds().abs();
            unit.fixed_seconds().map_or(0, |factor| seconds / factor)
        }
        Unit::Days | Unit::Weeks => {
            let (a, b) = ordered_wall_clocks(start, end);
            let days = (b - a).num_days();
            if unit == Unit::Weeks {
                days / 7
            } else {
                days
            }
        }
        Unit::Months => breakdown(start, end).total_months(),
        Unit::Years => breakdown(start, end).years,
    }
}
