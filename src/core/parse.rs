//! Flexible string-to-instant parsing used by `Period::create`.
//!
//! Accepted inputs, read in the target zone unless they carry an offset
//! (offset-bearing strings keep their own wall clock):
//! - `now`, `today`, `midnight`, `yesterday`, `tomorrow`
//! - relative phrases: `+3 days`, `-2 weeks`, `3 hours ago`, `in 5 minutes`
//! - `2022-05-10 19:50[:00[.123]]`, `2022-05-10T19:50`, `2022-05-10`,
//!   `2022/05/10[ 19:50[:00]]`
//! - RFC 3339 and RFC 2822

use crate::core::calendar::{keep_offset, localize, shift};
use crate::domain::model::Unit;
use crate::utils::error::{PeriodError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use chrono_tz::Tz;
use regex::Regex;
use std::sync::LazyLock;

static RELATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:in\s+)?([+-]?\d+)\s*([a-z]+)(\s+ago)?$").unwrap()
});

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

fn invalid(input: &str, reason: impl Into<String>) -> PeriodError {
    PeriodError::InvalidDate {
        input: input.to_string(),
        reason: reason.into(),
    }
}

fn local_midnight(tz: &Tz, now: &DateTime<Tz>, days: i64, input: &str) -> Result<DateTime<Tz>> {
    let date = now
        .date_naive()
        .checked_add_signed(TimeDelta::days(days))
        .ok_or_else(|| invalid(input, "date out of range"))?;
    localize(tz, date.and_time(NaiveTime::MIN)).ok_or_else(|| invalid(input, "no such local time"))
}

fn parse_keyword(lowered: &str, tz: &Tz, now: &DateTime<Tz>, input: &str) -> Option<Result<DateTime<Tz>>> {
    let days = match lowered {
        "now" => return Some(Ok(*now)),
        "today" | "midnight" => 0,
        "yesterday" => -1,
        "tomorrow" => 1,
        _ => return None,
    };
    Some(local_midnight(tz, now, days, input))
}

fn parse_relative(lowered: &str, now: &DateTime<Tz>, input: &str) -> Option<Result<DateTime<Tz>>> {
    let caps = RELATIVE.captures(lowered)?;
    let result = (|| -> Result<DateTime<Tz>> {
        let mut amount: i64 = caps[1]
            .parse()
            .map_err(|_| invalid(input, "relative amount out of range"))?;
        let unit: Unit = caps[2].parse()?;
        if caps.get(3).is_some() {
            amount = amount
                .checked_neg()
                .ok_or_else(|| invalid(input, "relative amount out of range"))?;
        }
        shift(now, unit, amount).ok_or_else(|| invalid(input, "result out of range"))
    })();
    Some(result)
}

fn parse_naive(trimmed: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            DATE_FORMATS.iter().find_map(|format| {
                NaiveDate::parse_from_str(trimmed, format)
                    .ok()
                    .map(|date| date.and_time(NaiveTime::MIN))
            })
        })
}

/// Parses `input` into an instant in `tz`, using `now` for keywords and relative phrases.
pub fn parse_datetime(input: &str, tz: &Tz, now: DateTime<Utc>) -> Result<DateTime<Tz>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid(input, "empty input"));
    }

    let now = now.with_timezone(tz);
    let lowered = trimmed.to_ascii_lowercase();

    if let Some(result) = parse_keyword(&lowered, tz, &now, input) {
        return result;
    }
    if let Some(result) = parse_relative(&lowered, &now, input) {
        return result;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(keep_offset(dt, tz));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Ok(keep_offset(dt, tz));
    }

    let naive = parse_naive(trimmed).ok_or_else(|| invalid(input, "unrecognized date format"))?;
    localize(tz, naive).ok_or_else(|| invalid(input, "no such local time"))
}
