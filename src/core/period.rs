use crate::core::calendar::{self, localize, WALL_CLOCK_FORMAT};
use crate::core::factory::{Bound, PeriodFactory};
use crate::core::sequence::DateSequence;
use crate::domain::model::{DiffBreakdown, Locale, Unit};
use crate::utils::error::{PeriodError, Result};
use crate::utils::format::interval_to_string;
use crate::utils::validation::validate_timezone;
use chrono::{DateTime, Timelike};
use chrono_tz::Tz;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

/// A bounded time interval.
///
/// `start <= end` is checked when the period is built. The limit and timezone
/// operations mutate the bounds in place and do not check it again, so a
/// period narrowed past itself stays inverted until the caller fixes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Period {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
    timezone_label: String,
    locale: Locale,
}

impl Period {
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Result<Self> {
        if start > end {
            return Err(PeriodError::start_date_cannot_be_after_end_date(&start, &end));
        }

        tracing::debug!("Created period {} -> {}", start, end);
        Ok(Self {
            start,
            end,
            timezone_label: "UTC".to_string(),
            locale: Locale::default(),
        })
    }

    /// Period between two bounds, each a timestamp or a parseable string.
    pub fn create(start: impl Into<Bound>, end: impl Into<Bound>) -> Result<Self> {
        PeriodFactory::system().create(start, end)
    }

    /// Period from `start` until now.
    pub fn since(start: impl Into<Bound>) -> Result<Self> {
        PeriodFactory::system().since(start)
    }

    pub fn minutes(back: i64) -> Result<Self> {
        PeriodFactory::system().minutes(back, 0)
    }

    pub fn hours(back: i64) -> Result<Self> {
        PeriodFactory::system().hours(back, 0)
    }

    pub fn days(back: i64) -> Result<Self> {
        PeriodFactory::system().days(back, 0)
    }

    pub fn weeks(back: i64) -> Result<Self> {
        PeriodFactory::system().weeks(back, 0)
    }

    pub fn months(back: i64) -> Result<Self> {
        PeriodFactory::system().months(back, 0)
    }

    pub fn years(back: i64) -> Result<Self> {
        PeriodFactory::system().years(back, 0)
    }

    pub fn start(&self) -> DateTime<Tz> {
        self.start
    }

    pub fn end(&self) -> DateTime<Tz> {
        self.end
    }

    pub fn timezone_label(&self) -> &str {
        &self.timezone_label
    }

    pub fn set_timezone_label(&mut self, label: impl Into<String>) {
        self.timezone_label = label.into();
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    pub fn to_array(&self) -> [DateTime<Tz>; 2] {
        [self.start, self.end]
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// Moves `start` forward to `limit`; an earlier limit is ignored.
    pub fn limit_start(&mut self, limit: DateTime<Tz>) {
        if limit > self.start {
            tracing::debug!("Limiting start {} -> {}", self.start, limit);
            self.start = limit;
            self.warn_if_inverted();
        }
    }

    /// Moves `end` back to `limit`; a later limit is ignored.
    pub fn limit_end(&mut self, limit: DateTime<Tz>) {
        if limit < self.end {
            tracing::debug!("Limiting end {} -> {}", self.end, limit);
            self.end = limit;
            self.warn_if_inverted();
        }
    }

    fn warn_if_inverted(&self) {
        if self.is_inverted() {
            tracing::warn!("⚠️ Period is now inverted: {} > {}", self.start, self.end);
        }
    }

    /// Reads the wall clock of both bounds as `input` local time and shows it in `output`.
    ///
    /// "These times were entered in `input`, show them in `output`." Sub-second
    /// precision is dropped.
    pub fn to_timezone_from(&mut self, output: Tz, input: Tz) -> Result<()> {
        let start = reinterpret(&self.start, &input, &output)?;
        let end = reinterpret(&self.end, &input, &output)?;
        tracing::debug!(
            "Converted period from {} to {}: {} -> {}",
            input.name(),
            output.name(),
            start,
            end
        );
        self.start = start;
        self.end = end;
        Ok(())
    }

    /// [`to_timezone_from`](Self::to_timezone_from) with UTC input.
    pub fn to_timezone(&mut self, output: Tz) -> Result<()> {
        self.to_timezone_from(output, Tz::UTC)
    }

    /// [`to_timezone_from`](Self::to_timezone_from) with UTC output.
    pub fn convert_to_timezone(&mut self, input: Tz) -> Result<()> {
        self.to_timezone_from(Tz::UTC, input)
    }

    pub fn convert_to_timezone_into(&mut self, input: Tz, output: Tz) -> Result<()> {
        self.to_timezone_from(output, input)
    }

    /// Same as [`to_timezone_from`](Self::to_timezone_from) with IANA zone names.
    pub fn to_timezone_by_name(&mut self, output: &str, input: &str) -> Result<()> {
        let output = validate_timezone("output", output)?;
        let input = validate_timezone("input", input)?;
        self.to_timezone_from(output, input)
    }

    /// Absolute difference between the bounds in whole `unit`s.
    pub fn diff(&self, unit: Unit) -> i64 {
        calendar::diff_in(&self.start, &self.end, unit)
    }

    pub fn diff_named(&self, unit: &str) -> Result<i64> {
        Ok(self.diff(unit.parse()?))
    }

    pub fn diff_breakdown(&self) -> DiffBreakdown {
        calendar::breakdown(&self.start, &self.end)
    }

    pub fn diff_to_string(&self) -> String {
        self.diff_to_string_in(self.locale)
    }

    pub fn diff_to_string_in(&self, locale: Locale) -> String {
        interval_to_string(&self.diff_breakdown(), locale)
    }

    /// Instants every `interval` `unit`s from `start`, excluding `end`.
    pub fn date_sequence(&self, interval: i64, unit: Unit) -> Result<DateSequence> {
        DateSequence::new(self.start, self.end, interval, unit)
    }

    pub fn date_sequence_named(&self, interval: i64, unit: &str) -> Result<DateSequence> {
        self.date_sequence(interval, unit.parse()?)
    }

    /// Splits the period into roughly `steps` instants one rounded-up
    /// `total_seconds / steps` apart. The count is exact only when the
    /// division is.
    pub fn date_sequence_by_steps(&self, steps: i64) -> Result<DateSequence> {
        DateSequence::with_steps(self.start, self.end, steps)
    }
}

fn reinterpret(instant: &DateTime<Tz>, input: &Tz, output: &Tz) -> Result<DateTime<Tz>> {
    let wall_clock = instant.naive_local();
    let wall_clock = wall_clock.with_nanosecond(0).unwrap_or(wall_clock);
    let local = localize(input, wall_clock).ok_or_else(|| PeriodError::InvalidDate {
        input: wall_clock.format(WALL_CLOCK_FORMAT).to_string(),
        reason: format!("no such local time in {}", input.name()),
    })?;
    Ok(local.with_timezone(output))
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "From: {}, To: {}",
            self.start.format(WALL_CLOCK_FORMAT),
            self.end.format(WALL_CLOCK_FORMAT)
        )
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Period", 3)?;
        state.serialize_field("start", &self.start.to_rfc3339())?;
        state.serialize_field("end", &self.end.to_rfc3339())?;
        state.serialize_field("timezone", &self.timezone_label)?;
        state.end()
    }
}
