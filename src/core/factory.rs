use crate::config::PeriodConfig;
use crate::core::calendar::{keep_offset, localize, round_to_second, shift};
use crate::core::parse::parse_datetime;
use crate::core::period::Period;
use crate::domain::model::{Locale, Unit};
use crate::domain::ports::{Clock, SystemClock};
use crate::utils::error::{PeriodError, Result};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// One end of a period as handed to [`PeriodFactory::create`].
#[derive(Debug, Clone, PartialEq)]
pub enum Bound {
    Instant(DateTime<Tz>),
    /// Instant with its own UTC offset; the wall clock is kept when the
    /// offset is a whole number of hours.
    Offset(DateTime<FixedOffset>),
    /// Wall clock time in the factory's zone.
    Local(NaiveDateTime),
    /// Anything [`parse_datetime`] understands.
    Text(String),
}

impl Bound {
    fn resolve(self, tz: &Tz, now: DateTime<Utc>) -> Result<DateTime<Tz>> {
        match self {
            Bound::Instant(instant) => Ok(instant),
            Bound::Offset(instant) => Ok(keep_offset(instant, tz)),
            Bound::Local(naive) => localize(tz, naive).ok_or_else(|| PeriodError::InvalidDate {
                input: naive.to_string(),
                reason: format!("no such local time in {}", tz.name()),
            }),
            Bound::Text(text) => parse_datetime(&text, tz, now),
        }
    }
}

impl From<DateTime<Tz>> for Bound {
    fn from(value: DateTime<Tz>) -> Self {
        Bound::Instant(value)
    }
}

impl From<DateTime<Utc>> for Bound {
    fn from(value: DateTime<Utc>) -> Self {
        Bound::Instant(value.with_timezone(&Tz::UTC))
    }
}

impl From<DateTime<FixedOffset>> for Bound {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Bound::Offset(value)
    }
}

impl From<NaiveDateTime> for Bound {
    fn from(value: NaiveDateTime) -> Self {
        Bound::Local(value)
    }
}

impl From<&str> for Bound {
    fn from(value: &str) -> Self {
        Bound::Text(value.to_string())
    }
}

impl From<String> for Bound {
    fn from(value: String) -> Self {
        Bound::Text(value)
    }
}

/// Builds periods relative to an injected [`Clock`].
///
/// Every constructor reads the clock once, so both bounds of a relative
/// period are anchored on the same instant.
#[derive(Debug, Clone)]
pub struct PeriodFactory<C: Clock = SystemClock> {
    clock: C,
    timezone: Tz,
    locale: Locale,
}

impl PeriodFactory<SystemClock> {
    pub fn system() -> Self {
        Self::new(SystemClock)
    }
}

impl Default for PeriodFactory<SystemClock> {
    fn default() -> Self {
        Self::system()
    }
}

impl<C: Clock> PeriodFactory<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            timezone: Tz::UTC,
            locale: Locale::default(),
        }
    }

    pub fn with_config(clock: C, config: &PeriodConfig) -> Result<Self> {
        let timezone = config.display_timezone()?;
        tracing::debug!(
            "Period factory using timezone {} and locale {:?}",
            timezone.name(),
            config.locale()
        );
        Ok(Self {
            clock,
            timezone,
            locale: config.locale(),
        })
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Current instant in the factory's zone, rounded to the nearest second.
    pub fn now(&self) -> DateTime<Tz> {
        round_to_second(self.clock.now()).with_timezone(&self.timezone)
    }

    pub fn create(&self, start: impl Into<Bound>, end: impl Into<Bound>) -> Result<Period> {
        let now = self.clock.now();
        let start = start.into().resolve(&self.timezone, now)?;
        let end = end.into().resolve(&self.timezone, now)?;
        self.finish(start, end)
    }

    /// Period from `start` until now.
    pub fn since(&self, start: impl Into<Bound>) -> Result<Period> {
        let now = self.clock.now();
        let start = start.into().resolve(&self.timezone, now)?;
        self.finish(start, now.with_timezone(&self.timezone))
    }

    /// `now - back` to `now + ahead`, both counted in `unit`s.
    /// An `ahead` of zero ends the period exactly at now.
    pub fn around(&self, back: i64, ahead: i64, unit: Unit) -> Result<Period> {
        let now = self.now();
        let out_of_range = |amount: i64, side: &str| PeriodError::InvalidInterval {
            message: format!("{} {} {} from {} is out of range", amount, unit, side, now),
        };

        let end = if ahead != 0 {
            shift(&now, unit, ahead).ok_or_else(|| out_of_range(ahead, "ahead"))?
        } else {
            now
        };
        let start = back
            .checked_neg()
            .and_then(|amount| shift(&now, unit, amount))
            .ok_or_else(|| out_of_range(back, "back"))?;

        self.finish(start, end)
    }

    pub fn last(&self, back: i64, unit: Unit) -> Result<Period> {
        self.around(back, 0, unit)
    }

    pub fn minutes(&self, back: i64, ahead: i64) -> Result<Period> {
        self.around(back, ahead, Unit::Minutes)
    }

    pub fn hours(&self, back: i64, ahead: i64) -> Result<Period> {
        self.around(back, ahead, Unit::Hours)
    }

    pub fn days(&self, back: i64, ahead: i64) -> Result<Period> {
        self.around(back, ahead, Unit::Days)
    }

    pub fn weeks(&self, back: i64, ahead: i64) -> Result<Period> {
        self.around(back, ahead, Unit::Weeks)
    }

    pub fn months(&self, back: i64, ahead: i64) -> Result<Period> {
        self.around(back, ahead, Unit::Months)
    }

    pub fn years(&self, back: i64, ahead: i64) -> Result<Period> {
        self.around(back, ahead, Unit::Years)
    }

    fn finish(&self, start: DateTime<Tz>, end: DateTime<Tz>) -> Result<Period> {
        let mut period = Period::new(start, end)?;
        period.set_timezone_label(self.timezone.name());
        period.set_locale(self.locale);
        Ok(period)
    }
}
