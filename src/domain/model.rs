use crate::utils::error::PeriodError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar granularity used by factories, differences and sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl Unit {
    pub const ALL: [Unit; 7] = [
        Unit::Seconds,
        Unit::Minutes,
        Unit::Hours,
        Unit::Days,
        Unit::Weeks,
        Unit::Months,
        Unit::Years,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Seconds => "seconds",
            Unit::Minutes => "minutes",
            Unit::Hours => "hours",
            Unit::Days => "days",
            Unit::Weeks => "weeks",
            Unit::Months => "months",
            Unit::Years => "years",
        }
    }

    /// Fixed length in seconds, `None` for months and years.
    pub fn fixed_seconds(&self) -> Option<i64> {
        match self {
            Unit::Seconds => Some(1),
            Unit::Minutes => Some(60),
            Unit::Hours => Some(3_600),
            Unit::Days => Some(86_400),
            Unit::Weeks => Some(604_800),
            Unit::Months | Unit::Years => None,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "second" | "seconds" | "sec" | "secs" => Ok(Unit::Seconds),
            "minute" | "minutes" | "min" | "mins" => Ok(Unit::Minutes),
            "hour" | "hours" => Ok(Unit::Hours),
            "day" | "days" => Ok(Unit::Days),
            "week" | "weeks" => Ok(Unit::Weeks),
            "month" | "months" => Ok(Unit::Months),
            "year" | "years" => Ok(Unit::Years),
            _ => Err(PeriodError::UnsupportedUnit {
                unit: s.to_string(),
            }),
        }
    }
}

/// Cascading calendar decomposition of the gap between two instants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffBreakdown {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl DiffBreakdown {
    pub fn total_months(&self) -> i64 {
        self.years * 12 + self.months
    }
}

/// Phrase set for the duration formatter.
/// Deserializes through [`FromStr`], so config files accept `en`/`es` too.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Locale {
    #[default]
    English,
    Spanish,
}

impl FromStr for Locale {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Locale::English),
            "spanish" | "es" => Ok(Locale::Spanish),
            other => Err(PeriodError::ConfigError {
                message: format!("Unsupported locale: {}", other),
            }),
        }
    }
}

impl TryFrom<String> for Locale {
    type Error = PeriodError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
