use chrono::{DateTime, TimeZone};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PeriodError {
    #[error("Start date `{start}` cannot be after end date `{end}`.")]
    InvalidPeriod { start: String, end: String },

    #[error("Unsupported unit: {unit}")]
    UnsupportedUnit { unit: String },

    #[error("Unknown timezone: {name}")]
    InvalidTimezone { name: String },

    #[error("Unable to parse date `{input}`: {reason}")]
    InvalidDate { input: String, reason: String },

    #[error("Invalid interval: {message}")]
    InvalidInterval { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PeriodError {
    /// 起始日期晚於結束日期
    pub fn start_date_cannot_be_after_end_date<A: TimeZone, B: TimeZone>(
        start: &DateTime<A>,
        end: &DateTime<B>,
    ) -> Self
    where
        A::Offset: std::fmt::Display,
        B::Offset: std::fmt::Display,
    {
        PeriodError::InvalidPeriod {
            start: start.format("%Y-%m-%d").to_string(),
            end: end.format("%Y-%m-%d").to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PeriodError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_invalid_period_message_contains_both_dates() {
        let start = Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();

        let err = PeriodError::start_date_cannot_be_after_end_date(&start, &end);
        assert_eq!(
            err.to_string(),
            "Start date `2024-03-02` cannot be after end date `2024-03-01`."
        );
    }
}
