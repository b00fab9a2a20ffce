use chrono::{DateTime, TimeZone, Timelike, Utc};
use chrono_tz::America::Montevideo;
use chrono_tz::{Tz, UTC};
use period::{FixedClock, Locale, Period, PeriodConfig, PeriodError, PeriodFactory, Unit};

fn factory() -> PeriodFactory<FixedClock> {
    PeriodFactory::new(FixedClock::new(
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 30, 0).unwrap(),
    ))
}

fn ceil_div(value: i64, divisor: i64) -> i64 {
    (value + divisor - 1) / divisor
}

#[test]
fn test_create_by_unit() {
    let f = factory();

    assert_eq!(f.minutes(2, 0).unwrap().diff_breakdown().minutes, 2);
    assert_eq!(f.hours(2, 0).unwrap().diff_breakdown().hours, 2);
    assert_eq!(f.days(2, 0).unwrap().diff_breakdown().days, 2);
    assert_eq!(f.weeks(2, 0).unwrap().diff(Unit::Days), 14);
    assert_eq!(f.months(2, 0).unwrap().diff_breakdown().months, 2);
    assert_eq!(f.years(2, 0).unwrap().diff_breakdown().years, 2);
}

#[test]
fn test_system_clock_factories() {
    assert_eq!(Period::minutes(2).unwrap().diff(Unit::Minutes), 2);
    assert_eq!(Period::hours(5).unwrap().diff(Unit::Hours), 5);
    assert_eq!(Period::days(2).unwrap().diff(Unit::Days), 2);
    assert_eq!(Period::weeks(2).unwrap().diff(Unit::Days), 14);
    assert_eq!(Period::years(2).unwrap().diff(Unit::Years), 2);
    assert!(Period::months(1).unwrap().diff(Unit::Days) >= 28);
}

#[test]
fn test_convert_to_timezone() {
    let mut period = Period::create("2021-11-05 18:56", "2021-11-09 13:56:39").unwrap();
    let start_hour = period.start().hour() as i64;

    period.convert_to_timezone(Montevideo).unwrap();

    assert_eq!(period.start().hour() as i64 - start_hour, 3);
}

#[test]
fn test_to_timezone() {
    let mut period = Period::create("2022-05-16 17:27", "2022-05-16 17:50").unwrap();
    let hour_utc = period.start().hour() as i64;

    period.to_timezone_from(Montevideo, UTC).unwrap();

    assert_eq!(hour_utc - period.start().hour() as i64, 3);
    assert_eq!(period.timezone_label(), "UTC");
}

#[test]
fn test_offset_strings_then_to_timezone() {
    let mut period = Period::create("2022-05-16T17:27:00-03:00", "2022-05-16T18:00:00-03:00").unwrap();
    assert_eq!(
        period.to_string(),
        "From: 2022-05-16 17:27:00, To: 2022-05-16 18:00:00"
    );
    assert_eq!(period.diff(Unit::Minutes), 33);

    period.to_timezone(Montevideo).unwrap();
    assert_eq!(
        period.to_string(),
        "From: 2022-05-16 14:27:00, To: 2022-05-16 15:00:00"
    );
}

#[test]
fn test_timezone_hour_shift_for_every_hour() {
    for hour in 0..24 {
        let start = UTC.with_ymd_and_hms(2023, 3, 1, hour, 0, 0).unwrap();
        let mut period = Period::new(start, start).unwrap();

        period.to_timezone(Montevideo).unwrap();
        assert_eq!(period.start().hour(), (hour + 24 - 3) % 24);

        period.convert_to_timezone_into(Montevideo, UTC).unwrap();
        assert_eq!(period.start().hour(), hour);
    }
}

#[test]
fn test_date_sequence_counts() {
    let f = factory();
    for days in 5..=20 {
        for steps in 1..=days {
            let expected = ceil_div(days, steps);
            for unit in [Unit::Days, Unit::Months, Unit::Years] {
                let period = f.last(days, unit).unwrap();
                let sequence = period.date_sequence(steps, unit).unwrap();
                assert_eq!(
                    sequence.iter().count() as i64,
                    expected,
                    "{} {} by {}",
                    days,
                    unit,
                    steps
                );
            }
        }
    }
}

#[test]
fn test_date_sequence_by_steps() {
    let period = factory().months(1, 0).unwrap();
    let total = period.diff(Unit::Seconds);
    assert_eq!(total, 31 * 86_400);

    for steps in 1..=20 {
        let sequence = period.date_sequence_by_steps(steps).unwrap();
        let step = ceil_div(total, steps);

        assert_eq!(sequence.interval(), step);
        assert_eq!(sequence.unit(), Unit::Seconds);
        assert_eq!(sequence.iter().count() as i64, ceil_div(total, step));
        assert!(sequence.iter().count() as i64 <= steps);
    }

    // 2_678_400 divides evenly by 10, so the count is exact.
    assert_eq!(period.date_sequence_by_steps(10).unwrap().iter().count(), 10);
}

#[test]
fn test_date_sequence_is_half_open() {
    let period = Period::create("2024-01-01 00:00", "2024-01-01 03:00").unwrap();
    let items: Vec<DateTime<Tz>> = period.date_sequence(1, Unit::Hours).unwrap().into_iter().collect();

    assert_eq!(items.len(), 3);
    assert_eq!(items[0], period.start());
    assert!(items.iter().all(|instant| *instant < period.end()));
}

#[test]
fn test_get_diff_to_string() {
    let period = factory().months(2, 0).unwrap();
    assert_eq!(period.diff_to_string(), "2 months, 0 hours, 0 minutes");
    assert_eq!(
        period.diff_to_string_in(Locale::Spanish),
        "2 meses, 0 horas, 0 minutos"
    );

    let period = Period::create("2020-04-16 17:27", "2022-05-10 19:50").unwrap();
    let parts = period.diff_breakdown();
    assert_eq!((parts.years, parts.months, parts.days), (2, 0, 24));
    assert_eq!((parts.hours, parts.minutes), (2, 23));
    assert_eq!(
        period.diff_to_string_in(Locale::Spanish),
        "2 años, 24 días, 2 horas, 23 minutos"
    );
}

#[test]
fn test_limit_start_date() {
    let f = factory();
    let yesterday = f.create("yesterday", "now").unwrap().start();
    let mut period = f.days(5, 0).unwrap();

    period.limit_start(yesterday);
    assert_eq!(period.start(), yesterday);

    let original_start = period.start();
    period.limit_start(UTC.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap());
    assert_eq!(period.start(), original_start);
}

#[test]
fn test_limit_end_date() {
    let f = factory();
    let yesterday = f.create("yesterday", "now").unwrap().start();
    let mut period = f.days(5, 0).unwrap();

    period.limit_end(yesterday);
    assert_eq!(period.end(), yesterday);

    period.limit_end(UTC.with_ymd_and_hms(2100, 1, 1, 0, 0, 0).unwrap());
    assert_eq!(period.end(), yesterday);
}

#[test]
fn test_to_array() {
    let period = factory().days(5, 0).unwrap();
    let [start, end] = period.to_array();

    assert_eq!(start, period.start());
    assert_eq!(end, period.end());
}

#[test]
fn test_exception() {
    let f = factory();
    let err = f.create("tomorrow", "yesterday").unwrap_err();

    assert!(matches!(err, PeriodError::InvalidPeriod { .. }));
    assert_eq!(
        err.to_string(),
        "Start date `2024-06-16` cannot be after end date `2024-06-14`."
    );
}

#[test]
fn test_unsupported_unit_names_fail_fast() {
    let period = factory().days(1, 0).unwrap();

    assert!(matches!(
        period.diff_named("diffInMinutes"),
        Err(PeriodError::UnsupportedUnit { .. })
    ));
    assert_eq!(period.diff_named("minutes").unwrap(), 1_440);
}

#[test]
fn test_serialize_period() {
    let config = PeriodConfig::from_toml_str("[timezone]\ndisplay = \"America/Montevideo\"\n").unwrap();
    let factory = PeriodFactory::with_config(
        FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 15, 12, 30, 0).unwrap()),
        &config,
    )
    .unwrap();
    let period = factory.hours(1, 0).unwrap();

    let json = serde_json::to_value(&period).unwrap();
    assert_eq!(json["start"], "2024-06-15T08:30:00-03:00");
    assert_eq!(json["end"], "2024-06-15T09:30:00-03:00");
    assert_eq!(json["timezone"], "America/Montevideo");
    assert_eq!(
        period.to_string(),
        "From: 2024-06-15 08:30:00, To: 2024-06-15 09:30:00"
    );
}
