use crate::domain::model::{DiffBreakdown, Locale};

struct Phrases {
    year: (&'static str, &'static str),
    month: (&'static str, &'static str),
    day: (&'static str, &'static str),
    hour: (&'static str, &'static str),
    minute: (&'static str, &'static str),
}

const ENGLISH: Phrases = Phrases {
    year: ("year", "years"),
    month: ("month", "months"),
    day: ("day", "days"),
    hour: ("hour", "hours"),
    minute: ("minute", "minutes"),
};

const SPANISH: Phrases = Phrases {
    year: ("año", "años"),
    month: ("mes", "meses"),
    day: ("día", "días"),
    hour: ("hora", "horas"),
    minute: ("minuto", "minutos"),
};

fn phrases(locale: Locale) -> &'static Phrases {
    match locale {
        Locale::English => &ENGLISH,
        Locale::Spanish => &SPANISH,
    }
}

fn term(value: i64, (singular, plural): (&str, &str)) -> String {
    format!("{} {}", value, if value == 1 { singular } else { plural })
}

/// 將時間區間轉為文字，例如 `2 years, 24 days, 2 hours, 23 minutes`
///
/// Years, months and days only appear when non-zero; hours and minutes are
/// always present.
pub fn interval_to_string(interval: &DiffBreakdown, locale: Locale) -> String {
    let words = phrases(locale);
    let mut duration = String::new();

    for (value, names) in [
        (interval.years, words.year),
        (interval.months, words.month),
        (interval.days, words.day),
    ] {
        if value > 0 {
            duration.push_str(&term(value, names));
            duration.push_str(", ");
        }
    }

    duration.push_str(&term(interval.hours, words.hour));
    duration.push_str(", ");
    duration.push_str(&term(interval.minutes, words.minute));
    duration
}
