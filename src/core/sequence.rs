use crate::core::calendar::shift;
use crate::domain::model::Unit;
use crate::utils::error::Result;
use crate::utils::validation::validate_positive_number;
use chrono::DateTime;
use chrono_tz::Tz;

/// Instants `start + k * interval * unit` for `k = 0, 1, ...` strictly before `end`.
///
/// The sequence is a description, not a cursor: every call to [`iter`](Self::iter)
/// starts again from `start`. Calendar units are always measured from `start`,
/// so a month step that clamps once (Jan 31 to Feb 29) does not drift later
/// items (Mar 31 stays Mar 31).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateSequence {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
    interval: i64,
    unit: Unit,
}

impl DateSequence {
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>, interval: i64, unit: Unit) -> Result<Self> {
        validate_positive_number("interval", interval, 1)?;
        Ok(Self {
            start,
            end,
            interval,
            unit,
        })
    }

    /// Evenly spread `steps` over `start..end`: the step is the total length in
    /// seconds divided by `steps`, rounded up, never below one second.
    pub fn with_steps(start: DateTime<Tz>, end: DateTime<Tz>, steps: i64) -> Result<Self> {
        validate_positive_number("steps", steps, 1)?;
        let total = end.signed_duration_since(start).num_seconds().max(0);
        let step = ceil_div(total, steps).max(1);
        tracing::debug!("Spreading {} steps over {}s: step of {}s", steps, total, step);
        Self::new(start, end, step, Unit::Seconds)
    }

    pub fn start(&self) -> DateTime<Tz> {
        self.start
    }

    pub fn end(&self) -> DateTime<Tz> {
        self.end
    }

    pub fn interval(&self) -> i64 {
        self.interval
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn iter(&self) -> DateSequenceIter {
        DateSequenceIter {
            sequence: *self,
            index: 0,
            finished: false,
        }
    }
}

fn ceil_div(value: i64, divisor: i64) -> i64 {
    if divisor <= 0 {
        return value;
    }
    value / divisor + i64::from(value % divisor != 0)
}

#[derive(Debug, Clone)]
pub struct DateSequenceIter {
    sequence: DateSequence,
    index: i64,
    finished: bool,
}

impl Iterator for DateSequenceIter {
    type Item = DateTime<Tz>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let seq = &self.sequence;
        let next = self
            .index
            .checked_mul(seq.interval)
            .and_then(|amount| shift(&seq.start, seq.unit, amount))
            .filter(|instant| *instant < seq.end);

        match next {
            Some(instant) => {
                self.index += 1;
                Some(instant)
            }
            None => {
                self.finished = true;
                None
            }
        }
    }
}

impl std::iter::FusedIterator for DateSequenceIter {}

impl IntoIterator for DateSequence {
    type Item = DateTime<Tz>;
    type IntoIter = DateSequenceIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &DateSequence {
    type Item = DateTime<Tz>;
    type IntoIter = DateSequenceIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
