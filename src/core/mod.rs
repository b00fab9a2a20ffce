pub mod calendar;
pub mod factory;
pub mod parse;
pub mod period;
pub mod sequence;

pub use crate::domain::model::{DiffBreakdown, Locale, Unit};
pub use crate::domain::ports::{Clock, FixedClock, SystemClock};
pub use crate::utils::error::Result;
