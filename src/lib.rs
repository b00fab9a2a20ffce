pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::PeriodConfig;
pub use core::{
    factory::{Bound, PeriodFactory},
    period::Period,
    sequence::{DateSequence, DateSequenceIter},
};
pub use domain::model::{DiffBreakdown, Locale, Unit};
pub use domain::ports::{Clock, FixedClock, SystemClock};
pub use utils::error::{PeriodError, Result};
