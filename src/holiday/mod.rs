//! Holiday determination strategies.
//!
//! A strategy answers one question, whether a date is a holiday, and is
//! injected into [`GridConfig`](crate::types::GridConfig). Strategies must be
//! pure: the grid builder may call them from several threads at once.

pub mod equinox;
pub mod japan;

use std::fmt::Debug;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::ValueEnum;

pub use japan::JapaneseHolidays;

/// Decides which dates are holidays.
pub trait HolidayStrategy: Debug + Send + Sync {
    /// Return true if `date` is a holiday. Defined for every representable date.
    fn is_holiday(&self, date: NaiveDate) -> bool;

    /// Name of the holiday on `date`, if any.
    fn holiday_name(&self, date: NaiveDate) -> Option<&'static str> {
        self.is_holiday(date).then_some("Holiday")
    }
}

/// Strategy without any holidays.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHolidays;

impl HolidayStrategy for NoHolidays {
    fn is_holiday(&self, _date: NaiveDate) -> bool {
        false
    }
}

/// Holiday calendars shipped with the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum HolidayCalendar {
    /// No holidays, only weekends are highlighted.
    None,
    /// National holidays of Japan (1948 onward).
    Japan,
}

impl HolidayCalendar {
    pub fn strategy(self) -> Arc<dyn HolidayStrategy> {
        match self {
            HolidayCalendar::None => Arc::new(NoHolidays),
            HolidayCalendar::Japan => Arc::new(JapaneseHolidays),
        }
    }
}
