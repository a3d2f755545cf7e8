//! Type definitions and constants shared by the grid builder and the formatter.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::CalendarError;
use crate::event::Event;
use crate::holiday::{HolidayStrategy, NoHolidays};

/// Day the rendered week starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FirstDayOfWeek {
    #[default]
    Sunday,
    Monday,
}

impl FirstDayOfWeek {
    pub fn weekday(self) -> Weekday {
        match self {
            FirstDayOfWeek::Sunday => Weekday::Sun,
            FirstDayOfWeek::Monday => Weekday::Mon,
        }
    }

    /// Number of days to step back from the first of a month starting on
    /// `first_day` to reach the first rendered cell.
    pub fn lack_days(self, first_day: Weekday) -> u32 {
        // ISO numbering: Monday = 1 .. Sunday = 7
        let iso = first_day.number_from_monday();
        match self {
            FirstDayOfWeek::Sunday if first_day == Weekday::Sun => 0,
            FirstDayOfWeek::Sunday => iso,
            FirstDayOfWeek::Monday => iso - 1,
        }
    }
}

/// Classification of a grid day relative to the month being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayOfMonthType {
    Weekday,
    Saturday,
    Sunday,
    Holiday,
    /// Padding day borrowed from the previous or next month.
    OtherMonth,
}

impl DayOfMonthType {
    /// Rank used to resolve a day that qualifies for several kinds.
    ///
    /// other-month > holiday > weekend > weekday
    pub fn precedence(self) -> u8 {
        match self {
            DayOfMonthType::OtherMonth => 4,
            DayOfMonthType::Holiday => 3,
            DayOfMonthType::Sunday | DayOfMonthType::Saturday => 2,
            DayOfMonthType::Weekday => 1,
        }
    }

    /// Return whichever of `self` and `other` takes precedence.
    pub fn prevail(self, other: DayOfMonthType) -> DayOfMonthType {
        if other.precedence() > self.precedence() {
            other
        } else {
            self
        }
    }

    pub fn from_weekday(weekday: Weekday) -> DayOfMonthType {
        match weekday {
            Weekday::Sun => DayOfMonthType::Sunday,
            Weekday::Sat => DayOfMonthType::Saturday,
            _ => DayOfMonthType::Weekday,
        }
    }
}

/// A calendar month of a specific year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Create a year-month, rejecting month numbers outside 1-12 and years
    /// outside the representable date range.
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(CalendarError::InvalidYearMonth { year, month });
        }
        Ok(YearMonth { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Decode a paging index produced by [`YearMonth::index`].
    ///
    /// Multiples of 12 decode to December of the previous year.
    pub fn from_index(index: i32) -> Result<Self, CalendarError> {
        let zero_based = index
            .checked_sub(1)
            .ok_or(CalendarError::InvalidMonthIndex { index })?;
        let year = zero_based.div_euclid(12);
        let month = (zero_based.rem_euclid(12) + 1) as u32;
        YearMonth::new(year, month).map_err(|_| CalendarError::InvalidMonthIndex { index })
    }

    /// Linear paging coordinate: `year * 12 + month`.
    pub fn index(self) -> i32 {
        self.year * 12 + self.month as i32
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    /// Check if the year is a leap year (proleptic Gregorian).
    pub fn is_leap_year(self) -> bool {
        (self.year % 4 == 0 && self.year % 100 != 0) || (self.year % 400 == 0)
    }

    pub fn days_in_month(self) -> u32 {
        match self.month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if self.is_leap_year() => 29,
            _ => 28,
        }
    }

    /// Day 1 of the month. Always representable, see [`YearMonth::new`].
    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn previous(self) -> Result<Self, CalendarError> {
        YearMonth::from_index(self.index() - 1)
    }

    pub fn next(self) -> Result<Self, CalendarError> {
        YearMonth::from_index(self.index() + 1)
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

/// Year-independent (month, day) pair, ordered month first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthDayKey {
    pub month: u32,
    pub day: u32,
}

impl MonthDayKey {
    pub fn of<D: Datelike>(date: &D) -> Self {
        MonthDayKey {
            month: date.month(),
            day: date.day(),
        }
    }
}

/// Configuration snapshot read by the grid builder.
#[derive(Clone, Debug)]
pub struct GridConfig {
    /// First day of the week (Sunday or Monday).
    pub first_day_of_week: FirstDayOfWeek,
    /// Strategy deciding which days are holidays.
    pub holiday_strategy: Arc<dyn HolidayStrategy>,
}

impl GridConfig {
    pub fn new(first_day_of_week: FirstDayOfWeek, holiday_strategy: Arc<dyn HolidayStrategy>) -> Self {
        GridConfig {
            first_day_of_week,
            holiday_strategy,
        }
    }

    /// Build a config from an optional strategy; a missing strategy means no holidays.
    pub fn with_strategy(
        first_day_of_week: FirstDayOfWeek,
        holiday_strategy: Option<Arc<dyn HolidayStrategy>>,
    ) -> Self {
        let holiday_strategy = holiday_strategy.unwrap_or_else(|| {
            tracing::debug!("no holiday strategy supplied, using NoHolidays");
            Arc::new(NoHolidays)
        });
        GridConfig::new(first_day_of_week, holiday_strategy)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig::with_strategy(FirstDayOfWeek::default(), None)
    }
}

/// Column display mode for multi-month layouts.
#[derive(Debug, Clone, Copy)]
pub enum ColumnsMode {
    /// Fixed number of columns.
    Fixed(u32),
    /// Auto-detect from terminal width.
    Auto,
}

/// Formatting context containing all display options.
#[derive(Clone, Debug)]
pub struct CalContext {
    /// Grid configuration every rendered month is built with.
    pub grid: GridConfig,
    /// Recurring events attached to the rendered days.
    pub events: Vec<Event>,
    /// Whether to use ANSI color codes in output.
    pub color: bool,
    /// Today's date for highlighting.
    pub today: NaiveDate,
    /// Whether to show year in month headers.
    pub show_year_in_header: bool,
    /// Whether to print the days borrowed from adjacent months.
    pub show_adjacent: bool,
    /// Whether to list holidays and events below the grids.
    pub list: bool,
    /// Width of gutter between months in multi-month display.
    pub gutter_width: usize,
    /// Column display mode.
    pub columns: ColumnsMode,
}

// 6 weeks × 7 days
pub const MAX_WEEKS_PER_MONTH: usize = 6;
pub const DAYS_PER_WEEK: usize = 7;
pub const MONTH_WIDTH: usize = 20;
pub const GUTTER_WIDTH_REGULAR: usize = 2;
pub const GUTTER_WIDTH_YEAR: usize = 3;

// Color is enabled by default for better user experience
pub const COLOR_ENABLED_BY_DEFAULT: bool = true;

// ANSI color codes
pub const COLOR_RESET: &str = "\x1b[0m";
pub const COLOR_REVERSE: &str = "\x1b[7m";
pub const COLOR_UNDERLINE: &str = "\x1b[4m";
pub const COLOR_DIM: &str = "\x1b[2m";
pub const COLOR_RED: &str = "\x1b[91m";
pub const COLOR_BLUE: &str = "\x1b[94m";
pub const COLOR_TEAL: &str = "\x1b[96m";
pub const COLOR_SAND_YELLOW: &str = "\x1b[93m";
