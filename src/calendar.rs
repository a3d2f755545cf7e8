//! Month grid construction: weeks of seven days covering one calendar month.

use std::ops::Range;
use std::sync::Arc;

use chrono::{Datelike, Days, NaiveDate};
use rayon::prelude::*;

use crate::error::CalendarError;
use crate::event::Event;
use crate::holiday::HolidayStrategy;
use crate::types::{DAYS_PER_WEEK, DayOfMonthType, FirstDayOfWeek, GridConfig, YearMonth};

/// One cell of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Day {
    pub date: NaiveDate,
    /// Events occurring on this date.
    pub events: Vec<Arc<Event>>,
}

impl Day {
    /// Classify the day relative to `year_month` using `strategy`.
    pub fn day_of_month_type(
        &self,
        year_month: YearMonth,
        strategy: &dyn HolidayStrategy,
    ) -> DayOfMonthType {
        let mut kind = DayOfMonthType::from_weekday(self.date.weekday());
        if !year_month.contains(self.date) {
            kind = kind.prevail(DayOfMonthType::OtherMonth);
        } else if strategy.is_holiday(self.date) {
            kind = kind.prevail(DayOfMonthType::Holiday);
        }
        kind
    }

    /// Number of events, capped at `max_count`.
    pub fn event_count(&self, max_count: usize) -> usize {
        self.events.len().min(max_count)
    }
}

/// Seven consecutive days.
#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    pub days: Vec<Day>,
}

impl Week {
    /// Build the week starting at `first_day`, attaching matching `events`.
    fn starting_at(first_day: NaiveDate, events: &[Arc<Event>]) -> Result<Self, CalendarError> {
        let days = first_day
            .iter_days()
            .take(DAYS_PER_WEEK)
            .map(|date| Day {
                date,
                events: events.iter().filter(|e| e.matches(date)).cloned().collect(),
            })
            .collect::<Vec<_>>();
        if days.len() != DAYS_PER_WEEK {
            return Err(CalendarError::DateOutOfRange { date: first_day });
        }
        Ok(Week { days })
    }

    pub fn first_day(&self) -> NaiveDate {
        self.days[0].date
    }
}

/// A rendered calendar month.
///
/// The grid is built once from a [`GridConfig`] snapshot; later
/// configuration changes require building a new `Month`.
#[derive(Debug, Clone)]
pub struct Month {
    year_month: YearMonth,
    config: GridConfig,
    /// Every event handed to the builder, kept for paging.
    all_events: Arc<[Event]>,
    events: Vec<Arc<Event>>,
    weeks: Vec<Week>,
}

impl Month {
    /// Build the grid for the month containing `date`.
    pub fn from_date(
        config: &GridConfig,
        date: NaiveDate,
        events: &[Event],
    ) -> Result<Self, CalendarError> {
        Month::new(config, YearMonth::from_date(date), events)
    }

    /// Build the grid for a paging index (`year * 12 + month`).
    pub fn from_index(
        config: &GridConfig,
        index: i32,
        events: &[Event],
    ) -> Result<Self, CalendarError> {
        Month::new(config, YearMonth::from_index(index)?, events)
    }

    pub fn new(
        config: &GridConfig,
        year_month: YearMonth,
        events: &[Event],
    ) -> Result<Self, CalendarError> {
        Month::build(config.clone(), year_month, Arc::from(events))
    }

    fn build(
        config: GridConfig,
        year_month: YearMonth,
        all_events: Arc<[Event]>,
    ) -> Result<Self, CalendarError> {
        let first_day_of_month = year_month.first_day();
        let days_in_month = year_month.days_in_month();

        // Days borrowed from the previous month to fill the first week
        let lack_days = config
            .first_day_of_week
            .lack_days(first_day_of_month.weekday());
        let first_rendered_day = first_day_of_month
            .checked_sub_days(Days::new(u64::from(lack_days)))
            .ok_or(CalendarError::DateOutOfRange {
                date: first_day_of_month,
            })?;

        let mut week_row_count = (lack_days + days_in_month) / DAYS_PER_WEEK as u32;
        if (lack_days + days_in_month) % DAYS_PER_WEEK as u32 == 0 {
            week_row_count -= 1;
        }

        // Month-number match on either end, not a date-range overlap
        let events: Vec<Arc<Event>> = all_events
            .iter()
            .filter(|e| e.start.month() == year_month.month() || e.end.month() == year_month.month())
            .cloned()
            .map(Arc::new)
            .collect();

        let weeks = (0..=week_row_count)
            .map(|row| {
                let start = first_rendered_day
                    .checked_add_days(Days::new(u64::from(row) * DAYS_PER_WEEK as u64))
                    .ok_or(CalendarError::DateOutOfRange {
                        date: first_day_of_month,
                    })?;
                Week::starting_at(start, &events)
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::trace!(
            year = year_month.year(),
            month = year_month.month(),
            lack_days,
            weeks = weeks.len(),
            events = events.len(),
            "built month grid"
        );

        Ok(Month {
            year_month,
            config,
            all_events,
            events,
            weeks,
        })
    }

    pub fn year_month(&self) -> YearMonth {
        self.year_month
    }

    /// Paging coordinate, see [`YearMonth::index`].
    pub fn month_index(&self) -> i32 {
        self.year_month.index()
    }

    pub fn first_day_of_week(&self) -> FirstDayOfWeek {
        self.config.first_day_of_week
    }

    pub fn holiday_strategy(&self) -> &dyn HolidayStrategy {
        self.config.holiday_strategy.as_ref()
    }

    /// Events starting or ending in this month.
    pub fn events(&self) -> &[Arc<Event>] {
        &self.events
    }

    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    /// All grid days in display order, padding days included.
    pub fn days(&self) -> impl Iterator<Item = &Day> {
        self.weeks.iter().flat_map(|week| week.days.iter())
    }

    /// The grid cell for `date`, if it is rendered.
    pub fn day(&self, date: NaiveDate) -> Option<&Day> {
        self.days().find(|day| day.date == date)
    }

    /// Classify a day with the strategy captured at build time.
    pub fn day_type(&self, day: &Day) -> DayOfMonthType {
        day.day_of_month_type(self.year_month, self.holiday_strategy())
    }

    /// The month before this one, built with the same configuration and events.
    pub fn previous(&self) -> Result<Self, CalendarError> {
        Month::build(
            self.config.clone(),
            self.year_month.previous()?,
            Arc::clone(&self.all_events),
        )
    }

    /// The month after this one, built with the same configuration and events.
    pub fn next(&self) -> Result<Self, CalendarError> {
        Month::build(
            self.config.clone(),
            self.year_month.next()?,
            Arc::clone(&self.all_events),
        )
    }
}

impl PartialEq for Month {
    fn eq(&self, other: &Self) -> bool {
        self.year_month == other.year_month
            && self.config.first_day_of_week == other.config.first_day_of_week
            && self.events == other.events
            && self.weeks == other.weeks
    }
}

/// Build the months for a range of paging indices in parallel.
///
/// Months are returned in index order; the first failure is reported.
pub fn build_months(
    config: &GridConfig,
    indices: Range<i32>,
    events: &[Event],
) -> Result<Vec<Month>, CalendarError> {
    let all_events: Arc<[Event]> = Arc::from(events);
    indices
        .into_par_iter()
        .map(|index| {
            let year_month = YearMonth::from_index(index)?;
            Month::build(config.clone(), year_month, Arc::clone(&all_events))
        })
        .collect()
}
