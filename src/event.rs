//! Recurring events and their year-independent matching.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::CalendarError;
use crate::types::MonthDayKey;

/// An event spanning `start..=end`, repeating every year on the same month/day window.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Event {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub name: Option<String>,
}

impl Event {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, name: Option<String>) -> Self {
        Event { start, end, name }
    }

    /// Whole-day event from `start` to `end`, both at midnight.
    pub fn on_days(start: NaiveDate, end: NaiveDate, name: Option<String>) -> Self {
        Event::new(
            start.and_time(chrono::NaiveTime::MIN),
            end.and_time(chrono::NaiveTime::MIN),
            name,
        )
    }

    /// Check whether the event occurs on `date`, ignoring years.
    ///
    /// A window whose start key comes after its end key wraps past
    /// December 31st and matches from the start key through the end of the
    /// year and from January 1st through the end key. An event whose end
    /// precedes its start within one year is read the same way: it matches
    /// nothing strictly between end and start.
    pub fn matches(&self, date: NaiveDate) -> bool {
        let start = MonthDayKey::of(&self.start);
        let end = MonthDayKey::of(&self.end);
        let target = MonthDayKey::of(&date);
        if target == start || target == end {
            return true;
        }
        if start <= end {
            start < target && target < end
        } else {
            target > start || target < end
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self.start.date();
        let end = self.end.date();
        if start == end {
            write!(f, "{}", start.format("%m-%d"))?;
        } else {
            write!(f, "{}..{}", start.format("%m-%d"), end.format("%m-%d"))?;
        }
        if let Some(name) = &self.name {
            write!(f, " {name}")?;
        }
        Ok(())
    }
}

fn parse_point(input: &str, text: &str) -> Result<NaiveDateTime, CalendarError> {
    let text = text.trim();
    if let Ok(date_time) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M") {
        return Ok(date_time);
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map(|date| date.and_time(chrono::NaiveTime::MIN))
        .map_err(|_| CalendarError::InvalidEvent {
            input: input.to_string(),
            reason: "expected YYYY-MM-DD or YYYY-MM-DDTHH:MM",
        })
}

/// Parse `START[..END][=NAME]`.
impl FromStr for Event {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (range, name) = match s.split_once('=') {
            Some((range, name)) if !name.trim().is_empty() => (range, Some(name.trim().to_string())),
            Some((range, _)) => (range, None),
            None => (s, None),
        };
        let (start, end) = match range.split_once("..") {
            Some((start, end)) => (parse_point(s, start)?, parse_point(s, end)?),
            None => {
                let point = parse_point(s, range)?;
                (point, point)
            }
        };
        Ok(Event::new(start, end, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn ordinary_range() {
        let event = Event::on_days(ymd(2024, 3, 10), ymd(2024, 3, 12), None);
        assert!(!event.matches(ymd(2024, 3, 9)));
        assert!(event.matches(ymd(2024, 3, 10)));
        assert!(event.matches(ymd(2024, 3, 11)));
        assert!(event.matches(ymd(2030, 3, 12)));
        assert!(!event.matches(ymd(2024, 3, 13)));
    }

    #[test]
    fn inverted_range_skips_the_gap() {
        let event = Event::on_days(ymd(2024, 3, 12), ymd(2024, 3, 10), None);
        assert!(event.matches(ymd(2024, 3, 10)));
        assert!(!event.matches(ymd(2024, 3, 11)));
        assert!(event.matches(ymd(2024, 3, 12)));
        assert!(event.matches(ymd(2024, 7, 1)));
    }

    #[test]
    fn wraps_across_year_end() {
        let event = Event::on_days(ymd(2023, 12, 28), ymd(2024, 1, 3), Some("break".into()));
        assert!(event.matches(ymd(2019, 12, 30)));
        assert!(event.matches(ymd(2031, 1, 1)));
        assert!(event.matches(ymd(2024, 12, 31)));
        assert!(!event.matches(ymd(2024, 7, 1)));
        assert!(!event.matches(ymd(2024, 1, 4)));
        assert!(!event.matches(ymd(2024, 12, 27)));
    }

    #[test]
    fn single_day_recurs_every_year() {
        let event = Event::on_days(ymd(2000, 2, 29), ymd(2000, 2, 29), None);
        assert!(event.matches(ymd(2024, 2, 29)));
        assert!(!event.matches(ymd(2023, 2, 28)));
        assert!(!event.matches(ymd(2023, 3, 1)));
    }

    #[test]
    fn time_of_day_is_ignored() {
        let start = ymd(2024, 5, 1).and_hms_opt(23, 59, 0).unwrap();
        let event = Event::new(start, start, None);
        assert!(event.matches(ymd(2025, 5, 1)));
    }

    #[test]
    fn parse_range_with_name() {
        let event: Event = "2023-12-28..2024-01-03=Winter break".parse().unwrap();
        assert_eq!(event.start.date(), ymd(2023, 12, 28));
        assert_eq!(event.end.date(), ymd(2024, 1, 3));
        assert_eq!(event.name.as_deref(), Some("Winter break"));
    }

    #[test]
    fn parse_single_day_and_time() {
        let event: Event = "2024-06-01T09:30".parse().unwrap();
        assert_eq!(event.start, event.end);
        assert_eq!(event.name, None);
        assert_eq!(event.to_string(), "06-01");
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = "tomorrow".parse::<Event>().unwrap_err();
        assert!(matches!(err, CalendarError::InvalidEvent { .. }));
        assert!("2024-02-30".parse::<Event>().is_err());
        assert!("2024-01-01..".parse::<Event>().is_err());
    }

    #[test]
    fn display_range() {
        let event = Event::on_days(ymd(2023, 12, 28), ymd(2024, 1, 3), Some("break".into()));
        assert_eq!(event.to_string(), "12-28..01-03 break");
    }
}
