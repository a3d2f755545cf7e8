//! National holidays of Japan.
//!
//! Holidays are decided in two layers:
//!
//! 1. A table of [`HolidayRule`]s covering the dates set by the Public
//!    Holiday Law of 1948 and its amendments: fixed dates, "n-th Monday"
//!    dates, equinox days, substitute holidays and one-off ceremonies. Each
//!    rule carries the years it was in force.
//! 2. From 1986, a day squeezed between two layer-1 holidays is itself a
//!    holiday ("national holiday").

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate, Weekday};

use super::HolidayStrategy;
use super::equinox::{Season, equinox_date};

/// Public Holiday Law promulgated.
const PUBLIC_HOLIDAYS_LAW: i32 = 1948;
/// Substitute holidays introduced.
const SUBSTITUTE_HOLIDAYS_LAW: i32 = 1973;
/// Days between two holidays become holidays.
const NATIONAL_HOLIDAYS_LAW: i32 = 1986;
const OPEN_ENDED: i32 = i32::MAX;

const SUBSTITUTE: &str = "Substitute Holiday";
const NATIONAL_HOLIDAY: &str = "National Holiday";

/// One entry of the holiday table.
#[derive(Debug)]
pub struct HolidayRule {
    /// English name of the holiday.
    pub name: &'static str,
    /// Years the rule was in force.
    pub years: RangeInclusive<i32>,
    /// Date test, only consulted for years inside `years`.
    pub matches: fn(NaiveDate) -> bool,
}

impl HolidayRule {
    pub fn applies(&self, date: NaiveDate) -> bool {
        self.years.contains(&date.year()) && (self.matches)(date)
    }
}

fn on(date: NaiveDate, month: u32, day: u32) -> bool {
    date.month() == month && date.day() == day
}

fn monday_on(date: NaiveDate, month: u32, day: u32) -> bool {
    on(date, month, day) && date.weekday() == Weekday::Mon
}

fn nth_monday(date: NaiveDate, month: u32, n: u8) -> bool {
    NaiveDate::from_weekday_of_month_opt(date.year(), month, Weekday::Mon, n) == Some(date)
}

fn equinox(date: NaiveDate, season: Season) -> bool {
    equinox_date(date.year(), season) == Some(date)
}

/// Monday following an equinox that fell on a Sunday.
fn after_sunday_equinox(date: NaiveDate, season: Season) -> bool {
    equinox_date(date.year(), season)
        .filter(|day| day.weekday() == Weekday::Sun)
        .and_then(|day| day.succ_opt())
        == Some(date)
}

/// Golden Week substitute on 5/6. Until 2006 only a Monday qualifies; from
/// 2007 a Sunday on 5/3 or 5/4 also pushes the substitute to 5/6.
fn golden_week_substitute(date: NaiveDate) -> bool {
    if !on(date, 5, 6) {
        return false;
    }
    match date.weekday() {
        Weekday::Mon => true,
        Weekday::Tue | Weekday::Wed => date.year() >= 2007,
        _ => false,
    }
}

#[rustfmt::skip]
static RULES: &[HolidayRule] = &[
    // January
    HolidayRule { name: "New Year's Day", years: PUBLIC_HOLIDAYS_LAW..=OPEN_ENDED, matches: |d| on(d, 1, 1) },
    HolidayRule { name: SUBSTITUTE, years: SUBSTITUTE_HOLIDAYS_LAW..=OPEN_ENDED, matches: |d| monday_on(d, 1, 2) },
    HolidayRule { name: "Coming of Age Day", years: PUBLIC_HOLIDAYS_LAW..=1999, matches: |d| on(d, 1, 15) },
    HolidayRule { name: SUBSTITUTE, years: SUBSTITUTE_HOLIDAYS_LAW..=1999, matches: |d| monday_on(d, 1, 16) },
    HolidayRule { name: "Coming of Age Day", years: 2000..=OPEN_ENDED, matches: |d| nth_monday(d, 1, 2) },
    // February
    HolidayRule { name: "National Foundation Day", years: PUBLIC_HOLIDAYS_LAW..=OPEN_ENDED, matches: |d| on(d, 2, 11) },
    HolidayRule { name: SUBSTITUTE, years: SUBSTITUTE_HOLIDAYS_LAW..=OPEN_ENDED, matches: |d| monday_on(d, 2, 12) },
    HolidayRule { name: "Emperor's Birthday", years: 2020..=OPEN_ENDED, matches: |d| on(d, 2, 23) },
    HolidayRule { name: SUBSTITUTE, years: 2020..=OPEN_ENDED, matches: |d| monday_on(d, 2, 24) },
    HolidayRule { name: "Funeral of Emperor Showa", years: 1989..=1989, matches: |d| on(d, 2, 24) },
    // March
    HolidayRule { name: "Vernal Equinox Day", years: PUBLIC_HOLIDAYS_LAW..=OPEN_ENDED, matches: |d| equinox(d, Season::Spring) },
    HolidayRule { name: SUBSTITUTE, years: SUBSTITUTE_HOLIDAYS_LAW..=OPEN_ENDED, matches: |d| after_sunday_equinox(d, Season::Spring) },
    // April
    HolidayRule { name: "Wedding of Crown Prince Akihito", years: 1959..=1959, matches: |d| on(d, 4, 10) },
    HolidayRule { name: "Emperor's Birthday", years: PUBLIC_HOLIDAYS_LAW..=1988, matches: |d| on(d, 4, 29) },
    HolidayRule { name: "Greenery Day", years: 1989..=2006, matches: |d| on(d, 4, 29) },
    HolidayRule { name: "Showa Day", years: 2007..=OPEN_ENDED, matches: |d| on(d, 4, 29) },
    HolidayRule { name: SUBSTITUTE, years: SUBSTITUTE_HOLIDAYS_LAW..=OPEN_ENDED, matches: |d| monday_on(d, 4, 30) },
    // May
    HolidayRule { name: "Enthronement Day", years: 2019..=2019, matches: |d| on(d, 5, 1) },
    HolidayRule { name: "Constitution Memorial Day", years: PUBLIC_HOLIDAYS_LAW..=OPEN_ENDED, matches: |d| on(d, 5, 3) },
    HolidayRule { name: NATIONAL_HOLIDAY, years: PUBLIC_HOLIDAYS_LAW..=2006, matches: |d| on(d, 5, 4) },
    HolidayRule { name: "Greenery Day", years: 2007..=OPEN_ENDED, matches: |d| on(d, 5, 4) },
    HolidayRule { name: "Children's Day", years: PUBLIC_HOLIDAYS_LAW..=OPEN_ENDED, matches: |d| on(d, 5, 5) },
    HolidayRule { name: SUBSTITUTE, years: SUBSTITUTE_HOLIDAYS_LAW..=OPEN_ENDED, matches: golden_week_substitute },
    // June
    HolidayRule { name: "Wedding of Crown Prince Naruhito", years: 1993..=1993, matches: |d| on(d, 6, 9) },
    // July
    HolidayRule { name: "Marine Day", years: 1996..=2002, matches: |d| on(d, 7, 20) },
    HolidayRule { name: SUBSTITUTE, years: 1996..=2002, matches: |d| monday_on(d, 7, 21) },
    HolidayRule { name: "Marine Day", years: 2003..=2019, matches: |d| nth_monday(d, 7, 3) },
    HolidayRule { name: "Marine Day", years: 2020..=2020, matches: |d| on(d, 7, 23) },
    HolidayRule { name: "Sports Day", years: 2020..=2020, matches: |d| on(d, 7, 24) },
    HolidayRule { name: "Marine Day", years: 2021..=2021, matches: |d| on(d, 7, 22) },
    HolidayRule { name: "Sports Day", years: 2021..=2021, matches: |d| on(d, 7, 23) },
    HolidayRule { name: "Marine Day", years: 2022..=OPEN_ENDED, matches: |d| nth_monday(d, 7, 3) },
    // August
    HolidayRule { name: "Mountain Day", years: 2016..=2019, matches: |d| on(d, 8, 11) },
    HolidayRule { name: SUBSTITUTE, years: 2016..=2019, matches: |d| monday_on(d, 8, 12) },
    HolidayRule { name: "Mountain Day", years: 2020..=2020, matches: |d| on(d, 8, 10) },
    HolidayRule { name: "Mountain Day", years: 2021..=2021, matches: |d| on(d, 8, 8) },
    HolidayRule { name: SUBSTITUTE, years: 2021..=2021, matches: |d| on(d, 8, 9) },
    HolidayRule { name: "Mountain Day", years: 2022..=OPEN_ENDED, matches: |d| on(d, 8, 11) },
    HolidayRule { name: SUBSTITUTE, years: 2022..=OPEN_ENDED, matches: |d| monday_on(d, 8, 12) },
    // September
    HolidayRule { name: "Respect for the Aged Day", years: 1966..=2002, matches: |d| on(d, 9, 15) },
    HolidayRule { name: SUBSTITUTE, years: SUBSTITUTE_HOLIDAYS_LAW..=2002, matches: |d| monday_on(d, 9, 16) },
    HolidayRule { name: "Respect for the Aged Day", years: 2003..=OPEN_ENDED, matches: |d| nth_monday(d, 9, 3) },
    HolidayRule { name: "Autumnal Equinox Day", years: PUBLIC_HOLIDAYS_LAW..=OPEN_ENDED, matches: |d| equinox(d, Season::Autumn) },
    HolidayRule { name: SUBSTITUTE, years: SUBSTITUTE_HOLIDAYS_LAW..=OPEN_ENDED, matches: |d| after_sunday_equinox(d, Season::Autumn) },
    // October
    HolidayRule { name: "Health and Sports Day", years: 1966..=1999, matches: |d| on(d, 10, 10) },
    HolidayRule { name: SUBSTITUTE, years: SUBSTITUTE_HOLIDAYS_LAW..=1999, matches: |d| monday_on(d, 10, 11) },
    HolidayRule { name: "Health and Sports Day", years: 2000..=2019, matches: |d| nth_monday(d, 10, 2) },
    HolidayRule { name: "Sports Day", years: 2022..=OPEN_ENDED, matches: |d| nth_monday(d, 10, 2) },
    HolidayRule { name: "Enthronement Ceremony", years: 2019..=2019, matches: |d| on(d, 10, 22) },
    // November
    HolidayRule { name: "Culture Day", years: PUBLIC_HOLIDAYS_LAW..=OPEN_ENDED, matches: |d| on(d, 11, 3) },
    HolidayRule { name: SUBSTITUTE, years: SUBSTITUTE_HOLIDAYS_LAW..=OPEN_ENDED, matches: |d| monday_on(d, 11, 4) },
    HolidayRule { name: "Enthronement Ceremony", years: 1990..=1990, matches: |d| on(d, 11, 12) },
    HolidayRule { name: "Labor Thanksgiving Day", years: PUBLIC_HOLIDAYS_LAW..=OPEN_ENDED, matches: |d| on(d, 11, 23) },
    HolidayRule { name: SUBSTITUTE, years: SUBSTITUTE_HOLIDAYS_LAW..=OPEN_ENDED, matches: |d| monday_on(d, 11, 24) },
    // December
    HolidayRule { name: "Emperor's Birthday", years: 1989..=2018, matches: |d| on(d, 12, 23) },
    HolidayRule { name: SUBSTITUTE, years: 1989..=2018, matches: |d| monday_on(d, 12, 24) },
];

/// Holiday strategy for Japan.
#[derive(Debug, Clone, Copy, Default)]
pub struct JapaneseHolidays;

impl JapaneseHolidays {
    /// The layer-1 rule table, in evaluation order.
    pub fn rules() -> &'static [HolidayRule] {
        RULES
    }

    /// First layer-1 rule matching `date`.
    pub fn matching_rule(date: NaiveDate) -> Option<&'static HolidayRule> {
        RULES.iter().find(|rule| rule.applies(date))
    }

    /// True for holidays decided by the rule table alone.
    pub fn is_fixed_or_computed_holiday(date: NaiveDate) -> bool {
        Self::matching_rule(date).is_some()
    }

    /// True when `date` is not a layer-1 holiday but both neighbours are.
    pub fn is_sandwiched(date: NaiveDate) -> bool {
        if date.year() < NATIONAL_HOLIDAYS_LAW || Self::is_fixed_or_computed_holiday(date) {
            return false;
        }
        let before = date.pred_opt().is_some_and(Self::is_fixed_or_computed_holiday);
        let after = date.succ_opt().is_some_and(Self::is_fixed_or_computed_holiday);
        before && after
    }

    /// All holidays of `year` with their names, in date order.
    pub fn holidays_in_year(&self, year: i32) -> Vec<(NaiveDate, &'static str)> {
        let Some(jan1) = NaiveDate::from_ymd_opt(year, 1, 1) else {
            return Vec::new();
        };
        jan1.iter_days()
            .take_while(|date| date.year() == year)
            .filter_map(|date| self.holiday_name(date).map(|name| (date, name)))
            .collect()
    }
}

impl HolidayStrategy for JapaneseHolidays {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        Self::is_fixed_or_computed_holiday(date) || Self::is_sandwiched(date)
    }

    fn holiday_name(&self, date: NaiveDate) -> Option<&'static str> {
        match Self::matching_rule(date) {
            Some(rule) => Some(rule.name),
            None if Self::is_sandwiched(date) => Some(NATIONAL_HOLIDAY),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn is_holiday(y: i32, m: u32, d: u32) -> bool {
        JapaneseHolidays.is_holiday(ymd(y, m, d))
    }

    #[test]
    fn olympic_special_provisions_2021() {
        assert!(is_holiday(2021, 7, 22));
        assert!(is_holiday(2021, 7, 23));
        assert!(is_holiday(2021, 8, 8));
        assert!(is_holiday(2021, 8, 9));
        assert!(!is_holiday(2021, 7, 19));
        assert!(!is_holiday(2021, 8, 11));
        assert!(!is_holiday(2021, 10, 11));
    }

    #[test]
    fn olympic_special_provisions_2020() {
        assert!(is_holiday(2020, 7, 23));
        assert!(is_holiday(2020, 7, 24));
        assert!(is_holiday(2020, 8, 10));
        assert!(!is_holiday(2020, 7, 20));
        assert!(!is_holiday(2020, 8, 11));
        assert!(!is_holiday(2020, 10, 12));
    }

    #[test]
    fn enthronement_year_2019() {
        assert!(is_holiday(2019, 5, 1));
        assert!(is_holiday(2019, 10, 22));
        // sandwiched between Showa Day, Enthronement Day and Constitution Day
        assert!(is_holiday(2019, 4, 30));
        assert!(is_holiday(2019, 5, 2));
        assert!(!is_holiday(2019, 12, 23));
        assert!(!is_holiday(2019, 2, 23));
    }

    #[test]
    fn coming_of_age_day_moves_in_2000() {
        assert!(is_holiday(2000, 1, 10));
        assert!(!is_holiday(2000, 1, 15));
        assert!(is_holiday(1999, 1, 15));
        assert!(is_holiday(2021, 1, 11));
    }

    #[test]
    fn one_off_ceremonies() {
        assert!(is_holiday(1959, 4, 10));
        assert!(is_holiday(1989, 2, 24));
        assert!(is_holiday(1990, 11, 12));
        assert!(is_holiday(1993, 6, 9));
        assert!(!is_holiday(1960, 4, 10));
        assert!(!is_holiday(1994, 6, 9));
    }

    #[test]
    fn nothing_before_the_law() {
        assert!(!is_holiday(1947, 1, 1));
        assert!(!is_holiday(1947, 11, 3));
        assert!(is_holiday(1948, 1, 1));
    }

    #[test]
    fn era_bound_floating_holidays() {
        // Respect for the Aged Day from 1966
        assert!(!is_holiday(1965, 9, 15));
        assert!(is_holiday(1966, 9, 15));
        // Marine Day from 1996, no third Monday of July before that
        assert!(!is_holiday(1995, 7, 17));
        assert!(is_holiday(1996, 7, 20));
        assert!(is_holiday(2003, 7, 21));
        // Mountain Day from 2016
        assert!(!is_holiday(2015, 8, 11));
        assert!(is_holiday(2016, 8, 11));
        // Emperor's Birthday moves with the reign
        assert!(is_holiday(2018, 12, 23));
        assert!(is_holiday(2020, 2, 23));
    }

    #[test]
    fn substitute_holidays() {
        // New Year's Day on Sunday
        assert!(is_holiday(2012, 1, 2));
        assert!(!is_holiday(2013, 1, 2));
        // Emperor's Birthday 2020 on Sunday
        assert!(is_holiday(2020, 2, 24));
        // first substitute holiday under the 1973 amendment
        assert!(is_holiday(1973, 4, 30));
        // Mountain Day 2019 on Sunday
        assert!(is_holiday(2019, 8, 12));
        // Culture Day 2019 on Sunday
        assert!(is_holiday(2019, 11, 4));
    }

    #[test]
    fn equinox_substitutes() {
        // 2016-03-20 Sunday
        assert!(is_holiday(2016, 3, 20));
        assert!(is_holiday(2016, 3, 21));
        // 2024-09-22 Sunday
        assert!(is_holiday(2024, 9, 22));
        assert!(is_holiday(2024, 9, 23));
        // 2021-03-20 Saturday, no substitute
        assert!(!is_holiday(2021, 3, 22));
    }

    #[test]
    fn golden_week_substitutes() {
        // 2008-05-04 Sunday -> 5/6 Tuesday
        assert!(is_holiday(2008, 5, 6));
        // 2009-05-03 Sunday -> 5/6 Wednesday
        assert!(is_holiday(2009, 5, 6));
        // 2010-05-06 Thursday
        assert!(!is_holiday(2010, 5, 6));
        // before 2007 only Monday qualifies
        assert!(!is_holiday(2003, 5, 6));
        assert!(is_holiday(2002, 5, 6));
    }

    #[test]
    fn silver_week() {
        // 2015: Respect for the Aged Day 9/21, equinox 9/23
        assert!(is_holiday(2015, 9, 21));
        assert!(is_holiday(2015, 9, 22));
        assert!(is_holiday(2015, 9, 23));
        assert!(JapaneseHolidays::is_sandwiched(ymd(2015, 9, 22)));
        // 2009 follows the same pattern
        assert!(is_holiday(2009, 9, 22));
        // 2014: 9/15 and 9/23 are a week apart
        for day in 16..=22 {
            assert!(!is_holiday(2014, 9, day), "2014-09-{day}");
        }
        // 2016: 9/19 and 9/22
        assert!(!is_holiday(2016, 9, 20));
        assert!(!is_holiday(2016, 9, 21));
    }

    #[test]
    fn holiday_names() {
        let jp = JapaneseHolidays;
        assert_eq!(jp.holiday_name(ymd(2024, 1, 1)), Some("New Year's Day"));
        assert_eq!(jp.holiday_name(ymd(1985, 4, 29)), Some("Emperor's Birthday"));
        assert_eq!(jp.holiday_name(ymd(1995, 4, 29)), Some("Greenery Day"));
        assert_eq!(jp.holiday_name(ymd(2010, 4, 29)), Some("Showa Day"));
        assert_eq!(jp.holiday_name(ymd(2015, 9, 22)), Some("National Holiday"));
        assert_eq!(jp.holiday_name(ymd(2021, 8, 9)), Some("Substitute Holiday"));
        assert_eq!(jp.holiday_name(ymd(2024, 1, 3)), None);
    }

    #[test]
    fn holidays_in_2021() {
        let expected = [
            (1, 1),
            (1, 11),
            (2, 11),
            (2, 23),
            (3, 20),
            (4, 29),
            (5, 3),
            (5, 4),
            (5, 5),
            (7, 22),
            (7, 23),
            (8, 8),
            (8, 9),
            (9, 20),
            (9, 23),
            (11, 3),
            (11, 23),
        ];
        let actual: Vec<(u32, u32)> = JapaneseHolidays
            .holidays_in_year(2021)
            .into_iter()
            .map(|(date, _)| (date.month(), date.day()))
            .collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn holidays_in_2019() {
        assert_eq!(JapaneseHolidays.holidays_in_year(2019).len(), 22);
    }

    #[test]
    fn total_at_the_edges_of_the_calendar() {
        assert!(!JapaneseHolidays.is_holiday(NaiveDate::MIN));
        let _ = JapaneseHolidays.is_holiday(NaiveDate::MAX);
        assert!(JapaneseHolidays.holidays_in_year(i32::MAX).is_empty());
    }

    #[test]
    fn rule_years_are_well_formed() {
        for rule in JapaneseHolidays::rules() {
            assert!(rule.years.start() <= rule.years.end(), "{}", rule.name);
            assert!(*rule.years.start() >= PUBLIC_HOLIDAYS_LAW, "{}", rule.name);
        }
    }
}
