//! Approximate spring and autumn equinox dates.
//!
//! Piecewise linear approximation of the day the sun passes the equinox
//! point, in three eras. Good for roughly 1900 to 2100; outside that window
//! the result drifts but stays deterministic.

use chrono::NaiveDate;

/// Mean length of the tropical year beyond 365 days.
const DRIFT_PER_YEAR: f64 = 0.242194;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Spring,
    Autumn,
}

impl Season {
    pub fn month(self) -> u32 {
        match self {
            Season::Spring => 3,
            Season::Autumn => 9,
        }
    }
}

/// Linear formula parameters for one era.
struct Era {
    base_year: i32,
    spring: f64,
    autumn: f64,
}

impl Era {
    fn constant(&self, season: Season) -> f64 {
        match season {
            Season::Spring => self.spring,
            Season::Autumn => self.autumn,
        }
    }

    fn day(&self, year: i32, season: Season) -> i64 {
        let elapsed = year - self.base_year;
        let leap_resets = elapsed.div_euclid(4);
        (self.constant(season) + DRIFT_PER_YEAR * f64::from(elapsed) - f64::from(leap_resets))
            .floor() as i64
    }
}

const SINCE_2000: Era = Era {
    base_year: 2000,
    spring: 20.69115,
    autumn: 23.09000,
};

const FROM_1980_TO_1999: Era = Era {
    base_year: 1980,
    spring: 20.8431,
    autumn: 23.2488,
};

/// Day of month of the equinox in `year`, before clamping to a real date.
pub fn equinox_day(year: i32, season: Season) -> i64 {
    match year {
        y if y > 1999 => SINCE_2000.day(y, season),
        1980..=1999 => FROM_1980_TO_1999.day(year, season),
        _ => match season {
            Season::Spring if year >= 1960 && year.rem_euclid(4) == 0 => 20,
            Season::Spring => 21,
            Season::Autumn if (year - 3).rem_euclid(4) == 0 => 24,
            Season::Autumn => 23,
        },
    }
}

/// Equinox date for `year`, or `None` when the approximation leaves the month.
pub fn equinox_date(year: i32, season: Season) -> Option<NaiveDate> {
    let day = u32::try_from(equinox_day(year, season)).ok()?;
    NaiveDate::from_ymd_opt(year, season.month(), day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn golden_values() {
        assert_eq!(equinox_date(2021, Season::Spring), Some(ymd(2021, 3, 20)));
        assert_eq!(equinox_date(2021, Season::Autumn), Some(ymd(2021, 9, 23)));
        assert_eq!(equinox_date(2000, Season::Spring), Some(ymd(2000, 3, 20)));
    }

    #[test]
    fn era_1980_to_1999() {
        // 20.8431 + 0.242194 * 9 - 2 = 21.02
        assert_eq!(equinox_day(1989, Season::Spring), 21);
        assert_eq!(equinox_date(1980, Season::Spring), Some(ymd(1980, 3, 20)));
        assert_eq!(equinox_date(1980, Season::Autumn), Some(ymd(1980, 9, 23)));
        assert_eq!(equinox_date(1999, Season::Autumn), Some(ymd(1999, 9, 23)));
    }

    #[test]
    fn parity_rules_before_1980() {
        assert_eq!(equinox_day(1964, Season::Spring), 20);
        assert_eq!(equinox_day(1956, Season::Spring), 21);
        assert_eq!(equinox_day(1965, Season::Spring), 21);
        assert_eq!(equinox_day(1979, Season::Autumn), 24);
        assert_eq!(equinox_day(1978, Season::Autumn), 23);
        assert_eq!(equinox_day(1951, Season::Autumn), 24);
    }

    #[test]
    fn era_boundaries() {
        // 1999 uses the 1980 formula, 2000 the 2000 formula
        assert_eq!(equinox_day(1999, Season::Spring), 21);
        assert_eq!(equinox_day(2000, Season::Autumn), 23);
    }

    #[test]
    fn far_years_are_total() {
        for year in [-262_000, -1, 0, 1, 5_000, 100_000, 262_000] {
            let _ = equinox_date(year, Season::Spring);
            let _ = equinox_date(year, Season::Autumn);
        }
        assert_eq!(equinox_date(100_000, Season::Spring), None);
    }
}
