//! Command-line argument parsing using clap.
//!
//! Arguments follow util-linux cal convention: `[[day] month] year`

use std::io::IsTerminal;

use chrono::{Datelike, NaiveDate};
use clap::{Parser, ValueHint};

use crate::error::CalendarError;
use crate::event::Event;
use crate::holiday::HolidayCalendar;
use crate::types::{
    COLOR_ENABLED_BY_DEFAULT, CalContext, ColumnsMode, FirstDayOfWeek, GUTTER_WIDTH_REGULAR,
    GridConfig, YearMonth,
};

#[derive(Parser, Debug)]
#[command(name = "calgrid")]
#[command(about = "Displays a month grid with holidays and recurring events", long_about = None)]
#[command(version)]
#[command(after_help = HELP_MESSAGE)]
pub struct Args {
    /// Week starts on Sunday (default).
    #[arg(short = 's', long, help_heading = "Calendar options")]
    pub sunday: bool,

    /// Week starts on Monday.
    #[arg(short = 'm', long, help_heading = "Calendar options")]
    pub monday: bool,

    /// Holiday calendar used to classify days.
    #[arg(
        long,
        default_value = "japan",
        help_heading = "Calendar options",
        value_name = "calendar"
    )]
    pub holidays: HolidayCalendar,

    /// Recurring event, `START[..END][=NAME]` with dates as YYYY-MM-DD.
    ///
    /// The year is ignored when matching: an event repeats every year.
    #[arg(
        short = 'e',
        long = "event",
        help_heading = "Calendar options",
        value_name = "event"
    )]
    pub events: Vec<Event>,

    /// Display whole year.
    #[arg(short = 'y', long, help_heading = "Display options")]
    pub year: bool,

    /// Display three months (previous, current, next).
    #[arg(short = '3', long = "three", help_heading = "Display options")]
    pub three_months: bool,

    /// Number of months to display.
    #[arg(
        short = 'n',
        long = "months",
        help_heading = "Display options",
        value_name = "num"
    )]
    pub months_count: Option<u32>,

    /// Show the days borrowed from the previous and next month.
    #[arg(short = 'a', long = "adjacent", help_heading = "Display options")]
    pub adjacent: bool,

    /// List holidays and events below the calendar.
    #[arg(short = 'l', long = "list", help_heading = "Display options")]
    pub list: bool,

    /// Day (1-31) - optional, used with month and year.
    #[arg(index = 1, default_value = None, value_name = "day", value_hint = ValueHint::Other)]
    pub day_arg: Option<String>,

    /// Month (1-12 or name) - optional, used with year.
    #[arg(index = 2, default_value = None, value_name = "month", value_hint = ValueHint::Other)]
    pub month_arg: Option<String>,

    /// Year (1-9999).
    #[arg(index = 3, default_value = None, value_name = "year", value_hint = ValueHint::Other)]
    pub year_arg: Option<String>,

    /// Disable colorized output.
    #[arg(long, help_heading = "Output options")]
    pub color: bool,

    /// Number of columns for multiple months (or "auto" for terminal width).
    #[arg(
        short = 'c',
        long = "columns",
        help_heading = "Output options",
        value_name = "width"
    )]
    pub columns: Option<String>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, help_heading = "Output options")]
    pub verbose: u8,
}

/// Help message displayed with --help.
const HELP_MESSAGE: &str = "Display a month grid, or several of them.

Without any arguments, display the current month.

Examples:
  calgrid                       Display current month
  calgrid -3                    Display three months (prev, current, next)
  calgrid -y 2021               Display the whole year 2021
  calgrid 7 2021 -l             Display July 2021 and list its holidays
  calgrid -m --holidays none    Monday first, weekends only
  calgrid -e 2023-12-28..2024-01-03=Break 1 2025";

impl Args {
    pub fn parse() -> Self {
        Parser::parse()
    }
}

impl CalContext {
    pub fn new(args: &Args) -> Result<Self, CalendarError> {
        let today = get_today_date();

        let color = !args.color && COLOR_ENABLED_BY_DEFAULT && std::io::stdout().is_terminal();

        let columns = match args.columns.as_deref() {
            Some("auto") | None => ColumnsMode::Auto,
            Some(s) => {
                let n = s
                    .parse::<u32>()
                    .map_err(|_| invalid(format!("Invalid columns value: {s}")))?;
                if n == 0 {
                    return Err(invalid("Columns must be positive".to_string()));
                }
                ColumnsMode::Fixed(n)
            }
        };

        // Prevent conflicting display modes
        let mode_count = [args.year, args.three_months, args.months_count.is_some()]
            .iter()
            .filter(|&&x| x)
            .count();
        if mode_count > 1 {
            return Err(invalid(
                "Options -y, -3, and -n are mutually exclusive".to_string(),
            ));
        }

        if args.sunday && args.monday {
            return Err(invalid(
                "Options -s and -m are mutually exclusive".to_string(),
            ));
        }

        let first_day_of_week = if args.monday {
            FirstDayOfWeek::Monday
        } else {
            FirstDayOfWeek::Sunday
        };

        Ok(CalContext {
            grid: GridConfig::new(first_day_of_week, args.holidays.strategy()),
            events: args.events.clone(),
            color,
            today,
            show_year_in_header: true,
            show_adjacent: args.adjacent,
            list: args.list,
            gutter_width: GUTTER_WIDTH_REGULAR,
            columns,
        })
    }
}

fn invalid(message: String) -> CalendarError {
    CalendarError::InvalidArgument(message)
}

/// Get today's date, respecting CALGRID_TEST_TIME environment variable for testing.
pub fn get_today_date() -> NaiveDate {
    if let Ok(test_time) = std::env::var("CALGRID_TEST_TIME")
        && let Ok(date) = NaiveDate::parse_from_str(&test_time, "%Y-%m-%d")
    {
        return date;
    }
    chrono::Local::now().date_naive()
}

fn parse_year(s: &str) -> Result<i32, CalendarError> {
    let year = s
        .parse::<i32>()
        .map_err(|_| invalid(format!("Invalid year: {s}")))?;
    if !(1..=9999).contains(&year) {
        return Err(invalid(format!("Invalid year: {year} (must be 1-9999)")));
    }
    Ok(year)
}

fn parse_month_arg(s: &str) -> Result<u32, CalendarError> {
    crate::formatter::parse_month(s).ok_or_else(|| invalid(format!("Invalid month: {s}")))
}

/// Calculate the month to display, and the day to highlight if one was given.
///
/// Argument patterns:
/// - 1 arg: year (4 digits) or month (1-2 digits)
/// - 2 args: month year
/// - 3 args: day month year
pub fn get_display_date(args: &Args) -> Result<(YearMonth, Option<NaiveDate>), CalendarError> {
    let today = get_today_date();

    match (
        args.day_arg.as_deref(),
        args.month_arg.as_deref(),
        args.year_arg.as_deref(),
    ) {
        // One argument: could be year (4 digits) or month (1-2 digits)
        (Some(val), None, None) => {
            if let Ok(num) = val.parse::<i32>()
                && (1000..=9999).contains(&num)
            {
                return Ok((YearMonth::new(num, today.month())?, None));
            }
            let month = parse_month_arg(val)?;
            Ok((YearMonth::new(today.year(), month)?, None))
        }
        // Two arguments: month year (e.g., calgrid 2 2026)
        (Some(month), Some(year), None) => {
            let month = parse_month_arg(month)?;
            Ok((YearMonth::new(parse_year(year)?, month)?, None))
        }
        // Three arguments: day month year
        (Some(day), Some(month), Some(year)) => {
            let day = day
                .parse::<u32>()
                .map_err(|_| invalid(format!("Invalid day: {day}")))?;
            let year_month = YearMonth::new(parse_year(year)?, parse_month_arg(month)?)?;
            let date = NaiveDate::from_ymd_opt(year_month.year(), year_month.month(), day)
                .ok_or_else(|| {
                    invalid(format!(
                        "Invalid day: {day} (must be 1-{})",
                        year_month.days_in_month()
                    ))
                })?;
            Ok((year_month, Some(date)))
        }
        // No arguments: current month
        (None, None, None) => Ok((YearMonth::from_date(today), None)),
        _ => Err(invalid("Invalid argument combination".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("calgrid").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn month_and_year() {
        let (ym, day) = get_display_date(&parse(&["7", "2021"])).unwrap();
        assert_eq!(ym, YearMonth::new(2021, 7).unwrap());
        assert_eq!(day, None);
    }

    #[test]
    fn day_month_year() {
        let (ym, day) = get_display_date(&parse(&["22", "july", "2021"])).unwrap();
        assert_eq!(ym, YearMonth::new(2021, 7).unwrap());
        assert_eq!(day, NaiveDate::from_ymd_opt(2021, 7, 22));
    }

    #[test]
    fn nonexistent_day_is_rejected() {
        let err = get_display_date(&parse(&["30", "2", "2024"])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid day: 30 (must be 1-29)");
    }

    #[test]
    fn year_out_of_range() {
        assert!(get_display_date(&parse(&["1", "10000"])).is_err());
    }

    #[test]
    fn context_defaults() {
        let ctx = CalContext::new(&parse(&["--color"])).unwrap();
        assert!(!ctx.color);
        assert_eq!(ctx.grid.first_day_of_week, FirstDayOfWeek::Sunday);
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn events_are_parsed() {
        let ctx = CalContext::new(&parse(&["-e", "2024-01-01=New year", "-e", "2024-03-01..2024-03-02"]))
            .unwrap();
        assert_eq!(ctx.events.len(), 2);
        assert_eq!(ctx.events[0].name.as_deref(), Some("New year"));
    }

    #[test]
    fn bad_event_fails_parsing() {
        let argv = ["calgrid", "-e", "soon"];
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn conflicting_modes() {
        assert!(CalContext::new(&parse(&["-y", "-3"])).is_err());
        assert!(CalContext::new(&parse(&["-s", "-m"])).is_err());
        assert!(CalContext::new(&parse(&["-c", "0"])).is_err());
    }
}
