//! Calendar formatting and display with localization and color support.

use chrono::{Datelike, Days, Locale, NaiveDate, Weekday};
use unicode_width::UnicodeWidthStr;

use crate::calendar::{Day, Month, build_months};
use crate::error::CalendarError;
use crate::types::{
    COLOR_BLUE, COLOR_DIM, COLOR_RED, COLOR_RESET, COLOR_REVERSE, COLOR_SAND_YELLOW, COLOR_TEAL,
    COLOR_UNDERLINE, CalContext, ColumnsMode, DayOfMonthType, FirstDayOfWeek, GUTTER_WIDTH_YEAR,
    MAX_WEEKS_PER_MONTH, MONTH_WIDTH, YearMonth,
};

/// Get system locale from environment (LC_ALL > LC_TIME > LANG > en_US).
pub fn get_system_locale() -> Locale {
    std::env::var("LC_ALL")
        .or_else(|_| std::env::var("LC_TIME"))
        .or_else(|_| std::env::var("LANG"))
        .unwrap_or_else(|_| "en_US.UTF-8".to_string())
        .split('.')
        .next()
        .unwrap_or("en_US")
        .split('@')
        .next()
        .unwrap_or("en_US")
        .parse()
        .unwrap_or(Locale::en_US)
}

/// Get month name in nominative case for current locale.
pub fn get_month_name(month: u32) -> String {
    match NaiveDate::from_ymd_opt(2000, month, 1) {
        Some(date) => date.format_localized("%B", get_system_locale()).to_string(),
        None => month.to_string(),
    }
}

/// Parse month from string (numeric 1-12 or English name).
pub fn parse_month(s: &str) -> Option<u32> {
    if let Ok(n) = s.parse::<u32>()
        && (1..=12).contains(&n)
    {
        return Some(n);
    }

    const MONTH_NAMES: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];
    let s_lower = s.to_lowercase();
    if s_lower.len() < 3 {
        return None;
    }
    // Full names and any prefix of at least three letters ("sep", "sept")
    MONTH_NAMES
        .iter()
        .position(|name| name.starts_with(&s_lower))
        .map(|idx| idx as u32 + 1)
}

/// Format month header with optional year and color.
pub fn format_month_header(
    year_month: YearMonth,
    width: usize,
    show_year: bool,
    color: bool,
) -> String {
    let month_name = get_month_name(year_month.month());
    let header = if show_year {
        format!("{} {}", month_name, year_month.year())
    } else {
        month_name
    };
    let centered = center_text(&header, width);
    if color {
        format!("{}{}{}", COLOR_TEAL, centered, COLOR_RESET)
    } else {
        centered
    }
}

/// Center text within a specified width, accounting for Unicode character widths.
fn center_text(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width >= width {
        return text.to_string();
    }
    let total_padding = width - text_width;
    let left_padding = total_padding.div_ceil(2);
    let right_padding = total_padding - left_padding;
    format!(
        "{}{}{}",
        " ".repeat(left_padding),
        text,
        " ".repeat(right_padding)
    )
}

/// Get weekday order based on week start day.
pub fn get_weekday_order(first_day_of_week: FirstDayOfWeek) -> [Weekday; 7] {
    let mut order = [first_day_of_week.weekday(); 7];
    for i in 1..order.len() {
        order[i] = order[i - 1].succ();
    }
    order
}

/// Get 2-character weekday abbreviation for current locale.
pub fn get_weekday_short_name(weekday: Weekday, locale: Locale) -> String {
    // 2000-01-03 is a Monday
    let offset = Days::new(u64::from(weekday.num_days_from_monday()));
    let date = NaiveDate::from_ymd_opt(2000, 1, 3).and_then(|monday| monday.checked_add_days(offset));
    match date {
        Some(date) => date
            .format_localized("%a", locale)
            .to_string()
            .chars()
            .take(2)
            .collect(),
        None => String::new(),
    }
}

/// Format weekday header row with optional color.
pub fn format_weekday_headers(ctx: &CalContext) -> String {
    let locale = get_system_locale();
    let names: Vec<String> = get_weekday_order(ctx.grid.first_day_of_week)
        .iter()
        .map(|&weekday| format!("{:>2}", get_weekday_short_name(weekday, locale)))
        .collect();
    let row = names.join(" ");
    if ctx.color {
        format!("{}{}{}", COLOR_SAND_YELLOW, row, COLOR_RESET)
    } else {
        row
    }
}

/// Color for a day kind.
fn day_color(kind: DayOfMonthType) -> &'static str {
    match kind {
        DayOfMonthType::Holiday | DayOfMonthType::Sunday => COLOR_RED,
        DayOfMonthType::Saturday => COLOR_BLUE,
        DayOfMonthType::OtherMonth => COLOR_DIM,
        DayOfMonthType::Weekday => "",
    }
}

/// Format day cell with color highlighting.
///
/// Highlighted day is reversed and days with events underlined, on top of
/// the color of the day kind.
fn format_day(ctx: &CalContext, month: &Month, day: &Day, is_last: bool) -> String {
    let kind = month.day_type(day);
    let formatted = if kind == DayOfMonthType::OtherMonth && !ctx.show_adjacent {
        "  ".to_string()
    } else {
        let day_str = format!("{:>2}", day.date.day());
        let mut style = String::new();
        if ctx.color && kind != DayOfMonthType::OtherMonth {
            if day.date == ctx.today {
                style.push_str(COLOR_REVERSE);
            }
            if !day.events.is_empty() {
                style.push_str(COLOR_UNDERLINE);
            }
        }
        if ctx.color {
            style.push_str(day_color(kind));
        }
        if style.is_empty() {
            day_str
        } else {
            format!("{}{}{}", style, day_str, COLOR_RESET)
        }
    };

    if is_last {
        formatted
    } else {
        format!("{} ", formatted)
    }
}

/// Format month as grid of lines: header, weekday names, then one line per week.
pub fn format_month_grid(ctx: &CalContext, month: &Month) -> Vec<String> {
    let mut lines = Vec::with_capacity(MAX_WEEKS_PER_MONTH + 2);

    lines.push(format_month_header(
        month.year_month(),
        MONTH_WIDTH,
        ctx.show_year_in_header,
        ctx.color,
    ));
    lines.push(format_weekday_headers(ctx));

    for week in month.weeks() {
        let last = week.days.len() - 1;
        let line: String = week
            .days
            .iter()
            .enumerate()
            .map(|(i, day)| format_day(ctx, month, day, i == last))
            .collect();
        lines.push(line);
    }

    lines
}

/// Holidays and events of a month, one per line.
pub fn format_listing(month: &Month) -> Vec<String> {
    let strategy = month.holiday_strategy();
    let mut lines: Vec<String> = month
        .days()
        .filter(|day| month.year_month().contains(day.date))
        .filter_map(|day| {
            strategy
                .holiday_name(day.date)
                .map(|name| format!("{}  {}", day.date.format("%Y-%m-%d"), name))
        })
        .collect();
    lines.extend(month.events().iter().map(|event| format!("* {}", event)));
    lines
}

fn print_listing(ctx: &CalContext, months: &[Month]) {
    if !ctx.list {
        return;
    }
    for month in months {
        for line in format_listing(month) {
            println!("{}", line);
        }
    }
}

/// Number of months per row for multi-month layouts.
pub fn months_per_row(ctx: &CalContext) -> u32 {
    match ctx.columns {
        ColumnsMode::Fixed(n) => n,
        ColumnsMode::Auto => {
            // ~20 chars per month + gutter, clamp to 1-3 for readability
            let month_width = MONTH_WIDTH + ctx.gutter_width;
            if let Some(term_width) = get_terminal_width() {
                (term_width / month_width as u32).clamp(1, 3)
            } else {
                3
            }
        }
    }
}

/// Get terminal width using terminal_size crate.
fn get_terminal_width() -> Option<u32> {
    terminal_size::terminal_size().map(|(w, _)| w.0 as u32)
}

/// Print a single month.
pub fn print_month(ctx: &CalContext, year_month: YearMonth) -> Result<(), CalendarError> {
    let month = Month::new(&ctx.grid, year_month, &ctx.events)?;
    for line in format_month_grid(ctx, &month) {
        println!("{}", line);
    }
    print_listing(ctx, std::slice::from_ref(&month));
    Ok(())
}

/// Print multiple months side by side in horizontal layout.
pub fn print_months_side_by_side(ctx: &CalContext, months: &[Month]) {
    let grids: Vec<Vec<String>> = months.iter().map(|m| format_month_grid(ctx, m)).collect();
    let max_height = grids.iter().map(|g| g.len()).max().unwrap_or(0);

    for row in 0..max_height {
        let mut line = String::new();
        for (i, grid) in grids.iter().enumerate() {
            let text = grid.get(row).map(String::as_str).unwrap_or("");
            line.push_str(text);
            // ANSI sequences have no display width, measure the visible part
            let padding = MONTH_WIDTH.saturating_sub(visible_width(text));
            line.push_str(&" ".repeat(padding));
            if i < grids.len() - 1 {
                line.push_str(&" ".repeat(ctx.gutter_width));
            }
        }
        println!("{}", line.trim_end());
    }
}

/// Display width of `text` with ANSI escape sequences removed.
fn visible_width(text: &str) -> usize {
    let mut visible = String::with_capacity(text.len());
    let mut in_escape = false;
    for c in text.chars() {
        match (in_escape, c) {
            (false, '\x1b') => in_escape = true,
            (true, 'm') => in_escape = false,
            (true, _) => {}
            (false, c) => visible.push(c),
        }
    }
    visible.width()
}

/// Build `count` months starting at `start` and print them in rows.
pub fn print_months_from(
    ctx: &CalContext,
    start: YearMonth,
    count: u32,
) -> Result<(), CalendarError> {
    let first = start.index();
    let end = i32::try_from(count)
        .ok()
        .and_then(|count| first.checked_add(count))
        .ok_or_else(|| CalendarError::InvalidArgument(format!("Invalid number of months: {count}")))?;
    tracing::debug!(first, end, "building months");
    let months = build_months(&ctx.grid, first..end, &ctx.events)?;

    let per_row = months_per_row(ctx).max(1) as usize;
    for chunk in months.chunks(per_row) {
        print_months_side_by_side(ctx, chunk);
    }
    print_listing(ctx, &months);
    Ok(())
}

/// Print three months side by side (prev, current, next).
pub fn print_three_months(ctx: &CalContext, year_month: YearMonth) -> Result<(), CalendarError> {
    let mut three_ctx = ctx.clone();
    three_ctx.columns = ColumnsMode::Fixed(3);
    print_months_from(&three_ctx, year_month.previous()?, 3)
}

/// Print all 12 months of a year.
pub fn print_year(ctx: &CalContext, year: i32) -> Result<(), CalendarError> {
    println!("{}", center_text(&year.to_string(), 3 * MONTH_WIDTH + 2 * GUTTER_WIDTH_YEAR));
    println!();

    let mut month_ctx = ctx.clone();
    month_ctx.show_year_in_header = false;
    month_ctx.gutter_width = GUTTER_WIDTH_YEAR;
    month_ctx.columns = ColumnsMode::Fixed(3);

    print_months_from(&month_ctx, YearMonth::new(year, 1)?, 12)
}
