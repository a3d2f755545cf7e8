//! Month grid CLI application.
//!
//! # Usage
//! ```ignore
//! calgrid              // Current month
//! calgrid 2026         // Current month of 2026
//! calgrid 2 2026       // February 2026
//! calgrid 11 2 2026    // February 2026, 11th highlighted
//! calgrid -3           // Three months
//! calgrid -y           // Whole year
//! ```

mod logging;

use calgrid::args::{Args, get_display_date};
use calgrid::error::CalendarError;
use calgrid::formatter::{print_month, print_months_from, print_three_months, print_year};
use calgrid::types::CalContext;

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("calgrid: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), CalendarError> {
    let mut ctx = CalContext::new(args)?;
    let (year_month, day) = get_display_date(args)?;
    if let Some(day) = day {
        ctx.today = day;
    }
    tracing::info!(
        year = year_month.year(),
        month = year_month.month(),
        first_day_of_week = ?ctx.grid.first_day_of_week,
        holidays = ?args.holidays,
        events = ctx.events.len(),
        "rendering"
    );

    // Display mode priority: year > three_months > months_count > single
    if args.year {
        print_year(&ctx, year_month.year())
    } else if args.three_months {
        print_three_months(&ctx, year_month)
    } else if let Some(count) = args.months_count {
        if count == 0 {
            return Err(CalendarError::InvalidArgument(
                "Number of months must be positive".to_string(),
            ));
        }
        print_months_from(&ctx, year_month, count)
    } else {
        print_month(&ctx, year_month)
    }
}
