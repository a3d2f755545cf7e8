//! Month grid builder with pluggable holiday calendars.
//!
//! Features:
//! - Weeks starting on Sunday or Monday, padded with adjacent-month days
//! - Japanese national holidays, substitute and sandwiched days included
//! - Recurring events matched by month and day, wrapping across year end
//! - Paging by linear month index

pub mod args;
pub mod calendar;
pub mod error;
pub mod event;
pub mod formatter;
pub mod holiday;
pub mod types;
