//! Monday-first month grid layout.

use super::{CalendarResult, YearMonth};
use chrono::Datelike;

/// One cell of a week row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySlot {
    /// Padding before day 1 or after the last day.
    Empty,
    /// Day of month, 1-based.
    Day(u32),
}

impl DaySlot {
    pub fn day(&self) -> Option<u32> {
        match self {
            Self::Empty => None,
            Self::Day(day) => Some(*day),
        }
    }
}

/// Week rows of a month, Monday..Sunday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: YearMonth,
    pub rows: Vec<[DaySlot; 7]>,
}

impl MonthGrid {
    /// Non-empty days in row-major order.
    pub fn days(&self) -> impl Iterator<Item = u32> + '_ {
        self.rows.iter().flatten().filter_map(DaySlot::day)
    }

    pub fn last_day(&self) -> Option<u32> {
        self.days().last()
    }
}

/// Computes the week-row layout for `year`/`month`.
///
/// # Errors
/// - `CalendarError::InvalidDate` when `month` is outside 1..=12.
pub fn compute_month_grid(year: i32, month: u32) -> CalendarResult<MonthGrid> {
    let month = YearMonth::new(year, month)?;
    Ok(layout(month))
}

pub(crate) fn layout(month: YearMonth) -> MonthGrid {
    let offset = month.first_day().weekday().num_days_from_monday() as usize;
    let last_day = month.days_in_month();

    let mut rows = Vec::with_capacity(6);
    let mut row = [DaySlot::Empty; 7];
    let mut column = offset;
    for day in 1..=last_day {
        row[column] = DaySlot::Day(day);
        column += 1;
        if column == 7 {
            rows.push(row);
            row = [DaySlot::Empty; 7];
            column = 0;
        }
    }
    if column > 0 {
        rows.push(row);
    }

    MonthGrid { month, rows }
}
