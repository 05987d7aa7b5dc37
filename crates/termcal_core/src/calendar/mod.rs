//! Month grid computation and text rendering.
//!
//! # Responsibility
//! - Compute Monday-first week rows for a Gregorian month.
//! - Render a month grid, its notes and the today marker through a `Theme`.
//!
//! # Invariants
//! - Every grid row has exactly 7 slots.
//! - The today marker is derived from the caller-provided date, never stored.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod grid;
pub mod month;
pub mod render;
pub mod theme;

pub use grid::{compute_month_grid, DaySlot, MonthGrid};
pub use month::YearMonth;
pub use render::render_month;
pub use theme::{OutputStyle, StyleToken, Theme};

pub type CalendarResult<T> = Result<T, CalendarError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// Month outside 1..=12, or a year chrono cannot represent.
    InvalidDate { year: i32, month: u32 },
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate { year, month } => {
                write!(f, "invalid month {month} for year {year}; expected 1-12")
            }
        }
    }
}

impl Error for CalendarError {}
