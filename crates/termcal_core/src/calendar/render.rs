//! Text rendering of a month grid with notes and today marker.

use super::{DaySlot, MonthGrid, Theme};
use crate::model::note::Note;
use chrono::{Datelike, NaiveDate};
use log::debug;
use std::fmt::Write;

const WEEKDAY_HEADER: &str = "Mo Tu We Th Fr Sa Su";
const EMPTY_SLOT: &str = "  ";

/// Renders `grid` as display text.
///
/// `notes` may contain dates outside the displayed month; only matching ones
/// are listed, sorted by date. `today` drives the today marker and the
/// trailing `Today:` line, both emitted only when it falls in the grid's month.
pub fn render_month(grid: &MonthGrid, notes: &[Note], today: NaiveDate, theme: &Theme) -> String {
    let month = grid.month;
    let today_day = month.contains(today).then(|| today.day());

    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "     {} {}", month.name(), month.year());
    let _ = writeln!(out, "{WEEKDAY_HEADER}");

    for row in &grid.rows {
        let cells = row
            .iter()
            .map(|slot| match slot {
                DaySlot::Empty => EMPTY_SLOT.to_string(),
                DaySlot::Day(day) if Some(*day) == today_day => {
                    theme.today.apply(&format!("{day:02}"))
                }
                DaySlot::Day(day) => format!("{day:02}"),
            })
            .collect::<Vec<_>>();
        let _ = writeln!(out, "{}", cells.join(" ").trim_end());
    }

    let mut shown = notes
        .iter()
        .filter(|note| month.contains(note.date.naive()))
        .collect::<Vec<_>>();
    shown.sort_by_key(|note| note.date);

    if !shown.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", theme.heading.apply("Notes:"));
        for note in &shown {
            let _ = writeln!(out, "{:02}: {}", note.date.day(), theme.text(&note.text));
        }
    }

    if let Some(day) = today_day {
        let _ = writeln!(out);
        let label = format!("{day} {} {}", month.name(), month.year());
        let _ = writeln!(out, "Today: {}", theme.today_line.apply(&label));
    }

    debug!(
        "event=calendar_render module=calendar status=ok year={} month={} rows={} notes={} today_shown={}",
        month.year(),
        month.month(),
        grid.rows.len(),
        shown.len(),
        today_day.is_some()
    );

    out
}
