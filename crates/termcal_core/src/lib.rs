//! Core logic for termcal: month grids, rendering and the dated note store.
//! This crate is the single source of truth for calendar and note invariants.

pub mod calendar;
pub mod command;
pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use calendar::{
    compute_month_grid, render_month, CalendarError, DaySlot, MonthGrid, OutputStyle, StyleToken,
    Theme, YearMonth,
};
pub use command::{resolve_month, run, Command, CommandError, MonthStep};
pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{DateParseError, Note, NoteDate};
pub use repo::note_repo::{InMemoryNoteRepository, JsonNoteRepository, NoteRepository, NoteStore};
pub use repo::{RepoError, RepoResult};
pub use service::note_service::{AddOutcome, DeleteOutcome, NoteService, NoteServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
