//! Command dispatch shared by front-ends.
//!
//! # Responsibility
//! - Resolve which month to display from optional year/month and a step.
//! - Execute exactly one command against a note service, writing
//!   user-facing output to the provided writer.
//!
//! # Invariants
//! - Mutating commands never render a calendar.
//! - A failing command writes no success message.

use crate::calendar::{grid, render_month, CalendarError, Theme, YearMonth};
use crate::repo::note_repo::NoteRepository;
use crate::service::note_service::{AddOutcome, DeleteOutcome, NoteService, NoteServiceError};
use chrono::NaiveDate;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, Write};

/// Relative navigation applied after the base month is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthStep {
    #[default]
    Stay,
    Next,
    Prev,
}

/// One action per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show(YearMonth),
    Add { date: String, text: String },
    Delete { date: String },
    List,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Show(_) => "show",
            Self::Add { .. } => "add",
            Self::Delete { .. } => "delete",
            Self::List => "list",
        }
    }
}

#[derive(Debug)]
pub enum CommandError {
    Calendar(CalendarError),
    Note(NoteServiceError),
    Output(io::Error),
}

impl CommandError {
    /// Whether the failure stems from user input rather than the environment.
    pub fn is_user_error(&self) -> bool {
        match self {
            Self::Calendar(_) => true,
            Self::Note(NoteServiceError::InvalidDateFormat(_) | NoteServiceError::EmptyText) => {
                true
            }
            Self::Note(NoteServiceError::Store(_)) | Self::Output(_) => false,
        }
    }
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Calendar(err) => write!(f, "{err}"),
            Self::Note(err) => write!(f, "{err}"),
            Self::Output(err) => write!(f, "failed to write output: {err}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Calendar(err) => Some(err),
            Self::Note(err) => Some(err),
            Self::Output(err) => Some(err),
        }
    }
}

impl From<CalendarError> for CommandError {
    fn from(value: CalendarError) -> Self {
        Self::Calendar(value)
    }
}

impl From<NoteServiceError> for CommandError {
    fn from(value: NoteServiceError) -> Self {
        Self::Note(value)
    }
}

impl From<io::Error> for CommandError {
    fn from(value: io::Error) -> Self {
        Self::Output(value)
    }
}

/// Picks the month to show: explicit parts override today's, then `step`.
pub fn resolve_month(
    year: Option<i32>,
    month: Option<u32>,
    step: MonthStep,
    today: NaiveDate,
) -> Result<YearMonth, CalendarError> {
    let current = YearMonth::from_date(today);
    let base = YearMonth::new(
        year.unwrap_or(current.year()),
        month.unwrap_or(current.month()),
    )?;

    match step {
        MonthStep::Stay => Ok(base),
        MonthStep::Next => base.next(),
        MonthStep::Prev => base.prev(),
    }
}

/// Executes `command`, writing its output to `out`.
pub fn run<R, W>(
    command: &Command,
    service: &NoteService<R>,
    today: NaiveDate,
    theme: &Theme,
    out: &mut W,
) -> Result<(), CommandError>
where
    R: NoteRepository,
    W: Write,
{
    info!(
        "event=cli_dispatch module=command status=start command={}",
        command.name()
    );

    match command {
        Command::Add { date, text } => match service.add_or_update(date, text.as_str())? {
            AddOutcome::Created(date) => {
                writeln!(out, "Note added on {date}: {}", theme.text(text))?
            }
            AddOutcome::Replaced { date, .. } => {
                writeln!(out, "Note updated on {date}: {}", theme.text(text))?
            }
        },
        Command::Delete { date } => match service.delete(date)? {
            DeleteOutcome::Deleted { date, .. } => writeln!(out, "Note deleted for {date}.")?,
            DeleteOutcome::NotFound(date) => writeln!(out, "No note found for {date}.")?,
        },
        Command::List => {
            let notes = service.list_all()?;
            if notes.is_empty() {
                writeln!(out, "No notes found.")?;
            } else {
                writeln!(out, "{}", theme.heading.apply("All notes:"))?;
                for note in &notes {
                    writeln!(out, "{}: {}", note.date, theme.text(&note.text))?;
                }
            }
        }
        Command::Show(month) => {
            let grid = grid::layout(*month);
            let notes = service.filter_by_year_month(*month)?;
            write!(out, "{}", render_month(&grid, &notes, today, theme))?;
        }
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{resolve_month, run, Command, CommandError, MonthStep};
    use crate::calendar::{CalendarError, Theme, YearMonth};
    use crate::repo::note_repo::{InMemoryNoteRepository, JsonNoteRepository};
    use crate::repo::RepoError;
    use crate::service::note_service::{NoteService, NoteServiceError};
    use chrono::NaiveDate;
    use std::fs;
    use std::io;
    use std::path::PathBuf;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn exec(service: &NoteService<InMemoryNoteRepository>, command: Command) -> String {
        let mut out = Vec::new();
        run(&command, service, today(), &Theme::plain(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn resolve_month_defaults_to_today_and_steps() {
        let current = resolve_month(None, None, MonthStep::Stay, today()).unwrap();
        assert_eq!(current, YearMonth::new(2025, 3).unwrap());

        let next = resolve_month(Some(2025), Some(12), MonthStep::Next, today()).unwrap();
        assert_eq!(next, YearMonth::new(2026, 1).unwrap());

        let prev = resolve_month(Some(2025), Some(1), MonthStep::Prev, today()).unwrap();
        assert_eq!(prev, YearMonth::new(2024, 12).unwrap());

        let only_month = resolve_month(None, Some(7), MonthStep::Stay, today()).unwrap();
        assert_eq!(only_month, YearMonth::new(2025, 7).unwrap());
    }

    #[test]
    fn resolve_month_rejects_invalid_month() {
        assert!(resolve_month(Some(2025), Some(13), MonthStep::Next, today()).is_err());
    }

    #[test]
    fn add_delete_list_messages() {
        let service = NoteService::new(InMemoryNoteRepository::new());

        assert_eq!(exec(&service, Command::List), "No notes found.\n");
        assert_eq!(
            exec(
                &service,
                Command::Add {
                    date: "2025-03-10".into(),
                    text: "dentist".into()
                }
            ),
            "Note added on 2025-03-10: dentist\n"
        );
        assert_eq!(
            exec(
                &service,
                Command::Add {
                    date: "2025-03-10".into(),
                    text: "doctor".into()
                }
            ),
            "Note updated on 2025-03-10: doctor\n"
        );
        assert_eq!(
            exec(&service, Command::List),
            "All notes:\n2025-03-10: doctor\n"
        );
        assert_eq!(
            exec(
                &service,
                Command::Delete {
                    date: "2025-03-10".into()
                }
            ),
            "Note deleted for 2025-03-10.\n"
        );
        assert_eq!(
            exec(
                &service,
                Command::Delete {
                    date: "2025-03-10".into()
                }
            ),
            "No note found for 2025-03-10.\n"
        );
    }

    #[test]
    fn show_renders_month_with_notes() {
        let service = NoteService::new(InMemoryNoteRepository::new());
        service.add_or_update("2025-03-01", "start").unwrap();
        service.add_or_update("2025-04-01", "april").unwrap();

        let text = exec(&service, Command::Show(YearMonth::new(2025, 3).unwrap()));
        assert!(text.contains("     March 2025"));
        assert!(text.contains("01: start"));
        assert!(!text.contains("april"));
        assert!(text.contains("Today: 10 March 2025"));
    }

    #[test]
    fn invalid_date_is_a_user_error_without_output() {
        let service = NoteService::new(InMemoryNoteRepository::new());
        let mut out = Vec::new();
        let err = run(
            &Command::Delete {
                date: "2025-02-30".into(),
            },
            &service,
            today(),
            &Theme::plain(),
            &mut out,
        )
        .unwrap_err();
        assert!(err.is_user_error());
        assert!(matches!(err, CommandError::Note(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn add_echo_escapes_text_for_html() {
        let service = NoteService::new(InMemoryNoteRepository::new());
        let mut out = Vec::new();
        run(
            &Command::Add {
                date: "2025-03-10".into(),
                text: "<b>".into(),
            },
            &service,
            today(),
            &Theme::html(),
            &mut out,
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Note added on 2025-03-10: &lt;b&gt;\n"
        );
        assert_eq!(service.get("2025-03-10").unwrap().as_deref(), Some("<b>"));
    }

    #[test]
    fn input_errors_are_user_errors_and_environment_errors_are_not() {
        let bad_month = CalendarError::InvalidDate {
            year: 2025,
            month: 13,
        };
        assert!(CommandError::Calendar(bad_month).is_user_error());
        assert!(
            CommandError::Note(NoteServiceError::InvalidDateFormat("x".into())).is_user_error()
        );
        assert!(CommandError::Note(NoteServiceError::EmptyText).is_user_error());

        let corrupt = CommandError::Note(NoteServiceError::Store(RepoError::Corrupt {
            path: PathBuf::from("notes.json"),
            reason: "expected value".into(),
        }));
        assert!(!corrupt.is_user_error());
        assert!(!CommandError::Output(io::Error::other("broken pipe")).is_user_error());
    }

    #[test]
    fn corrupt_store_is_not_a_user_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        fs::write(&path, "{not json").unwrap();

        let service = NoteService::new(JsonNoteRepository::new(&path));
        let mut out = Vec::new();
        let err = run(&Command::List, &service, today(), &Theme::plain(), &mut out).unwrap_err();
        assert!(matches!(
            err,
            CommandError::Note(NoteServiceError::Store(RepoError::Corrupt { .. }))
        ));
        assert!(!err.is_user_error());
        assert!(out.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{not json");
    }
}
