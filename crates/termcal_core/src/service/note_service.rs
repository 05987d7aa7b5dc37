//! Note use-case service.
//!
//! # Responsibility
//! - Validate user-supplied dates before any store access.
//! - Run one load and at most one save per operation.
//!
//! # Invariants
//! - Invalid input never triggers a load or a save.
//! - Deleting an absent date is reported as `NotFound`, not an error, and
//!   does not persist.
//! - Listings are sorted by date ascending.

use crate::calendar::YearMonth;
use crate::model::note::{Note, NoteDate};
use crate::repo::note_repo::NoteRepository;
use crate::repo::RepoError;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Date string is not a real `YYYY-MM-DD` calendar date.
    InvalidDateFormat(String),
    /// Note text is the empty string.
    EmptyText,
    /// Persistence-layer failure.
    Store(RepoError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDateFormat(value) => {
                write!(f, "invalid date format `{value}`. Use YYYY-MM-DD.")
            }
            Self::EmptyText => write!(f, "note text cannot be empty"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        Self::Store(value)
    }
}

/// Result of an add/overwrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Created(NoteDate),
    Replaced { date: NoteDate, previous: String },
}

impl AddOutcome {
    pub fn date(&self) -> NoteDate {
        match self {
            Self::Created(date) => *date,
            Self::Replaced { date, .. } => *date,
        }
    }
}

/// Result of a delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted { date: NoteDate, text: String },
    NotFound(NoteDate),
}

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Sets the note for `date`, overwriting any existing one.
    pub fn add_or_update(
        &self,
        date: &str,
        text: impl Into<String>,
    ) -> Result<AddOutcome, NoteServiceError> {
        let date = parse_date(date)?;
        let text = text.into();
        if text.is_empty() {
            return Err(NoteServiceError::EmptyText);
        }

        let mut store = self.repo.load()?;
        let previous = store.insert(date, text);
        self.repo.save(&store)?;

        let outcome = match previous {
            Some(previous) => AddOutcome::Replaced { date, previous },
            None => AddOutcome::Created(date),
        };
        info!(
            "event=note_add module=service status=ok date={} replaced={}",
            date,
            matches!(outcome, AddOutcome::Replaced { .. })
        );
        Ok(outcome)
    }

    /// Removes the note for `date` if present.
    pub fn delete(&self, date: &str) -> Result<DeleteOutcome, NoteServiceError> {
        let date = parse_date(date)?;
        let mut store = self.repo.load()?;

        match store.remove(&date) {
            Some(text) => {
                self.repo.save(&store)?;
                info!("event=note_delete module=service status=ok date={date}");
                Ok(DeleteOutcome::Deleted { date, text })
            }
            None => {
                info!("event=note_delete module=service status=not_found date={date}");
                Ok(DeleteOutcome::NotFound(date))
            }
        }
    }

    pub fn get(&self, date: &str) -> Result<Option<String>, NoteServiceError> {
        let date = parse_date(date)?;
        let store = self.repo.load()?;
        Ok(store.get(&date).map(str::to_string))
    }

    /// All notes, ascending by date.
    pub fn list_all(&self) -> Result<Vec<Note>, NoteServiceError> {
        Ok(self.repo.load()?.entries())
    }

    /// Notes within `month`, ascending by date.
    pub fn filter_by_year_month(&self, month: YearMonth) -> Result<Vec<Note>, NoteServiceError> {
        Ok(self.repo.load()?.in_month(month))
    }
}

fn parse_date(value: &str) -> Result<NoteDate, NoteServiceError> {
    NoteDate::parse(value).map_err(|err| {
        warn!("event=date_parse module=service status=error error={err}");
        NoteServiceError::InvalidDateFormat(value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::{AddOutcome, DeleteOutcome, NoteService, NoteServiceError};
    use crate::repo::note_repo::InMemoryNoteRepository;

    #[test]
    fn invalid_date_never_touches_store() {
        let service = NoteService::new(InMemoryNoteRepository::new());
        let err = service.add_or_update("2025-13-01", "x").unwrap_err();
        assert!(matches!(err, NoteServiceError::InvalidDateFormat(_)));
        assert_eq!(service.repository().save_count(), 0);
        assert!(service.repository().snapshot().is_empty());
    }

    #[test]
    fn empty_text_is_rejected() {
        let service = NoteService::new(InMemoryNoteRepository::new());
        let err = service.add_or_update("2025-03-10", "").unwrap_err();
        assert!(matches!(err, NoteServiceError::EmptyText));
        assert_eq!(service.repository().save_count(), 0);
    }

    #[test]
    fn whitespace_text_is_stored_verbatim() {
        let service = NoteService::new(InMemoryNoteRepository::new());
        let outcome = service.add_or_update("2025-03-10", "   ").unwrap();
        assert!(matches!(outcome, AddOutcome::Created(_)));
        assert_eq!(service.repository().save_count(), 1);
        assert_eq!(service.get("2025-03-10").unwrap().as_deref(), Some("   "));
    }

    #[test]
    fn add_reports_created_then_replaced() {
        let service = NoteService::new(InMemoryNoteRepository::new());
        let first = service.add_or_update("2025-03-10", "dentist").unwrap();
        assert!(matches!(first, AddOutcome::Created(_)));

        let second = service.add_or_update("2025-03-10", "doctor").unwrap();
        assert_eq!(
            second,
            AddOutcome::Replaced {
                date: first.date(),
                previous: "dentist".to_string(),
            }
        );
        assert_eq!(
            service.get("2025-03-10").unwrap().as_deref(),
            Some("doctor")
        );
    }

    #[test]
    fn deleting_absent_note_does_not_save() {
        let service = NoteService::new(InMemoryNoteRepository::new());
        for _ in 0..2 {
            let outcome = service.delete("2025-03-10").unwrap();
            assert!(matches!(outcome, DeleteOutcome::NotFound(_)));
        }
        assert_eq!(service.repository().save_count(), 0);
    }
}
