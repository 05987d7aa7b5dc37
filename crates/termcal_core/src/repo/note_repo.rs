//! Note store snapshot, repository contract and JSON file implementation.
//!
//! # Responsibility
//! - Hold the date-keyed note mapping in memory (`NoteStore`).
//! - Load and save the mapping as one pretty-printed JSON object.
//!
//! # Invariants
//! - Keys are canonical `YYYY-MM-DD` strings; their byte order is date order,
//!   so `BTreeMap` iteration is chronological.
//! - `load` lazily creates a missing file as `{}`.
//! - `save` overwrites the whole file; there is no append log.

use super::{RepoError, RepoResult};
use crate::calendar::YearMonth;
use crate::model::note::{Note, NoteDate};
use log::{error, info};
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// In-memory note mapping, ordered by date key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NoteStore {
    entries: BTreeMap<String, String>,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON snapshot, rejecting non-object shapes and invalid keys.
    pub fn from_json(raw: &str) -> Result<Self, String> {
        let entries: BTreeMap<String, String> =
            serde_json::from_str(raw).map_err(|err| err.to_string())?;

        for key in entries.keys() {
            let date = NoteDate::parse(key).map_err(|err| err.to_string())?;
            if date.key() != *key {
                return Err(format!("non-canonical date key `{key}`"));
            }
        }

        Ok(Self { entries })
    }

    pub fn to_json(&self) -> RepoResult<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, date: &NoteDate) -> Option<&str> {
        self.entries.get(&date.key()).map(String::as_str)
    }

    /// Sets the note for `date`, returning the replaced text if any.
    pub fn insert(&mut self, date: NoteDate, text: impl Into<String>) -> Option<String> {
        self.entries.insert(date.key(), text.into())
    }

    pub fn remove(&mut self, date: &NoteDate) -> Option<String> {
        self.entries.remove(&date.key())
    }

    /// All notes, ascending by date.
    pub fn entries(&self) -> Vec<Note> {
        self.entries
            .iter()
            .filter_map(|(key, text)| to_note(key, text))
            .collect()
    }

    /// Notes whose date falls in `month`, ascending by date.
    pub fn in_month(&self, month: YearMonth) -> Vec<Note> {
        let prefix = format!("{:04}-{:02}-", month.year(), month.month());
        self.entries
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .filter_map(|(key, text)| to_note(key, text))
            .collect()
    }
}

fn to_note(key: &str, text: &str) -> Option<Note> {
    NoteDate::parse(key).ok().map(|date| Note::new(date, text))
}

/// Persistence contract for the whole-snapshot note store.
pub trait NoteRepository {
    /// Reads the full mapping, creating an empty one if absent.
    fn load(&self) -> RepoResult<NoteStore>;
    /// Replaces the persisted mapping with `store`.
    fn save(&self, store: &NoteStore) -> RepoResult<()>;
}

/// Note repository backed by one JSON file.
#[derive(Debug, Clone)]
pub struct JsonNoteRepository {
    path: PathBuf,
}

impl JsonNoteRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> RepoError {
        RepoError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn write_snapshot(&self, store: &NoteStore) -> RepoResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| RepoError::Io {
                    path: parent.to_path_buf(),
                    source: err,
                })?;
            }
        }
        let json = store.to_json()?;
        fs::write(&self.path, json).map_err(|err| self.io_error(err))
    }
}

impl NoteRepository for JsonNoteRepository {
    fn load(&self) -> RepoResult<NoteStore> {
        let started_at = Instant::now();

        if !self.path.exists() {
            let store = NoteStore::new();
            if let Err(err) = self.write_snapshot(&store) {
                error!(
                    "event=store_load module=repo status=error mode=create duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err);
            }
            info!(
                "event=store_load module=repo status=ok mode=create path={} duration_ms={}",
                self.path.display(),
                started_at.elapsed().as_millis()
            );
            return Ok(store);
        }

        let raw = fs::read_to_string(&self.path).map_err(|err| self.io_error(err))?;
        match NoteStore::from_json(&raw) {
            Ok(store) => {
                info!(
                    "event=store_load module=repo status=ok mode=read entries={} duration_ms={}",
                    store.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(store)
            }
            Err(reason) => {
                error!(
                    "event=store_load module=repo status=error error_code=store_corrupt path={} duration_ms={}",
                    self.path.display(),
                    started_at.elapsed().as_millis()
                );
                Err(RepoError::Corrupt {
                    path: self.path.clone(),
                    reason,
                })
            }
        }
    }

    fn save(&self, store: &NoteStore) -> RepoResult<()> {
        let started_at = Instant::now();
        match self.write_snapshot(store) {
            Ok(()) => {
                info!(
                    "event=store_save module=repo status=ok entries={} duration_ms={}",
                    store.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_save module=repo status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}

/// Process-local repository with no filesystem access.
///
/// Counts saves so callers can assert that read-only paths never persist.
#[derive(Debug, Default)]
pub struct InMemoryNoteRepository {
    store: RefCell<NoteStore>,
    saves: Cell<usize>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: NoteStore) -> Self {
        Self {
            store: RefCell::new(store),
            saves: Cell::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    pub fn snapshot(&self) -> NoteStore {
        self.store.borrow().clone()
    }
}

impl NoteRepository for InMemoryNoteRepository {
    fn load(&self) -> RepoResult<NoteStore> {
        Ok(self.store.borrow().clone())
    }

    fn save(&self, store: &NoteStore) -> RepoResult<()> {
        *self.store.borrow_mut() = store.clone();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
