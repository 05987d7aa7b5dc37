//! Domain model for dated notes.
//!
//! # Responsibility
//! - Define the canonical date key and note record used by store and renderer.
//! - Own date-string validation so every layer shares one parsing rule.
//!
//! # Invariants
//! - A `NoteDate` always holds a real proleptic Gregorian calendar day.
//! - The canonical `YYYY-MM-DD` form is both storage key and sort key.

pub mod note;
