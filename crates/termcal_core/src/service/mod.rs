//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate the note store load/modify/save cycle.
//! - Keep the CLI decoupled from storage details.

pub mod note_service;
