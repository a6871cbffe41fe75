//! Edit-form binding.
//!
//! The external form surface is a fixed set of named fields plus two
//! affordances (visible, enabled). On every selection change the host pulls
//! a [`FormSnapshot`] and pushes it into its widgets; on every field input
//! it sends a [`FormEdit`] through [`Editor::apply_edit`], which writes the
//! value back immediately (no explicit save step) or rejects it, keeping the
//! previous value.
//!
//! Contract: the form is visible and writable only for exactly one selected
//! observation; visible but read-only for exactly one selected available
//! block (times shown, type/filters/notes empty); hidden otherwise — no
//! batch editing for larger selections.

use crate::controller::Editor;
use crate::models::format_duration_hhmm;

/// A single field write coming back from the form surface.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEdit {
    /// ISO `YYYY-MM-DD`.
    Date(String),
    /// Zero-padded 24-hour `HH:MM`.
    StartTime(String),
    /// Zero-padded 24-hour `HH:MM`.
    EndTime(String),
    Category(String),
    Label(String),
    Notes(String),
    Filters(Vec<String>),
}

/// What the form surface should display.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormSnapshot {
    pub visible: bool,
    pub enabled: bool,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    /// Derived, display-only.
    pub duration: String,
    pub category: String,
    pub label: String,
    pub notes: String,
    pub filters: Vec<String>,
}

impl FormSnapshot {
    fn hidden() -> Self {
        FormSnapshot::default()
    }
}

/// Build the snapshot for the editor's current selection.
pub fn snapshot(editor: &Editor) -> FormSnapshot {
    if let Some(id) = editor.selection().single_observation() {
        let Some(obs) = editor.observation(id) else {
            return FormSnapshot::hidden();
        };
        let record = &obs.record;
        return FormSnapshot {
            visible: true,
            enabled: true,
            date: record.date.to_string(),
            start_time: record.start_time.format_hhmm(),
            end_time: record.end_time.format_hhmm(),
            duration: format_duration_hhmm(record.duration()),
            category: record.category.clone(),
            label: record.label.clone(),
            notes: record.notes.clone().unwrap_or_default(),
            filters: record.filters.clone(),
        };
    }

    if let Some(id) = editor.selection().single_available() {
        let Some(block) = editor.available_block(id) else {
            return FormSnapshot::hidden();
        };
        let interval = &block.interval;
        return FormSnapshot {
            visible: true,
            enabled: false,
            date: interval.date.to_string(),
            start_time: interval.start.format_hhmm(),
            end_time: interval.end.format_hhmm(),
            duration: format_duration_hhmm(interval.duration()),
            category: String::new(),
            label: String::new(),
            notes: String::new(),
            filters: Vec::new(),
        };
    }

    FormSnapshot::hidden()
}
