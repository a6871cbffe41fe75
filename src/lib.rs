//! # nightlog
//!
//! Core engine for an interactive night-by-night observing-schedule editor.
//!
//! The editor renders a timeline of telescope twilight and moon conditions
//! and lets an operator place, edit, move, and delete observation blocks
//! inside the available time windows, then round-trip the result as JSON.
//! This crate is the non-rendering half of that tool:
//!
//! - **Interval model**: half-open single-night intervals and the
//!   subtraction operation availability derivation is built on.
//! - **Availability engine**: the seven twilight segments per night, minus
//!   every observation, fully recomputed after each mutation.
//! - **Selection state**: click, shift-click, lasso, and keyboard selection
//!   over observations and available blocks.
//! - **Interaction controller**: [`controller::Editor`] owns the data and
//!   turns pointer/keyboard events into selection changes and mutations.
//! - **Edit-form binder**: snapshot/write-back contract for the external
//!   form surface.
//!
//! The rendering surface, date/time picker widgets, and the file dialogs
//! are external collaborators: they supply pixel geometry through the
//! [`controller::layout::Layout`] trait and consume redraw notifications via
//! the editor's revision counter.
//!
//! ## Architecture
//!
//! - [`api`]: record types for the three input JSON documents plus session
//!   wrappers and surrogate ids
//! - [`config`]: the editor's constants (date range, night domain,
//!   categories, filter alphabet), TOML-loadable
//! - [`models`]: night-hour times and single-night intervals
//! - [`services`]: availability derivation, navigation helpers, document
//!   loading and import/export
//! - [`selection`] and [`controller`]: selection state and the event-driven
//!   editor session
//! - [`form`]: edit-form snapshot and write-back types

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod models;
pub mod selection;
pub mod services;

pub use config::EditorConfig;
pub use controller::Editor;
pub use error::EditError;
pub use selection::Selection;
