//! Core value types: night-hour times and single-night intervals.

pub mod interval;
pub mod time;

pub use interval::NightInterval;
pub use time::{format_duration_hhmm, NightHour};
