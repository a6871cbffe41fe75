//! Editor configuration.
//!
//! Gathers the constants the original tool hard-coded (supported date range,
//! night time domain, color-category list, filter alphabet) into one
//! TOML-loadable structure. Dates in the TOML file must be quoted ISO
//! strings, e.g. `date_start = "2024-10-01"`.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::EditError;
use crate::models::NightHour;

/// Configuration for an editor session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// First supported calendar date (inclusive).
    pub date_start: NaiveDate,
    /// Last supported calendar date (exclusive).
    pub date_end: NaiveDate,
    /// Earliest displayable time of night, decimal hours.
    pub time_min: f64,
    /// Latest displayable time of night, decimal hours.
    pub time_max: f64,
    /// Duration given to a newly added observation, hours.
    pub default_duration_hours: f64,
    /// Fixed step for start/end time nudging, hours.
    pub nudge_step_hours: f64,
    /// Pointer travel below this many pixels resolves as a click, not a lasso.
    pub lasso_threshold_px: f32,
    /// Known observation categories, in legend order.
    pub categories: Vec<String>,
    /// Category assigned to a newly added observation.
    pub default_category: String,
    /// Label assigned to a newly added observation.
    pub default_label: String,
    /// The fixed ordered filter alphabet.
    pub filter_alphabet: Vec<String>,
    /// Maximum number of filters per observation.
    pub max_filters: usize,
    /// Filter set assigned to a newly added observation.
    pub default_filters: Vec<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            date_start: NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
            date_end: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            time_min: -5.0,
            time_max: 7.5,
            default_duration_hours: 1.0,
            nudge_step_hours: 0.25,
            lasso_threshold_px: 5.0,
            categories: [
                "Calibration",
                "Prep",
                "AOS transient",
                "AOS data",
                "IQ",
                "Science",
            ]
            .map(String::from)
            .to_vec(),
            default_category: "Science".to_string(),
            default_label: "new".to_string(),
            filter_alphabet: ["u", "g", "r", "i", "z", "y"].map(String::from).to_vec(),
            max_filters: 3,
            default_filters: vec!["r".to_string()],
        }
    }
}

impl EditorConfig {
    /// Parse configuration from a TOML string, filling omitted fields with
    /// defaults.
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let config: EditorConfig = toml::from_str(text)?;
        Ok(config)
    }

    /// Whether a date falls inside the supported range `[date_start, date_end)`.
    pub fn in_date_range(&self, date: NaiveDate) -> bool {
        self.date_start <= date && date < self.date_end
    }

    /// Whether a time lies inside the night time domain.
    pub fn in_time_domain(&self, t: NightHour) -> bool {
        self.time_min <= t.value() && t.value() <= self.time_max
    }

    /// The previous calendar date, if still inside the supported range.
    pub fn previous_date(&self, date: NaiveDate) -> Option<NaiveDate> {
        let prev = date.checked_sub_days(Days::new(1))?;
        self.in_date_range(prev).then_some(prev)
    }

    /// The next calendar date, if still inside the supported range.
    pub fn next_date(&self, date: NaiveDate) -> Option<NaiveDate> {
        let next = date.checked_add_days(Days::new(1))?;
        self.in_date_range(next).then_some(next)
    }

    /// Validate a filter set against the alphabet and cardinality limit.
    pub fn validate_filters(&self, filters: &[String]) -> Result<(), EditError> {
        if filters.len() > self.max_filters {
            return Err(EditError::TooManyFilters {
                max: self.max_filters,
            });
        }
        for filter in filters {
            if !self.filter_alphabet.contains(filter) {
                return Err(EditError::UnknownFilter(filter.clone()));
            }
        }
        Ok(())
    }

    /// Validate an observation category against the known list.
    pub fn validate_category(&self, category: &str) -> Result<(), EditError> {
        if self.categories.iter().any(|c| c == category) {
            Ok(())
        } else {
            Err(EditError::UnknownCategory(category.to_string()))
        }
    }
}
