use serde::*;

use crate::error::EditError;

/// Time of night as signed decimal hours relative to local midnight.
///
/// Negative values are before midnight (−5.0 = 19:00 local), positive values
/// after. The usable domain for a night is configured (default [−5.0, +7.5])
/// and twilight boundaries are expressed on the same axis.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct NightHour(qtty::Hours);

impl NightHour {
    /// Create a new night-hour value.
    pub fn new<V: Into<qtty::Hours>>(v: V) -> Self {
        Self(v.into())
    }

    /// Raw value as f64 decimal hours.
    pub fn value(&self) -> f64 {
        self.0.value()
    }

    /// Underlying quantity.
    pub fn hours(&self) -> qtty::Hours {
        self.0
    }

    /// Format as zero-padded 24-hour wall-clock `HH:MM`.
    ///
    /// Hours wrap into [0, 24): −5.0 formats as `19:00`. Minutes are rounded
    /// to the nearest whole minute, carrying into the hour when they round up
    /// to 60.
    pub fn format_hhmm(&self) -> String {
        let mut hours = self.value().floor() as i64;
        let mut minutes = ((self.value() - self.value().floor()) * 60.0).round() as i64;
        if minutes == 60 {
            hours += 1;
            minutes = 0;
        }
        hours = hours.rem_euclid(24);
        format!("{:02}:{:02}", hours, minutes)
    }

    /// Parse zero-padded 24-hour wall-clock `HH:MM` back onto the night axis.
    ///
    /// Wall-clock hours of 12 and later are taken as before-midnight times
    /// (h − 24), so `19:00` parses to −5.0. This matches the display
    /// convention: the night domain never reaches noon on either side.
    pub fn parse_hhmm(text: &str) -> Result<Self, EditError> {
        let invalid = || EditError::InvalidTimeText(text.to_string());

        let (h_str, m_str) = text.split_once(':').ok_or_else(invalid)?;
        if h_str.len() != 2 || m_str.len() != 2 {
            return Err(invalid());
        }
        let hours: i64 = h_str.parse().map_err(|_| invalid())?;
        let minutes: i64 = m_str.parse().map_err(|_| invalid())?;
        if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
            return Err(invalid());
        }

        let wall = hours as f64 + minutes as f64 / 60.0;
        let value = if hours >= 12 { wall - 24.0 } else { wall };
        Ok(Self::new(value))
    }
}

impl From<f64> for NightHour {
    fn from(v: f64) -> Self {
        NightHour::new(v)
    }
}

impl std::fmt::Display for NightHour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format_hhmm())
    }
}

/// Format a duration in decimal hours as `HH:MM`.
pub fn format_duration_hhmm(hours: qtty::Hours) -> String {
    NightHour::new(hours.value().max(0.0)).format_hhmm()
}
