//! Public data types for the editor core.
//!
//! This file consolidates the record types matching the three input JSON
//! documents (twilight, moon, observation) together with the session-level
//! wrappers the editor works with. All record types derive
//! Serialize/Deserialize for JSON round-tripping.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{NightHour, NightInterval};

/// Stable surrogate identifier for an observation within a session.
///
/// Assigned by the editor when records are loaded or created; never
/// serialized, so cloning across the import/export boundary cannot confuse
/// identity-based lookups.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObservationId(pub u64);

/// Identifier for a derived available block.
///
/// Available blocks are fully recomputed after every mutation, so these ids
/// are only stable between recomputations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AvailableBlockId(pub u64);

impl ObservationId {
    pub fn new(value: u64) -> Self {
        ObservationId(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl AvailableBlockId {
    pub fn new(value: u64) -> Self {
        AvailableBlockId(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ObservationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for AvailableBlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Twilight boundary times for one night.
///
/// All times are signed decimal hours relative to local midnight and are
/// monotonically increasing: sunset < evening_6deg < … < morning_6deg <
/// sunrise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwilightRecord {
    pub date: NaiveDate,
    pub sunset: NightHour,
    pub evening_6deg: NightHour,
    pub evening_12deg: NightHour,
    pub evening_18deg: NightHour,
    pub morning_18deg: NightHour,
    pub morning_12deg: NightHour,
    pub morning_6deg: NightHour,
    pub sunrise: NightHour,
}

impl TwilightRecord {
    /// The eight boundaries in evening-to-morning order.
    pub fn boundaries(&self) -> [NightHour; 8] {
        [
            self.sunset,
            self.evening_6deg,
            self.evening_12deg,
            self.evening_18deg,
            self.morning_18deg,
            self.morning_12deg,
            self.morning_6deg,
            self.sunrise,
        ]
    }
}

/// Moon illumination and above-horizon intervals for one night.
///
/// Consumed by the rendering collaborator for moon shading and by tooltip
/// text; the editor itself never schedules against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoonRecord {
    pub date: NaiveDate,
    /// Fractional illumination, 0..1.
    pub illumination: f64,
    #[serde(default)]
    pub moonintervals: Vec<[NightHour; 2]>,
}

/// One scheduled observation as stored in `observation.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub date: NaiveDate,
    pub start_time: NightHour,
    pub end_time: NightHour,
    /// Observation category (drives color and tooltip text).
    #[serde(alias = "obstype")]
    pub category: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub tooltip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Filter identifiers, a cardinality-limited subset of a fixed alphabet.
    #[serde(default)]
    pub filters: Vec<String>,
}

impl ObservationRecord {
    /// The record's time extent as an interval, if well-formed.
    pub fn interval(&self) -> Option<NightInterval> {
        NightInterval::new(self.date, self.start_time, self.end_time)
    }

    /// Duration in hours.
    pub fn duration(&self) -> qtty::Hours {
        qtty::Hours::new(self.end_time.value() - self.start_time.value())
    }
}

/// A session observation: a record plus its stable surrogate id.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub id: ObservationId,
    pub record: ObservationRecord,
}

impl Observation {
    /// Time extent of the observation.
    ///
    /// Records are validated on entry, so a well-formed session never holds
    /// an observation without a valid interval.
    pub fn interval(&self) -> Option<NightInterval> {
        self.record.interval()
    }
}

/// A derived unscheduled time block. Ephemeral: recomputed after every
/// mutation and never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvailableBlock {
    pub id: AvailableBlockId,
    pub interval: NightInterval,
}
