//! Half-open time intervals within a single night.
//!
//! `NightInterval` is the base shape shared by observations and available
//! blocks: a calendar date plus a start/end pair on the night-hour axis.
//! The subtraction operation here is the heart of the availability engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::time::NightHour;

/// A time interval `[start, end)` within one night, with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NightInterval {
    pub date: NaiveDate,
    pub start: NightHour,
    pub end: NightHour,
}

impl NightInterval {
    /// Create an interval, rejecting degenerate or inverted bounds.
    pub fn new(date: NaiveDate, start: NightHour, end: NightHour) -> Option<Self> {
        if start.value() < end.value() {
            Some(Self { date, start, end })
        } else {
            None
        }
    }

    /// Length of the interval.
    pub fn duration(&self) -> qtty::Hours {
        qtty::Hours::new(self.end.value() - self.start.value())
    }

    /// Temporal midpoint, used for lasso centers and arrow-key navigation.
    pub fn midpoint(&self) -> NightHour {
        NightHour::new((self.start.value() + self.end.value()) / 2.0)
    }

    /// Check if this interval overlaps another on the same night.
    ///
    /// Intervals that only touch at a boundary do not overlap; intervals on
    /// different nights never overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.date == other.date
            && self.start.value() < other.end.value()
            && other.start.value() < self.end.value()
    }

    /// Subtract `other` from this interval, yielding 0, 1, or 2 remainders.
    ///
    /// Cases, by how `other` relates to `self`:
    /// 1. `other` covers `self` entirely: nothing remains.
    /// 2. `other` overlaps only the start: one remainder `[other.end, self.end)`.
    /// 3. `other` overlaps only the end: one remainder `[self.start, other.start)`.
    /// 4. `other` lies strictly inside: two remainders around it.
    /// 5. No overlap (or different night): `self` unchanged.
    ///
    /// Boundary-touching on a shared edge counts as covering/truncating, and
    /// degenerate remainders are dropped by the `NightInterval::new` guard.
    pub fn subtract(&self, other: &Self) -> Vec<NightInterval> {
        if !self.overlaps(other) {
            return vec![*self];
        }

        let covers_start = other.start.value() <= self.start.value();
        let covers_end = other.end.value() >= self.end.value();

        match (covers_start, covers_end) {
            (true, true) => Vec::new(),
            (true, false) => NightInterval::new(self.date, other.end, self.end)
                .into_iter()
                .collect(),
            (false, true) => NightInterval::new(self.date, self.start, other.start)
                .into_iter()
                .collect(),
            (false, false) => {
                let mut out = Vec::with_capacity(2);
                out.extend(NightInterval::new(self.date, self.start, other.start));
                out.extend(NightInterval::new(self.date, other.end, self.end));
                out
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 5).unwrap()
    }

    fn interval(start: f64, end: f64) -> NightInterval {
        NightInterval::new(date(), NightHour::new(start), NightHour::new(end)).unwrap()
    }

    fn bounds(i: &NightInterval) -> (f64, f64) {
        (i.start.value(), i.end.value())
    }

    #[test]
    fn test_new_rejects_degenerate() {
        assert!(NightInterval::new(date(), NightHour::new(1.0), NightHour::new(1.0)).is_none());
        assert!(NightInterval::new(date(), NightHour::new(2.0), NightHour::new(1.0)).is_none());
    }

    #[test]
    fn test_subtract_exact_cover_consumes_block() {
        assert!(interval(0.0, 2.0).subtract(&interval(0.0, 2.0)).is_empty());
    }

    #[test]
    fn test_subtract_cover_beyond_both_edges() {
        assert!(interval(0.0, 2.0).subtract(&interval(-1.0, 3.0)).is_empty());
    }

    #[test]
    fn test_subtract_overlapping_start() {
        let out = interval(0.0, 2.0).subtract(&interval(-1.0, 1.0));
        assert_eq!(out.len(), 1);
        assert_eq!(bounds(&out[0]), (1.0, 2.0));
    }

    #[test]
    fn test_subtract_overlapping_end() {
        let out = interval(0.0, 2.0).subtract(&interval(1.0, 3.0));
        assert_eq!(out.len(), 1);
        assert_eq!(bounds(&out[0]), (0.0, 1.0));
    }

    #[test]
    fn test_subtract_strictly_inside_splits() {
        let out = interval(0.0, 2.0).subtract(&interval(0.5, 1.5));
        assert_eq!(out.len(), 2);
        assert_eq!(bounds(&out[0]), (0.0, 0.5));
        assert_eq!(bounds(&out[1]), (1.5, 2.0));
    }

    #[test]
    fn test_subtract_no_overlap_keeps_block() {
        let out = interval(0.0, 2.0).subtract(&interval(5.0, 6.0));
        assert_eq!(out.len(), 1);
        assert_eq!(bounds(&out[0]), (0.0, 2.0));
    }

    #[test]
    fn test_subtract_shared_edge_truncates_without_degenerate_piece() {
        // Shared start edge: the left remainder would be zero-length and is dropped.
        let out = interval(0.0, 2.0).subtract(&interval(0.0, 1.0));
        assert_eq!(out.len(), 1);
        assert_eq!(bounds(&out[0]), (1.0, 2.0));

        // Shared end edge, symmetric.
        let out = interval(0.0, 2.0).subtract(&interval(1.0, 2.0));
        assert_eq!(out.len(), 1);
        assert_eq!(bounds(&out[0]), (0.0, 1.0));
    }

    #[test]
    fn test_subtract_boundary_touching_outside_is_no_overlap() {
        let out = interval(0.0, 2.0).subtract(&interval(2.0, 3.0));
        assert_eq!(out.len(), 1);
        assert_eq!(bounds(&out[0]), (0.0, 2.0));
    }

    #[test]
    fn test_subtract_other_night_is_noop() {
        let other_night = NightInterval::new(
            NaiveDate::from_ymd_opt(2024, 10, 6).unwrap(),
            NightHour::new(0.0),
            NightHour::new(2.0),
        )
        .unwrap();
        let out = interval(0.0, 2.0).subtract(&other_night);
        assert_eq!(out, vec![interval(0.0, 2.0)]);
    }

    #[test]
    fn test_midpoint_and_duration() {
        let i = interval(-1.0, 2.0);
        assert_eq!(i.midpoint().value(), 0.5);
        assert_eq!(i.duration().value(), 3.0);
    }
}
