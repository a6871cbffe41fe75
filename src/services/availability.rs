//! Availability engine: derives unscheduled time blocks per night.
//!
//! Available blocks start as the seven canonical twilight segments of each
//! night and shrink as observations are subtracted. They are fully
//! recomputed after every mutation; the data volumes (tens of observations
//! over a two-month range) make full recomputation the simplest correct
//! policy, and it keeps the partition invariant trivially re-establishable.

use crate::api::{Observation, TwilightRecord};
use crate::models::NightInterval;

/// Construct the seven canonical twilight segments for each night:
/// sunset→evening_6, evening_6→evening_12, evening_12→evening_18,
/// evening_18→morning_18 (full night), morning_18→morning_12,
/// morning_12→morning_6, morning_6→sunrise.
///
/// Zero or negative-duration segments (degenerate twilight data, e.g. a
/// missing sunrise) are dropped rather than treated as an error: they simply
/// contribute no available time.
pub fn initialize(twilight: &[TwilightRecord]) -> Vec<NightInterval> {
    let mut blocks = Vec::with_capacity(twilight.len() * 7);
    for record in twilight {
        let b = record.boundaries();
        for pair in b.windows(2) {
            if let Some(segment) = NightInterval::new(record.date, pair[0], pair[1]) {
                blocks.push(segment);
            }
        }
    }
    blocks
}

/// Subtract every observation from every same-night block, carrying the
/// (possibly split) remainders forward, and concatenate all nights.
///
/// Subtraction order does not matter as long as observations on one night
/// are pairwise disjoint, which the editor enforces on entry.
pub fn prune(blocks: &[NightInterval], observations: &[Observation]) -> Vec<NightInterval> {
    let mut out = Vec::with_capacity(blocks.len());
    for block in blocks {
        let mut remainders = vec![*block];
        for obs in observations {
            let Some(obs_interval) = obs.interval() else {
                continue;
            };
            if obs_interval.date != block.date {
                continue;
            }
            remainders = remainders
                .iter()
                .flat_map(|r| r.subtract(&obs_interval))
                .collect();
            if remainders.is_empty() {
                break;
            }
        }
        out.extend(remainders);
    }
    out
}

/// Check the partition invariant: available blocks are pairwise
/// non-overlapping and none overlaps any observation.
///
/// Used in tests and debug assertions at the recompute choke point.
pub fn partition_holds(blocks: &[NightInterval], observations: &[Observation]) -> bool {
    for (i, a) in blocks.iter().enumerate() {
        for b in blocks.iter().skip(i + 1) {
            if a.overlaps(b) {
                return false;
            }
        }
        for obs in observations {
            if let Some(obs_interval) = obs.interval() {
                if a.overlaps(&obs_interval) {
                    return false;
                }
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ObservationId, ObservationRecord};
    use crate::models::NightHour;
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, day).unwrap()
    }

    fn twilight(day: u32) -> TwilightRecord {
        TwilightRecord {
            date: date(day),
            sunset: NightHour::new(-4.9),
            evening_6deg: NightHour::new(-4.4),
            evening_12deg: NightHour::new(-3.9),
            evening_18deg: NightHour::new(-3.4),
            morning_18deg: NightHour::new(4.5),
            morning_12deg: NightHour::new(5.0),
            morning_6deg: NightHour::new(5.5),
            sunrise: NightHour::new(6.0),
        }
    }

    fn observation(day: u32, start: f64, end: f64) -> Observation {
        Observation {
            id: ObservationId::new((day as u64) * 100 + (start * 10.0) as u64),
            record: ObservationRecord {
                date: date(day),
                start_time: NightHour::new(start),
                end_time: NightHour::new(end),
                category: "Science".to_string(),
                label: String::new(),
                tooltip: String::new(),
                notes: None,
                filters: Vec::new(),
            },
        }
    }

    #[test]
    fn test_initialize_builds_seven_segments_per_night() {
        let blocks = initialize(&[twilight(5), twilight(6)]);
        assert_eq!(blocks.len(), 14);
        assert!(blocks.iter().all(|b| b.duration().value() > 0.0));
    }

    #[test]
    fn test_initialize_drops_degenerate_segments() {
        let mut record = twilight(5);
        // Missing sunrise collapses the last segment to zero length.
        record.sunrise = record.morning_6deg;
        let blocks = initialize(&[record]);
        assert_eq!(blocks.len(), 6);
    }

    #[test]
    fn test_prune_splits_night_segment_around_observation() {
        let blocks = initialize(&[twilight(5)]);
        // Strictly inside the long evening_18→morning_18 segment.
        let obs = vec![observation(5, 0.0, 1.0)];
        let pruned = prune(&blocks, &obs);

        // One segment split into two, the other six untouched.
        assert_eq!(pruned.len(), 8);
        assert!(partition_holds(&pruned, &obs));
    }

    #[test]
    fn test_prune_is_order_independent() {
        let blocks = initialize(&[twilight(5)]);
        let mut obs = vec![
            observation(5, -1.0, 0.5),
            observation(5, 1.0, 2.0),
            observation(5, 3.0, 4.0),
        ];
        let forward = prune(&blocks, &obs);
        obs.reverse();
        let backward = prune(&blocks, &obs);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_prune_is_idempotent() {
        let blocks = initialize(&[twilight(5), twilight(6)]);
        let obs = vec![observation(5, 0.0, 1.0), observation(6, -2.0, 2.0)];
        let once = prune(&blocks, &obs);
        let twice = prune(&once, &obs);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_prune_ignores_other_nights() {
        let blocks = initialize(&[twilight(5)]);
        let obs = vec![observation(6, 0.0, 1.0)];
        assert_eq!(prune(&blocks, &obs), blocks);
    }

    #[test]
    fn test_prune_consumes_fully_covered_segments() {
        let blocks = initialize(&[twilight(5)]);
        // Covers everything from sunset to sunrise.
        let obs = vec![observation(5, -5.0, 7.0)];
        assert!(prune(&blocks, &obs).is_empty());
    }

    #[test]
    fn test_partition_detects_overlap() {
        let a = NightInterval::new(date(5), NightHour::new(0.0), NightHour::new(2.0)).unwrap();
        let b = NightInterval::new(date(5), NightHour::new(1.0), NightHour::new(3.0)).unwrap();
        assert!(!partition_holds(&[a, b], &[]));
        assert!(!partition_holds(&[a], &[observation(5, 1.0, 1.5)]));
        assert!(partition_holds(&[a], &[observation(5, 2.0, 3.0)]));
    }
}
