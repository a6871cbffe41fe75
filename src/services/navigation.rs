//! Spatial neighbor search and stopping-point time adjustment.
//!
//! Pure helpers the interaction controller builds its arrow-key navigation
//! and edit-time nudge controls on. Everything here operates on plain time
//! values; the controller supplies per-night item lists and adapts the
//! results back to selection changes.

use crate::api::{Observation, ObservationId, TwilightRecord};

/// Direction along the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Earlier,
    Later,
}

/// Index of the previous/next item within one night's start-sorted item
/// list. `None` at either end of the sequence.
pub fn horizontal_neighbor(len: usize, current: usize, dir: Direction) -> Option<usize> {
    match dir {
        Direction::Earlier => current.checked_sub(1),
        Direction::Later => {
            let next = current + 1;
            (next < len).then_some(next)
        }
    }
}

/// Index of the item whose midpoint is closest to `target_midpoint`.
///
/// Distance is measured in time value, not pixels. `None` for an empty list.
pub fn nearest_by_midpoint(midpoints: &[f64], target_midpoint: f64) -> Option<usize> {
    midpoints
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            let da = (*a - target_midpoint).abs();
            let db = (*b - target_midpoint).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
}

/// Collect the sorted stopping points for one night: every twilight boundary
/// plus every observation edge, excluding the edges of the observation being
/// edited.
pub fn stopping_points(
    twilight: Option<&TwilightRecord>,
    observations: &[Observation],
    exclude: ObservationId,
) -> Vec<f64> {
    let mut stops = Vec::new();
    if let Some(record) = twilight {
        stops.extend(record.boundaries().iter().map(|b| b.value()));
    }
    for obs in observations {
        if obs.id == exclude {
            continue;
        }
        stops.push(obs.record.start_time.value());
        stops.push(obs.record.end_time.value());
    }
    stops.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    stops
}

/// Move `current` to the nearest stopping point strictly beyond it in the
/// requested direction; when the nearest stop is farther than `step` away
/// (or there is none), apply a plain fixed-step adjustment instead. The
/// result is clamped to `[domain_min, domain_max]`.
pub fn nudge(
    current: f64,
    dir: Direction,
    stops: &[f64],
    step: f64,
    domain_min: f64,
    domain_max: f64,
) -> f64 {
    // Stops coincident with the current value (within a minute's rounding
    // slack) do not count as "beyond": nudging away from a boundary we are
    // already sitting on must make progress.
    const EPS: f64 = 1.0 / 120.0;

    let nearest = match dir {
        Direction::Later => stops
            .iter()
            .copied()
            .filter(|s| *s > current + EPS)
            .fold(None::<f64>, |acc, s| {
                Some(acc.map_or(s, |best| best.min(s)))
            }),
        Direction::Earlier => stops
            .iter()
            .copied()
            .filter(|s| *s < current - EPS)
            .fold(None::<f64>, |acc, s| {
                Some(acc.map_or(s, |best| best.max(s)))
            }),
    };

    let target = match nearest {
        Some(stop) if (stop - current).abs() <= step => stop,
        _ => match dir {
            Direction::Later => current + step,
            Direction::Earlier => current - step,
        },
    };

    target.clamp(domain_min, domain_max)
}
