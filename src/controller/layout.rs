//! Timeline geometry: mapping intervals to the rendering surface.
//!
//! The rendering surface owns the real coordinate scales; the core only
//! needs enough geometry to hit-test clicks and compare item centers to a
//! lasso rectangle. That contract is the [`Layout`] trait. A concrete
//! [`TimelineLayout`] is provided, mirroring the linear time scale and
//! banded date scale of the original rendering surface, and serves as the
//! reference implementation for tests and simple hosts.

use chrono::NaiveDate;

use super::events::{Point, Rect};
use crate::models::NightInterval;

/// Geometry provider for timeline items.
pub trait Layout {
    /// Pixel bounds of an interval's rendered rectangle; `None` when the
    /// interval's date is not on the visible axis.
    fn bounds(&self, interval: &NightInterval) -> Option<Rect>;

    /// Geometric center of an interval's rendered rectangle.
    fn center(&self, interval: &NightInterval) -> Option<Point> {
        self.bounds(interval).map(|r| {
            Point::new((r.min.x + r.max.x) / 2.0, (r.min.y + r.max.y) / 2.0)
        })
    }
}

/// Linear mapping from night hours to horizontal pixels.
#[derive(Debug, Clone, Copy)]
pub struct TimeScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f32,
    range_max: f32,
}

impl TimeScale {
    pub fn new(domain: (f64, f64), range: (f32, f32)) -> Self {
        Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        }
    }

    pub fn x(&self, hours: f64) -> f32 {
        let t = (hours - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t as f32 * (self.range_max - self.range_min)
    }
}

/// Banded mapping from calendar dates to horizontal rows of equal height.
#[derive(Debug, Clone)]
pub struct DateBandScale {
    dates: Vec<NaiveDate>,
    range_min: f32,
    range_max: f32,
}

impl DateBandScale {
    /// One band per date in `[start, end)`, top to bottom.
    pub fn new(start: NaiveDate, end: NaiveDate, range: (f32, f32)) -> Self {
        let dates = start.iter_days().take_while(|d| *d < end).collect();
        Self {
            dates,
            range_min: range.0,
            range_max: range.1,
        }
    }

    pub fn bandwidth(&self) -> f32 {
        if self.dates.is_empty() {
            0.0
        } else {
            (self.range_max - self.range_min) / self.dates.len() as f32
        }
    }

    /// Top edge of the band for a date, if it is on the axis.
    pub fn y(&self, date: NaiveDate) -> Option<f32> {
        let index = self.dates.iter().position(|d| *d == date)?;
        Some(self.range_min + index as f32 * self.bandwidth())
    }
}

/// The reference layout: a time scale crossed with a date band scale.
#[derive(Debug, Clone)]
pub struct TimelineLayout {
    time: TimeScale,
    dates: DateBandScale,
}

impl TimelineLayout {
    pub fn new(time: TimeScale, dates: DateBandScale) -> Self {
        Self { time, dates }
    }
}

impl Layout for TimelineLayout {
    fn bounds(&self, interval: &NightInterval) -> Option<Rect> {
        let y = self.dates.y(interval.date)?;
        let x0 = self.time.x(interval.start.value());
        let x1 = self.time.x(interval.end.value());
        Some(Rect::from_corners(
            Point::new(x0, y),
            Point::new(x1, y + self.dates.bandwidth()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NightHour;

    fn layout() -> TimelineLayout {
        TimelineLayout::new(
            TimeScale::new((-5.0, 7.5), (0.0, 1250.0)),
            DateBandScale::new(
                NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 10, 11).unwrap(),
                (0.0, 500.0),
            ),
        )
    }

    #[test]
    fn test_time_scale_is_linear() {
        let scale = TimeScale::new((-5.0, 7.5), (0.0, 1250.0));
        assert_eq!(scale.x(-5.0), 0.0);
        assert_eq!(scale.x(7.5), 1250.0);
        assert_eq!(scale.x(1.25), 625.0);
    }

    #[test]
    fn test_date_band_scale_rows() {
        let layout = layout();
        let first = NaiveDate::from_ymd_opt(2024, 10, 1).unwrap();
        let third = NaiveDate::from_ymd_opt(2024, 10, 3).unwrap();
        assert_eq!(layout.dates.bandwidth(), 50.0);
        assert_eq!(layout.dates.y(first), Some(0.0));
        assert_eq!(layout.dates.y(third), Some(100.0));
        // Off the axis entirely.
        assert_eq!(
            layout.dates.y(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap()),
            None
        );
    }

    #[test]
    fn test_bounds_and_center() {
        let layout = layout();
        let interval = NightInterval::new(
            NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
            NightHour::new(-5.0),
            NightHour::new(7.5),
        )
        .unwrap();

        let bounds = layout.bounds(&interval).unwrap();
        assert_eq!(bounds.min, Point::new(0.0, 0.0));
        assert_eq!(bounds.max, Point::new(1250.0, 50.0));

        let center = layout.center(&interval).unwrap();
        assert_eq!(center, Point::new(625.0, 25.0));
    }
}
