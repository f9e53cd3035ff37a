//! Synthetic track generators.
//!
//! These produce predictable tracks of arbitrary length for benchmarks and
//! tests that need more than the hand-written fixtures.

use chrono::{Duration, FixedOffset, TimeZone};
use typhoon_common::{Classification, Cyclone, Point, PointKind};

const CYCLE: [Classification; 5] = [
    Classification::TropicalDepression,
    Classification::TropicalStorm,
    Classification::SevereTropicalStorm,
    Classification::Typhoon,
    Classification::SevereTyphoon,
];

/// Creates a north-westward track of `len` points, 6 hours apart.
///
/// - Point `actual_index` is the Actual point; earlier points are Past,
///   later ones Forecast.
/// - Every `class_every`-th point carries a classification (cycling through
///   TD..ST), so segment count is `ceil(len / class_every)`.
/// - Wind speed rises 5 km/h per point from 40.
///
/// # Example
///
/// ```
/// use test_utils::generate_track;
///
/// let track = generate_track(10, 4, 3);
/// assert_eq!(track.len(), 10);
/// assert!(track[0].classification.is_some());
/// assert!(track[1].classification.is_none());
/// ```
pub fn generate_track(len: usize, actual_index: usize, class_every: usize) -> Vec<Point> {
    let hkt = FixedOffset::east_opt(8 * 3600).unwrap_or_else(|| panic!("valid offset"));
    let start = hkt
        .with_ymd_and_hms(2024, 9, 1, 2, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("valid start"));
    let class_every = class_every.max(1);

    (0..len)
        .map(|i| {
            let kind = match i.cmp(&actual_index) {
                std::cmp::Ordering::Less => PointKind::Past,
                std::cmp::Ordering::Equal => PointKind::Actual,
                std::cmp::Ordering::Greater => PointKind::Forecast,
            };
            Point {
                kind,
                time: start + Duration::hours(6 * i as i64),
                latitude: 12.0 + 0.4 * i as f64,
                longitude: 130.0 - 0.7 * i as f64,
                classification: (i % class_every == 0).then(|| CYCLE[(i / class_every) % CYCLE.len()]),
                windspeed: Some(40.0 + 5.0 * i as f64),
            }
        })
        .collect()
}

/// Wraps a generated track in a cyclone record.
pub fn generate_cyclone(id: i64, len: usize) -> Cyclone {
    Cyclone {
        id,
        name: format!("STORM{}", id),
        name_zh: String::new(),
        bearing: "SE".to_string(),
        distance: Some(100.0 * id as f64),
        track: generate_track(len, len / 2, 3),
    }
}
