//! Which track point represents the storm at a given moment.

use chrono::{DateTime, Duration, Utc};
use typhoon_common::{Point, PointKind};

/// Resolve the "current" point of a chronologically ordered track.
///
/// - Without a query time: the Actual point (latest confirmed fix), if any.
/// - With a query time: the last point at or before it. The scan stops at
///   the first point past the query, so a query before the track's start
///   yields `None`. Queries past the Actual point walk into forecast
///   points.
pub fn resolve_current(track: &[Point], query: Option<DateTime<Utc>>) -> Option<&Point> {
    match query {
        None => track.iter().find(|p| p.kind == PointKind::Actual),
        Some(q) => track.iter().take_while(|p| p.instant() <= q).last(),
    }
}

/// Query-time state for scrubbing backward and forward along tracks.
///
/// `None` means live: show the Actual point and the latest satellite frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeCursor {
    query: Option<DateTime<Utc>>,
}

impl TimeCursor {
    pub fn live() -> Self {
        Self { query: None }
    }

    pub fn at(query: DateTime<Utc>) -> Self {
        Self { query: Some(query) }
    }

    pub fn query(&self) -> Option<DateTime<Utc>> {
        self.query
    }

    pub fn is_live(&self) -> bool {
        self.query.is_none()
    }

    /// Move by `delta`; from live mode the step starts at `now`.
    pub fn step(&mut self, delta: Duration, now: DateTime<Utc>) -> DateTime<Utc> {
        let next = self.query.unwrap_or(now) + delta;
        self.query = Some(next);
        next
    }

    pub fn reset(&mut self) {
        self.query = None;
    }
}
