//! Classification segments of a track, and the spans drawn between points.
//!
//! A segment opens at every point carrying a classification; unclassified
//! points extend whichever segment is open. Segments borrow contiguous
//! slices of the track, so joining them back reproduces it exactly.

use tracing::warn;
use typhoon_common::{Classification, Point, PointKind};

/// A maximal run of points sharing one classification style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<'a> {
    /// `None` only for a leading run of unclassified points
    pub classification: Option<Classification>,
    pub points: &'a [Point],
}

/// Split a track into classification segments.
///
/// A track that starts without a classification is a data anomaly: it gets
/// an unclassified first segment and a warning, never an error.
pub fn segment(track: &[Point]) -> Vec<Segment<'_>> {
    if let Some(first) = track.first() {
        if first.classification.is_none() {
            warn!(
                time = %first.time,
                "Track begins with an unclassified point; opening an unclassified segment"
            );
        }
    }

    // Segment starts: the first point, then every classified point
    let starts = track
        .iter()
        .enumerate()
        .filter(|(i, p)| *i == 0 || p.classification.is_some())
        .map(|(i, _)| i)
        .collect::<Vec<_>>();

    starts
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = starts.get(n + 1).copied().unwrap_or(track.len());
            Segment {
                classification: track[start].classification,
                points: &track[start..end],
            }
        })
        .collect()
}

/// How a single span between two consecutive points is stroked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpanStyle {
    /// Classification of the segment the span starts in
    pub from: Option<Classification>,
    /// Set when the span crosses into a segment of a different
    /// classification; stroke as a gradient `from -> to`
    pub to: Option<Option<Classification>>,
    /// The span leads into a forecast point
    pub dashed: bool,
}

impl SpanStyle {
    pub fn is_gradient(&self) -> bool {
        self.to.is_some()
    }
}

/// A line between two consecutive track points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span<'a> {
    pub start: &'a Point,
    pub end: &'a Point,
    pub style: SpanStyle,
}

/// Derive the drawable spans of a segmented track, in track order.
pub fn spans<'a>(segments: &[Segment<'a>]) -> Vec<Span<'a>> {
    let mut out = Vec::new();

    for (n, seg) in segments.iter().enumerate() {
        for pair in seg.points.windows(2) {
            out.push(Span {
                start: &pair[0],
                end: &pair[1],
                style: SpanStyle {
                    from: seg.classification,
                    to: None,
                    dashed: pair[1].kind == PointKind::Forecast,
                },
            });
        }

        // Bridge into the next segment
        if let (Some(last), Some(next)) = (seg.points.last(), segments.get(n + 1)) {
            if let Some(first) = next.points.first() {
                let changes = next.classification != seg.classification;
                out.push(Span {
                    start: last,
                    end: first,
                    style: SpanStyle {
                        from: seg.classification,
                        to: changes.then_some(next.classification),
                        dashed: first.kind == PointKind::Forecast,
                    },
                });
            }
        }
    }

    out
}

/// Effective classification of every point: its own, or its segment's.
pub fn effective_classifications(segments: &[Segment<'_>]) -> Vec<Option<Classification>> {
    segments
        .iter()
        .flat_map(|s| std::iter::repeat(s.classification).take(s.points.len()))
        .collect()
}
