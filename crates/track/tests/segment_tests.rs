//! Tests for track segmentation and span styling.

use test_utils::{generate_track, point, sample_track};
use track::segment::effective_classifications;
use track::{segment, spans};
use typhoon_common::{Classification, PointKind};

// ============================================================================
// segment tests
// ============================================================================

#[test]
fn test_segments_concatenate_to_track() {
    for track in [sample_track(), generate_track(25, 10, 4), generate_track(1, 0, 1)] {
        let joined: Vec<_> = segment(&track)
            .iter()
            .flat_map(|s| s.points.iter().cloned())
            .collect();
        assert_eq!(joined, track);
    }
}

#[test]
fn test_segments_start_only_at_classified_points() {
    let track = sample_track();
    let segs = segment(&track);

    // TD, TS, STS, T, STS, TD are classified
    assert_eq!(segs.len(), 6);
    for seg in &segs {
        assert!(seg.points[0].classification.is_some());
        assert!(seg.points[1..].iter().all(|p| p.classification.is_none()));
        assert_eq!(seg.classification, seg.points[0].classification);
    }
}

#[test]
fn test_segment_count_matches_generator() {
    let track = generate_track(10, 5, 3);
    // classified at 0, 3, 6, 9
    assert_eq!(segment(&track).len(), 4);
}

#[test]
fn test_leading_unclassified_point_opens_unclassified_segment() {
    let track = vec![
        point(PointKind::Past, "2024-07-14T02:00:00+08:00", 16.0, 125.0, None, None),
        point(PointKind::Past, "2024-07-14T08:00:00+08:00", 16.5, 124.0, None, None),
        point(PointKind::Actual, "2024-07-14T14:00:00+08:00", 17.0, 123.0, Some("TS"), Some(70.0)),
    ];
    let segs = segment(&track);

    assert_eq!(segs.len(), 2);
    assert_eq!(segs[0].classification, None);
    assert_eq!(segs[0].points.len(), 2);
    assert_eq!(segs[1].classification, Some(Classification::TropicalStorm));
}

#[test]
fn test_repeated_classification_still_opens_segment() {
    let track = vec![
        point(PointKind::Past, "2024-07-14T02:00:00+08:00", 16.0, 125.0, Some("TS"), None),
        point(PointKind::Actual, "2024-07-14T08:00:00+08:00", 16.5, 124.0, Some("TS"), None),
    ];
    assert_eq!(segment(&track).len(), 2);
}

#[test]
fn test_effective_classifications_fill_forward() {
    let track = sample_track();
    let classes = effective_classifications(&segment(&track));
    assert_eq!(classes.len(), track.len());
    assert_eq!(classes[1], Some(Classification::TropicalDepression));
    assert_eq!(classes[3], Some(Classification::TropicalStorm));
    assert_eq!(classes[6], Some(Classification::Typhoon));
}

// ============================================================================
// spans tests
// ============================================================================

#[test]
fn test_one_span_per_consecutive_pair() {
    let track = sample_track();
    let sp = spans(&segment(&track));
    assert_eq!(sp.len(), track.len() - 1);
    for (i, span) in sp.iter().enumerate() {
        assert_eq!(span.start, &track[i]);
        assert_eq!(span.end, &track[i + 1]);
    }
}

#[test]
fn test_span_color_is_classification_at_span_start() {
    let track = sample_track();
    let sp = spans(&segment(&track));

    // TD run: 0 -> 1 solid TD
    assert_eq!(sp[0].style.from, Some(Classification::TropicalDepression));
    assert!(!sp[0].style.is_gradient());
    // 1 -> 2 crosses TD -> TS
    assert_eq!(sp[1].style.from, Some(Classification::TropicalDepression));
    assert_eq!(sp[1].style.to, Some(Some(Classification::TropicalStorm)));
    // Inside the typhoon run, 5 -> 6
    assert_eq!(sp[5].style.from, Some(Classification::Typhoon));
    assert!(!sp[5].style.is_gradient());
}

#[test]
fn test_spans_into_forecast_are_dashed() {
    let track = sample_track();
    let sp = spans(&segment(&track));

    for span in &sp {
        assert_eq!(span.style.dashed, span.end.kind == PointKind::Forecast);
    }
    // Past -> Actual is solid, Actual -> Forecast dashed
    assert!(!sp[4].style.dashed);
    assert!(sp[5].style.dashed);
}

#[test]
fn test_no_gradient_between_equal_classifications() {
    let track = vec![
        point(PointKind::Past, "2024-07-14T02:00:00+08:00", 16.0, 125.0, Some("T"), None),
        point(PointKind::Actual, "2024-07-14T08:00:00+08:00", 16.5, 124.0, Some("T"), None),
    ];
    let sp = spans(&segment(&track));
    assert_eq!(sp.len(), 1);
    assert!(!sp[0].style.is_gradient());
}

#[test]
fn test_single_point_track_has_no_spans() {
    let track = generate_track(1, 0, 1);
    assert_eq!(segment(&track).len(), 1);
    assert!(spans(&segment(&track)).is_empty());
}
