//! Tests for the equirectangular projector and bounds derivation.

use projection::{bounds_for_viewport, project, project_rect, unproject};
use test_utils::{assert_approx_eq, assert_coords_approx_eq, bounds};
use typhoon_common::{Anchor, GeoPoint, GeoRect, PixelPoint, Viewport};

// ============================================================================
// project tests
// ============================================================================

#[test]
fn test_project_center_scenario() {
    let b = bounds::pearl_river_square();
    let p = project(&GeoPoint::new(22.0, 114.0), &b);
    assert_coords_approx_eq!((p.x, p.y), (500.0, 500.0), 1e-9);
}

#[test]
fn test_project_min_corner_is_bottom_left() {
    let b = bounds::pearl_river_square();
    let p = project(&GeoPoint::new(b.min_lat, b.min_lon), &b);
    assert_coords_approx_eq!((p.x, p.y), (0.0, b.height), 1e-9);
}

#[test]
fn test_project_max_corner_is_top_right() {
    let b = bounds::south_china_sea();
    let p = project(&GeoPoint::new(b.max_lat, b.max_lon), &b);
    assert_coords_approx_eq!((p.x, p.y), (b.width, 0.0), 1e-9);
}

#[test]
fn test_project_outside_bounds_is_not_clamped() {
    let b = bounds::pearl_river_square();
    let p = project(&GeoPoint::new(30.0, 100.0), &b);
    assert!(p.x < 0.0);
    assert!(p.y < 0.0);

    let p = project(&GeoPoint::new(10.0, 130.0), &b);
    assert!(p.x > b.width);
    assert!(p.y > b.height);
}

#[test]
fn test_project_accepts_track_points() {
    let b = bounds::pearl_river_square();
    let track = test_utils::two_point_track();
    let a = project(&track[0], &b);
    let c = project(&track[0].position(), &b);
    assert_eq!(a, c);
}

// ============================================================================
// unproject tests
// ============================================================================

#[test]
fn test_unproject_inverts_project() {
    let b = bounds::south_china_sea();
    for &(lat, lon) in &[(12.5, 107.25), (18.0, 115.0), (24.9, 124.1), (10.001, 105.001)] {
        let back = unproject(project(&GeoPoint::new(lat, lon), &b), &b);
        assert_coords_approx_eq!((back.latitude, back.longitude), (lat, lon), 1e-9);
    }
}

#[test]
fn test_unproject_pixel_origin() {
    let b = bounds::pearl_river_square();
    let g = unproject(PixelPoint::new(0.0, 0.0), &b);
    assert_coords_approx_eq!((g.latitude, g.longitude), (b.max_lat, b.min_lon), 1e-9);
}

// ============================================================================
// project_rect tests
// ============================================================================

#[test]
fn test_project_rect_whole_bounds_fills_canvas() {
    let b = bounds::south_china_sea();
    let r = project_rect(&b.rect(), &b);
    assert_approx_eq!(r.x, 0.0, 1e-9);
    assert_approx_eq!(r.y, 0.0, 1e-9);
    assert_approx_eq!(r.width, b.width, 1e-9);
    assert_approx_eq!(r.height, b.height, 1e-9);
}

#[test]
fn test_project_rect_larger_than_canvas() {
    let b = bounds::pearl_river_square();
    let r = project_rect(&GeoRect::new(18.0, 110.0, 26.0, 118.0), &b);
    assert_approx_eq!(r.x, -500.0, 1e-9);
    assert_approx_eq!(r.y, -500.0, 1e-9);
    assert_approx_eq!(r.width, 2000.0, 1e-9);
    assert_approx_eq!(r.height, 2000.0, 1e-9);
}

// ============================================================================
// bounds_for_viewport tests
// ============================================================================

#[test]
fn test_bounds_centered_on_anchor() {
    let anchor = Anchor::default();
    let b = bounds_for_viewport(&anchor, &Viewport::default());

    assert_approx_eq!((b.min_lat + b.max_lat) / 2.0, anchor.latitude, 1e-9);
    assert_approx_eq!((b.min_lon + b.max_lon) / 2.0, anchor.longitude, 1e-9);
    // 0.033 deg/px * 1000 px
    assert_approx_eq!(b.max_lon - b.min_lon, 33.0, 1e-9);
    assert_approx_eq!(b.max_lat - b.min_lat, 33.0, 1e-9);
    assert_eq!(b.pixel_size(), (1000, 1000));
}

#[test]
fn test_anchor_projects_to_canvas_center() {
    let anchor = Anchor::default();
    let b = bounds_for_viewport(&anchor, &Viewport::new(640.0, 480.0, 1.0));
    let p = project(&anchor.position(), &b);
    assert_coords_approx_eq!((p.x, p.y), (320.0, 240.0), 1e-9);
}

#[test]
fn test_density_scales_pixels_not_span() {
    let anchor = Anchor::default();
    let low = bounds_for_viewport(&anchor, &Viewport::new(800.0, 600.0, 1.0));
    let high = bounds_for_viewport(&anchor, &Viewport::new(800.0, 600.0, 2.0));

    assert_eq!(low.rect(), high.rect());
    assert_eq!(high.pixel_size(), (1600, 1200));
}

#[test]
fn test_span_follows_logical_size() {
    let anchor = Anchor {
        degrees_per_pixel: 0.01,
        ..Anchor::default()
    };
    let b = bounds_for_viewport(&anchor, &Viewport::new(400.0, 200.0, 1.5));
    assert_approx_eq!(b.max_lon - b.min_lon, 4.0, 1e-9);
    assert_approx_eq!(b.max_lat - b.min_lat, 2.0, 1e-9);
    assert_eq!(b.pixel_size(), (600, 300));
}
