//! Equirectangular (plate carrée) projection onto a pixel canvas.
//!
//! Longitude maps linearly to x, latitude linearly to y with y flipped so
//! north is up. Nothing is clamped: positions outside the bounds land
//! outside the canvas and are simply not visible.

use tracing::trace;
use typhoon_common::{
    Anchor, GeoBounds, GeoPoint, GeoRect, LatLon, PixelPoint, PixelRect, Viewport,
};

/// Project a geographic position to canvas pixels.
#[inline]
pub fn project(point: &impl LatLon, bounds: &GeoBounds) -> PixelPoint {
    let x = (point.longitude() - bounds.min_lon) / (bounds.max_lon - bounds.min_lon) * bounds.width;
    let y = bounds.height
        - (point.latitude() - bounds.min_lat) / (bounds.max_lat - bounds.min_lat) * bounds.height;
    PixelPoint::new(x, y)
}

/// Inverse of [`project`].
#[inline]
pub fn unproject(pixel: PixelPoint, bounds: &GeoBounds) -> GeoPoint {
    let longitude = bounds.min_lon + pixel.x / bounds.width * (bounds.max_lon - bounds.min_lon);
    let latitude =
        bounds.min_lat + (bounds.height - pixel.y) / bounds.height * (bounds.max_lat - bounds.min_lat);
    GeoPoint::new(latitude, longitude)
}

/// Project a geographic rectangle to the pixel rectangle it covers.
pub fn project_rect(rect: &GeoRect, bounds: &GeoBounds) -> PixelRect {
    let top_left = project(&GeoPoint::new(rect.max_lat, rect.min_lon), bounds);
    let bottom_right = project(&GeoPoint::new(rect.min_lat, rect.max_lon), bounds);
    PixelRect::from_corners(top_left, bottom_right)
}

/// Derive the visible window for a viewport, centered on the anchor.
///
/// The half-span in each axis is `degrees_per_pixel * logical size / 2`, so
/// the geographic extent depends only on the logical viewport. The density
/// factor scales the pixel size of the canvas, giving sharper output for
/// the same window.
pub fn bounds_for_viewport(anchor: &Anchor, viewport: &Viewport) -> GeoBounds {
    let d_lon = anchor.degrees_per_pixel * viewport.width / 2.0;
    let d_lat = anchor.degrees_per_pixel * viewport.height / 2.0;

    let bounds = GeoBounds::new(
        GeoRect::new(
            anchor.latitude - d_lat,
            anchor.longitude - d_lon,
            anchor.latitude + d_lat,
            anchor.longitude + d_lon,
        ),
        (viewport.width * viewport.density).round(),
        (viewport.height * viewport.density).round(),
    );

    trace!(
        min_lat = bounds.min_lat,
        min_lon = bounds.min_lon,
        max_lat = bounds.max_lat,
        max_lon = bounds.max_lon,
        width = bounds.width,
        height = bounds.height,
        "Derived map bounds"
    );

    bounds
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> GeoBounds {
        GeoBounds::new(GeoRect::new(20.0, 112.0, 24.0, 116.0), 1000.0, 1000.0)
    }

    #[test]
    fn test_center_maps_to_canvas_center() {
        let p = project(&GeoPoint::new(22.0, 114.0), &square());
        assert!((p.x - 500.0).abs() < 1e-9);
        assert!((p.y - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_y_axis_is_flipped() {
        let north = project(&GeoPoint::new(23.0, 114.0), &square());
        let south = project(&GeoPoint::new(21.0, 114.0), &square());
        assert!(north.y < south.y);
    }

    #[test]
    fn test_footprint_rect() {
        let r = project_rect(&GeoRect::new(21.0, 113.0, 23.0, 115.0), &square());
        assert!((r.x - 250.0).abs() < 1e-9);
        assert!((r.y - 250.0).abs() < 1e-9);
        assert!((r.width - 500.0).abs() < 1e-9);
        assert!((r.height - 500.0).abs() < 1e-9);
    }
}
