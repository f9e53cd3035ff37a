//! Cyclone tracks, markers and labels.
//!
//! Back to front: the viewer marker, then per cyclone the cloud disc,
//! track spans, point markers and the label stack at the current point.

use projection::project;
use tiny_skia::{
    FillRule, GradientStop, LineCap, LineJoin, LinearGradient, Paint, PathBuilder, Pixmap,
    Shader, SpreadMode, Stroke, StrokeDash, Transform,
};
use tracing::{debug, trace};
use track::{resolve_current, segment, segment::effective_classifications, spans, Span};
use typhoon_common::{Color, Cyclone, GeoBounds, PixelPoint, TrackStyle};

use super::{DrawContext, Layer, LayerKind};
use crate::error::RenderResult;
use crate::inputs::{Input, InputSet};
use crate::labels::label_lines;
use crate::surface::{to_skia, Surface};

pub struct TrackLayer {
    surface: Surface,
}

impl TrackLayer {
    pub fn new(surface: Surface) -> Self {
        Self { surface }
    }
}

impl Layer for TrackLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Track
    }

    fn dependencies(&self) -> InputSet {
        InputSet::from([
            Input::Cyclones,
            Input::ViewerLocation,
            Input::QueryTime,
            Input::Bounds,
            Input::Density,
            Input::ShowSatellite,
        ])
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn draw(&mut self, ctx: &DrawContext<'_>) -> RenderResult<()> {
        let (width, height) = ctx.bounds.pixel_size();
        self.surface.ensure_size(width, height)?;
        self.surface.clear();

        let style = &ctx.config.style;
        let density = ctx.density();
        let pixmap = self.surface.pixmap_mut();

        if let Some(viewer) = &ctx.inputs.viewer_location {
            let p = project(viewer, &ctx.bounds);
            fill_circle(pixmap, p, style.viewer_radius * density, style.viewer_color);
        }

        for cyclone in ctx.inputs.cyclones.iter() {
            draw_cyclone(pixmap, cyclone, ctx, style, density);
        }

        debug!(cyclones = ctx.inputs.cyclones.len(), "Drew track layer");
        Ok(())
    }
}

fn draw_cyclone(
    pixmap: &mut Pixmap,
    cyclone: &Cyclone,
    ctx: &DrawContext<'_>,
    style: &TrackStyle,
    density: f32,
) {
    let bounds = &ctx.bounds;
    let current = resolve_current(&cyclone.track, ctx.inputs.query_time);
    if current.is_none() {
        trace!(cyclone = %cyclone.name, "No current point; omitting marker and label");
    }

    // Cloud extent; the satellite image already shows it
    if let (false, Some(point)) = (ctx.inputs.show_satellite, current) {
        if let Some(wind) = point.windspeed {
            let radius = wind as f32 * style.cloud_scale * density;
            fill_circle(pixmap, project(point, bounds), radius, style.cloud_color);
        }
    }

    let segments = segment(&cyclone.track);
    for span in spans(&segments) {
        stroke_span(pixmap, &span, bounds, style, density);
    }

    let classes = effective_classifications(&segments);
    for (point, class) in cyclone.track.iter().zip(classes) {
        let is_current = current.map_or(false, |c| std::ptr::eq(c, point));
        let radius = point
            .windspeed
            .map(|w| w as f32 * style.marker_scale)
            .unwrap_or(style.default_marker_radius)
            * density;
        let color = if is_current {
            style.current_color
        } else {
            style.palette.color_for(class)
        };
        fill_circle(pixmap, project(point, bounds), radius, color);
    }

    if let (Some(point), Some(labels)) = (current, ctx.labels) {
        let lines = label_lines(cyclone, point);
        labels.draw(pixmap, &lines, project(point, bounds), style, density);
    }
}

fn stroke_span(pixmap: &mut Pixmap, span: &Span<'_>, bounds: &GeoBounds, style: &TrackStyle, density: f32) {
    let a = project(span.start, bounds);
    let b = project(span.end, bounds);

    let mut pb = PathBuilder::new();
    pb.move_to(a.x as f32, a.y as f32);
    pb.line_to(b.x as f32, b.y as f32);
    let Some(path) = pb.finish() else {
        return;
    };

    let from = style.palette.color_for(span.style.from);
    let shader = match span.style.to {
        Some(to) => gradient(a, b, from, style.palette.color_for(to)),
        None => Shader::SolidColor(to_skia(from)),
    };

    let paint = Paint {
        shader,
        anti_alias: true,
        ..Paint::default()
    };

    let dash = if span.style.dashed {
        StrokeDash::new(
            style.forecast_dash.iter().map(|d| d * density).collect(),
            0.0,
        )
    } else {
        None
    };

    // Round caps would close the dash gaps
    let line_cap = if dash.is_some() { LineCap::Butt } else { LineCap::Round };
    let stroke = Stroke {
        width: style.track_width * density,
        line_cap,
        line_join: LineJoin::Round,
        dash,
        ..Stroke::default()
    };

    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}

/// Linear blend along the span; falls back to the start color when the
/// span is too short to carry a gradient.
fn gradient(a: PixelPoint, b: PixelPoint, from: Color, to: Color) -> Shader<'static> {
    LinearGradient::new(
        tiny_skia::Point::from_xy(a.x as f32, a.y as f32),
        tiny_skia::Point::from_xy(b.x as f32, b.y as f32),
        vec![
            GradientStop::new(0.0, to_skia(from)),
            GradientStop::new(1.0, to_skia(to)),
        ],
        SpreadMode::Pad,
        Transform::identity(),
    )
    .unwrap_or(Shader::SolidColor(to_skia(from)))
}

fn fill_circle(pixmap: &mut Pixmap, center: PixelPoint, radius: f32, color: Color) {
    if !(radius > 0.0) {
        return;
    }
    let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius) else {
        return;
    };

    let mut paint = Paint::default();
    paint.set_color(to_skia(color));
    paint.anti_alias = true;
    pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
}
