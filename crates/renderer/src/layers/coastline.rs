//! Static coastline reference geometry.

use projection::project;
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Stroke, Transform};
use tracing::debug;

use super::{DrawContext, Layer, LayerKind};
use crate::error::RenderResult;
use crate::inputs::{Input, InputSet};
use crate::surface::{to_skia, Surface};

pub struct CoastlineLayer {
    surface: Surface,
}

impl CoastlineLayer {
    pub fn new(surface: Surface) -> Self {
        Self { surface }
    }
}

impl Layer for CoastlineLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Coastline
    }

    fn dependencies(&self) -> InputSet {
        InputSet::from([Input::Coastline, Input::Bounds])
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn draw(&mut self, ctx: &DrawContext<'_>) -> RenderResult<()> {
        let (width, height) = ctx.bounds.pixel_size();
        self.surface.ensure_size(width, height)?;
        self.surface.clear();

        let Some(coastline) = ctx.inputs.coastline.as_deref() else {
            return Ok(());
        };

        let style = &ctx.config.style;
        let mut paint = Paint::default();
        paint.set_color(to_skia(style.coastline_color));
        paint.anti_alias = true;

        let stroke = Stroke {
            width: style.coastline_width * ctx.density(),
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };

        let mut drawn = 0usize;
        for line in coastline.polylines() {
            if line.len() < 2 {
                continue;
            }

            let mut pb = PathBuilder::new();
            for (i, point) in line.iter().enumerate() {
                let p = project(point, &ctx.bounds);
                if i == 0 {
                    pb.move_to(p.x as f32, p.y as f32);
                } else {
                    pb.line_to(p.x as f32, p.y as f32);
                }
            }

            if let Some(path) = pb.finish() {
                self.surface
                    .pixmap_mut()
                    .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
                drawn += 1;
            }
        }

        debug!(polylines = drawn, "Drew coastline layer");
        Ok(())
    }
}
