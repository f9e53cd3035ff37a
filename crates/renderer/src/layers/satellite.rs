//! Satellite imagery overlay.
//!
//! Drawing the layer only resolves a slot and issues a request; the image
//! itself arrives later through [`SatelliteLayer::complete`]. Until then
//! the surface keeps its previous contents.

use image::RgbaImage;
use satellite::{resolve_slot, RequestTracker, SatelliteRequest, SatelliteResult, SatelliteSlot, Ticket};
use tiny_skia::{FilterQuality, PixmapPaint, Transform};
use tracing::{debug, warn};

use super::{DrawContext, Layer, LayerKind};
use crate::error::RenderResult;
use crate::inputs::{Input, InputSet};
use crate::surface::{pixmap_from_rgba, Surface};

pub struct SatelliteLayer {
    surface: Surface,
    tracker: RequestTracker,
    pending: Option<SatelliteRequest>,
    /// Slot of the in-flight request, kept for the completion
    in_flight: Option<SatelliteSlot>,
}

impl SatelliteLayer {
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            tracker: RequestTracker::new(),
            pending: None,
            in_flight: None,
        }
    }

    /// The request issued by the last draw, if not yet taken.
    pub fn take_request(&mut self) -> Option<SatelliteRequest> {
        self.pending.take()
    }

    /// Finish a request. Stale tickets are ignored and return `false`.
    ///
    /// A failed fetch or decode leaves the overlay transparent.
    pub fn complete(&mut self, ticket: Ticket, frame: SatelliteResult<RgbaImage>) -> RenderResult<bool> {
        if !self.tracker.complete(ticket) {
            return Ok(false);
        }
        let Some(slot) = self.in_flight.take() else {
            return Ok(false);
        };

        self.surface.clear();
        match frame {
            Ok(img) => {
                self.draw_frame(&img, &slot)?;
                debug!(key = %slot.image_key, "Drew satellite frame");
            }
            Err(e) => {
                warn!(key = %slot.image_key, error = %e, "Satellite frame unavailable");
            }
        }
        Ok(true)
    }

    fn draw_frame(&mut self, img: &RgbaImage, slot: &SatelliteSlot) -> RenderResult<()> {
        if slot.rect.is_empty() {
            return Ok(());
        }

        let frame = pixmap_from_rgba(img)?;
        let sx = (slot.rect.width / img.width() as f64) as f32;
        let sy = (slot.rect.height / img.height() as f64) as f32;
        let transform = Transform::from_row(sx, 0.0, 0.0, sy, slot.rect.x as f32, slot.rect.y as f32);

        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.surface
            .pixmap_mut()
            .draw_pixmap(0, 0, frame.as_ref(), &paint, transform, None);
        Ok(())
    }
}

impl Layer for SatelliteLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Satellite
    }

    fn dependencies(&self) -> InputSet {
        InputSet::from([Input::ShowSatellite, Input::QueryTime, Input::Bounds])
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn draw(&mut self, ctx: &DrawContext<'_>) -> RenderResult<()> {
        let (width, height) = ctx.bounds.pixel_size();
        self.surface.ensure_size(width, height)?;

        if !ctx.inputs.show_satellite {
            self.surface.clear();
            self.tracker.cancel();
            self.pending = None;
            self.in_flight = None;
            return Ok(());
        }

        match resolve_slot(ctx.inputs.query_time, ctx.now, &ctx.config.satellite, &ctx.bounds) {
            Ok(slot) => {
                let ticket = self.tracker.issue();
                self.in_flight = Some(slot.clone());
                self.pending = Some(SatelliteRequest { ticket, slot });
            }
            Err(e) => {
                warn!(error = %e, "Could not resolve satellite slot");
                self.surface.clear();
                self.tracker.cancel();
                self.pending = None;
                self.in_flight = None;
            }
        }
        Ok(())
    }
}
