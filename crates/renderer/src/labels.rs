//! Text labels at a cyclone's current point.
//!
//! Each line is drawn twice, first as an outline in the outline color and
//! then as the fill, so labels stay legible over coastline and imagery.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use rusttype::{Font, Scale};
use std::path::Path;
use tiny_skia::{Pixmap, PixmapPaint, Transform};
use tracing::warn;
use typhoon_common::{time::hour_label, Color, Cyclone, PixelPoint, Point, TrackStyle};

use crate::error::{RenderError, RenderResult};
use crate::surface::pixmap_from_rgba;

/// The label stack for a cyclone at `point`: bilingual name, hour-truncated
/// timestamp, and wind speed when known.
pub fn label_lines(cyclone: &Cyclone, point: &Point) -> Vec<String> {
    let mut lines = vec![cyclone.display_name(), hour_label(&point.time)];
    if let Some(speed) = point.windspeed {
        lines.push(format!("{} km/h", speed));
    }
    lines
}

/// Rasterizes label stacks with a TrueType font.
pub struct LabelRenderer {
    font: Font<'static>,
}

impl std::fmt::Debug for LabelRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelRenderer").finish_non_exhaustive()
    }
}

impl LabelRenderer {
    pub fn from_bytes(data: Vec<u8>) -> RenderResult<Self> {
        let font = Font::try_from_vec(data)
            .ok_or_else(|| RenderError::Font("not a TrueType font".to_string()))?;
        Ok(Self { font })
    }

    pub fn from_file(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|e| RenderError::Font(format!("{}: {}", path.display(), e)))?;
        Self::from_bytes(data)
    }

    /// Draw `lines` centered horizontally under `anchor`.
    ///
    /// The first line's top sits `label_offset` below the anchor; later
    /// lines follow every `label_line_height`. Lengths scale by `density`.
    pub fn draw(
        &self,
        pixmap: &mut Pixmap,
        lines: &[String],
        anchor: PixelPoint,
        style: &TrackStyle,
        density: f32,
    ) {
        if lines.is_empty() {
            return;
        }

        let scale = Scale::uniform(style.label_font_size * density);
        let outline = (style.label_outline_width as f32 * density).round() as i32;
        let line_height = style.label_line_height * density;

        let sizes: Vec<(i32, i32)> = lines
            .iter()
            .map(|line| text_size(scale, &self.font, line))
            .collect();
        let block_w = sizes.iter().map(|s| s.0).max().unwrap_or(0) + 2 * outline + 2;
        let block_h = (line_height * (lines.len() - 1) as f32).ceil() as i32
            + scale.y.ceil() as i32
            + 2 * outline
            + 2;
        if block_w <= 0 || block_h <= 0 {
            return;
        }

        let mut buffer = RgbaImage::new(block_w as u32, block_h as u32);
        let outline_color = rgba(style.label_outline_color);
        let fill_color = rgba(style.label_color);

        for (i, (line, (w, _))) in lines.iter().zip(&sizes).enumerate() {
            let x = (block_w - w) / 2;
            let y = outline + 1 + (line_height * i as f32).round() as i32;

            for dy in -outline..=outline {
                for dx in -outline..=outline {
                    if dx != 0 || dy != 0 {
                        draw_text_mut(&mut buffer, outline_color, x + dx, y + dy, scale, &self.font, line);
                    }
                }
            }
            draw_text_mut(&mut buffer, fill_color, x, y, scale, &self.font, line);
        }

        let label = match pixmap_from_rgba(&buffer) {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "Skipping label");
                return;
            }
        };

        let left = (anchor.x as f32 - block_w as f32 / 2.0).round() as i32;
        let top = (anchor.y as f32 + style.label_offset * density).round() as i32 - outline - 1;
        pixmap.draw_pixmap(left, top, label.as_ref(), &PixmapPaint::default(), Transform::identity(), None);
    }
}

fn rgba(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, color.a])
}
