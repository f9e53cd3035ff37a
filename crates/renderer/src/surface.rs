//! Drawing surfaces, compositing and PNG output.

use image::RgbaImage;
use tiny_skia::{IntSize, Pixmap, PixmapPaint, PremultipliedColorU8, Transform};
use typhoon_common::{Color, GeoBounds};

use crate::error::{RenderError, RenderResult};

/// A transparent RGBA surface owned by one layer.
#[derive(Debug, Clone)]
pub struct Surface {
    pixmap: Pixmap,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let pixmap =
            Pixmap::new(width, height).ok_or(RenderError::InvalidSurface { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn for_bounds(bounds: &GeoBounds) -> RenderResult<Self> {
        let (width, height) = bounds.pixel_size();
        Self::new(width, height)
    }

    /// Reallocate when the canvas size changed. A resized surface is blank.
    pub fn ensure_size(&mut self, width: u32, height: u32) -> RenderResult<bool> {
        if self.pixmap.width() == width && self.pixmap.height() == height {
            return Ok(false);
        }
        *self = Self::new(width, height)?;
        Ok(true)
    }

    pub fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremultipliedColorU8> {
        self.pixmap.pixel(x, y)
    }

    /// True when every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.pixmap.pixels().iter().all(|p| p.alpha() == 0)
    }

    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        encode_png(&self.pixmap)
    }
}

/// Convert a style color to tiny-skia's color.
pub fn to_skia(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

/// Convert a straight-alpha RGBA image to a premultiplied pixmap.
pub fn pixmap_from_rgba(img: &RgbaImage) -> RenderResult<Pixmap> {
    let (width, height) = img.dimensions();
    let size = IntSize::from_wh(width, height).ok_or(RenderError::InvalidSurface { width, height })?;

    let mut data = img.as_raw().clone();
    for px in data.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a < 255 {
            px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
            px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
            px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
        }
    }

    Pixmap::from_vec(data, size).ok_or(RenderError::InvalidSurface { width, height })
}

/// Stack layers bottom to top onto a new pixmap.
pub fn composite(layers: &[&Pixmap], width: u32, height: u32) -> RenderResult<Pixmap> {
    let mut out = Pixmap::new(width, height).ok_or(RenderError::InvalidSurface { width, height })?;
    let paint = PixmapPaint::default();
    for layer in layers {
        out.draw_pixmap(0, 0, layer.as_ref(), &paint, Transform::identity(), None);
    }
    Ok(out)
}

pub fn encode_png(pixmap: &Pixmap) -> RenderResult<Vec<u8>> {
    pixmap
        .encode_png()
        .map_err(|e| RenderError::Encode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            Surface::new(0, 10),
            Err(RenderError::InvalidSurface { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_premultiply() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([200, 100, 0, 128]));
        let pixmap = pixmap_from_rgba(&img).unwrap();
        let p = pixmap.pixel(0, 0).unwrap();
        assert_eq!(p.alpha(), 128);
        assert_eq!(p.red(), 100);
        assert_eq!(p.green(), 50);
    }

    #[test]
    fn test_ensure_size() {
        let mut s = Surface::new(4, 4).unwrap();
        assert!(!s.ensure_size(4, 4).unwrap());
        assert!(s.ensure_size(8, 2).unwrap());
        assert_eq!((s.width(), s.height()), (8, 2));
    }
}
