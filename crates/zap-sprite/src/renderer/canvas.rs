//! Software RGBA render target.

use glam::{I64Vec2, IVec2};
use image::{Rgba, RgbaImage};

use super::traits::RenderTarget;
use crate::bitmap::Bitmap;
use crate::core::geometry::{DestRect, Rect};

/// An owned, mutable RGBA8 drawing surface.
///
/// Blits use nearest-neighbour sampling and source-over compositing.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Create a fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Create a canvas filled with a single colour.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba(rgba)),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Set a pixel. Out-of-range coordinates are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if let Some(p) = self.image.get_pixel_mut_checked(x, y) {
            *p = Rgba(rgba);
        }
    }

    /// Fill the whole canvas with one colour.
    pub fn clear(&mut self, rgba: [u8; 4]) {
        self.pixels_mut().fill(rgba);
    }

    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    /// Snapshot the current content into a new bitmap.
    pub fn to_bitmap(&self) -> Bitmap {
        Bitmap::from_image(self.image.clone())
    }

    /// Turn the canvas into a bitmap without copying.
    pub fn into_bitmap(self) -> Bitmap {
        Bitmap::from_image(self.image)
    }

    fn pixels_mut(&mut self) -> &mut [[u8; 4]] {
        bytemuck::cast_slice_mut(&mut *self.image)
    }
}

impl RenderTarget for Canvas {
    fn draw_image_region(&mut self, source: &Bitmap, src: Rect, dest: DestRect) {
        if src.is_empty() || dest.is_degenerate() {
            return;
        }
        log::trace!("blit {:?} from {}x{} bitmap into {:?}", src, source.width(), source.height(), dest);

        let source_bounds = source.bounds();
        let target_size = I64Vec2::new(self.width() as i64, self.height() as i64);

        // Destination pixel span, clipped to the canvas.
        let min = I64Vec2::new(dest.x.floor() as i64, dest.y.floor() as i64).max(I64Vec2::ZERO);
        let max = I64Vec2::new(
            (dest.x + dest.width).ceil() as i64,
            (dest.y + dest.height).ceil() as i64,
        )
        .min(target_size);
        if min.x >= max.x || min.y >= max.y {
            return;
        }

        let origin = dest.origin();
        let src_origin: IVec2 = src.origin();
        let src_width = source.width() as usize;
        let source_pixels = source.pixels();
        let target_width = self.width() as usize;
        let target_pixels = self.pixels_mut();

        for ty in min.y..max.y {
            // Sample at pixel centres.
            let v = (ty as f32 + 0.5 - origin.y) / dest.height;
            if !(0.0..1.0).contains(&v) {
                continue;
            }
            let sy = src_origin.y as i64 + (v * src.height as f32).floor() as i64;

            for tx in min.x..max.x {
                let u = (tx as f32 + 0.5 - origin.x) / dest.width;
                if !(0.0..1.0).contains(&u) {
                    continue;
                }
                let sx = src_origin.x as i64 + (u * src.width as f32).floor() as i64;
                if !source_bounds.contains(sx, sy) || !src.contains(sx, sy) {
                    continue;
                }

                let from = source_pixels[sy as usize * src_width + sx as usize];
                let to = &mut target_pixels[ty as usize * target_width + tx as usize];
                *to = source_over(from, *to);
            }
        }
    }
}

/// Composite straight-alpha `src` over `dst`.
fn source_over(src: [u8; 4], dst: [u8; 4]) -> [u8; 4] {
    let sa = src[3] as u32;
    match sa {
        255 => src,
        0 => dst,
        _ => {
            let da = dst[3] as u32 * (255 - sa) / 255;
            let out_a = sa + da;
            let mut out = [0, 0, 0, out_a as u8];
            for c in 0..3 {
                out[c] = ((src[c] as u32 * sa + dst[c] as u32 * da) / out_a) as u8;
            }
            out
        }
    }
}
