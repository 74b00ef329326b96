//! Contracts between sprites and whatever they draw onto.
//!
//! A sprite never rasterizes anything itself: every draw is a single
//! cropped-and-scaled blit issued against a [`RenderTarget`]. The software
//! [`Canvas`](super::canvas::Canvas) is one such target; a platform backend
//! (Canvas2D, a GPU texture upload, ...) is another.

use crate::bitmap::Bitmap;
use crate::core::geometry::{DestRect, Rect};

/// A surface that can receive cropped, scaled bitmap blits.
pub trait RenderTarget {
    /// Draw the `src` rectangle of `source` into the `dest` rectangle.
    ///
    /// Parts of `src` outside `source`, and parts of `dest` outside the
    /// target, are clipped. Degenerate rectangles draw nothing. Never fails.
    fn draw_image_region(&mut self, source: &Bitmap, src: Rect, dest: DestRect);
}

/// Something with a size that can be drawn and exported as a bitmap.
pub trait Drawable {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Blit onto `target` with the top-left corner at (x, y), scaled
    /// uniformly by `scale`.
    fn draw<T: RenderTarget + ?Sized>(&self, target: &mut T, x: i32, y: i32, scale: f32);

    /// Blit at (x, y) without scaling.
    fn draw_at<T: RenderTarget + ?Sized>(&self, target: &mut T, x: i32, y: i32) {
        self.draw(target, x, y, 1.0);
    }

    /// Render the current content into a new bitmap that shares nothing
    /// with the source. `quality` is an encoder hint and is ignored when
    /// the result stays in raw RGBA form.
    fn to_standalone_bitmap(&self, quality: Option<f32>) -> Bitmap;
}
