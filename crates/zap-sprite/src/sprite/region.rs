//! Rectangular views into a root bitmap.

use glam::IVec2;

use crate::bitmap::Bitmap;
use crate::core::geometry::{DestRect, Rect};
use crate::renderer::{Canvas, Drawable, RenderTarget};

/// A sprite defined as a crop of a root bitmap, resolved at draw time.
///
/// The origin is always the ultimate backing bitmap: extracting a region of
/// a region composes the offsets instead of nesting views, so drawing costs
/// one blit regardless of how the view was derived.
///
/// Equality and hashing are structural over (origin identity, rect).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegionSprite {
    origin: Bitmap,
    rect: Rect,
}

impl RegionSprite {
    /// Create a view of `rect` within `origin`. Containment is not checked.
    pub fn new(origin: Bitmap, rect: Rect) -> Self {
        Self { origin, rect }
    }

    pub fn origin(&self) -> &Bitmap {
        &self.origin
    }

    /// The crop rectangle in origin pixel space.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn offset_x(&self) -> i32 {
        self.rect.x
    }

    pub fn offset_y(&self) -> i32 {
        self.rect.y
    }

    /// Whether the crop lies entirely inside the origin bitmap.
    pub fn is_within_origin(&self) -> bool {
        self.origin.bounds().contains_rect(&self.rect)
    }

    /// Extract `rect` (relative to this view) as a view of the same origin.
    ///
    /// Offsets compose and the result is clipped to this view on every edge,
    /// so a nested view never reaches origin pixels outside its parent. When
    /// the near edge is clipped, the visible part is drawn at the draw position.
    pub fn extract(&self, rect: Rect) -> Self {
        let (x, width) = clip_span(rect.x, rect.width, self.rect.width);
        let (y, height) = clip_span(rect.y, rect.height, self.rect.height);
        let offset = self.rect.origin();

        Self::new(
            self.origin.clone(),
            Rect::new(x, y, width, height).translate(offset),
        )
    }

    /// The rectangle of the origin a standalone export covers.
    ///
    /// Normally the whole view. A view whose pixel buffer would overflow, or
    /// would be larger than both the origin and `MAX_UNCLIPPED_EXPORT_BYTES`,
    /// is cut down to the part that overlaps the origin.
    fn export_rect(&self) -> Rect {
        let origin_len = rgba_len(self.origin.width(), self.origin.height()).unwrap_or(usize::MAX);
        let limit = origin_len.max(MAX_UNCLIPPED_EXPORT_BYTES);
        match rgba_len(self.rect.width, self.rect.height) {
            Some(len) if len <= limit => self.rect,
            _ => {
                let clipped = self.origin.bounds().intersect(&self.rect).unwrap_or_default();
                log::warn!(
                    "exporting {:?} of a {}x{} bitmap: clipped to {:?}",
                    self.rect,
                    self.origin.width(),
                    self.origin.height(),
                    clipped
                );
                clipped
            }
        }
    }
}

/// Exports up to this size keep their exact dimensions even outside the origin.
const MAX_UNCLIPPED_EXPORT_BYTES: usize = 4096 * 4096 * 4;

fn rgba_len(width: u32, height: u32) -> Option<usize> {
    (width as usize).checked_mul(height as usize)?.checked_mul(4)
}

/// Clip the span `start..start + len` to `0..limit`, returning the new start and length.
fn clip_span(start: i32, len: u32, limit: u32) -> (i32, u32) {
    let lo = (start as i64).clamp(0, limit as i64);
    let hi = (start as i64 + len as i64).clamp(0, limit as i64);
    (lo as i32, (hi - lo).max(0) as u32)
}

impl Drawable for RegionSprite {
    fn width(&self) -> u32 {
        self.rect.width
    }

    fn height(&self) -> u32 {
        self.rect.height
    }

    fn draw<T: RenderTarget + ?Sized>(&self, target: &mut T, x: i32, y: i32, scale: f32) {
        let dest = DestRect::scaled(IVec2::new(x, y), self.rect.size(), scale);
        target.draw_image_region(&self.origin, self.rect, dest);
    }

    fn to_standalone_bitmap(&self, quality: Option<f32>) -> Bitmap {
        if quality.is_some() {
            log::trace!("quality hint ignored for raw RGBA export");
        }
        let crop = self.export_rect();
        let mut canvas = Canvas::new(crop.width, crop.height);
        let dest = DestRect::new(0.0, 0.0, crop.width as f32, crop.height as f32);
        canvas.draw_image_region(&self.origin, crop, dest);
        canvas.into_bitmap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sheet() -> Bitmap {
        let data: Vec<u8> = (0..8 * 4)
            .flat_map(|i| [i as u8, 0, 0, 255])
            .collect();
        Bitmap::from_rgba(8, 4, data).unwrap()
    }

    #[test]
    fn structural_equality() {
        let origin = sheet();
        let a = RegionSprite::new(origin.clone(), Rect::new(2, 1, 3, 2));
        let b = RegionSprite::new(origin.clone(), Rect::new(2, 1, 3, 2));
        assert_eq!(a, b);

        let set: HashSet<RegionSprite> = [a.clone(), b].into_iter().collect();
        assert_eq!(set.len(), 1);

        for changed in [
            Rect::new(3, 1, 3, 2),
            Rect::new(2, 2, 3, 2),
            Rect::new(2, 1, 4, 2),
            Rect::new(2, 1, 3, 1),
        ] {
            assert_ne!(a, RegionSprite::new(origin.clone(), changed));
        }
    }

    #[test]
    fn different_origins_are_not_equal() {
        let a = RegionSprite::new(sheet(), Rect::new(0, 0, 2, 2));
        let b = RegionSprite::new(sheet(), Rect::new(0, 0, 2, 2));
        assert_ne!(a, b);
    }

    #[test]
    fn nested_extraction_flattens() {
        let origin = sheet();
        let outer = RegionSprite::new(origin.clone(), Rect::new(2, 1, 4, 3));
        let inner = outer.extract(Rect::new(1, 1, 2, 2));
        assert_eq!(inner, RegionSprite::new(origin, Rect::new(3, 2, 2, 2)));
    }

    #[test]
    fn nested_extraction_clamps_to_parent() {
        let origin = sheet();
        let outer = RegionSprite::new(origin.clone(), Rect::new(2, 1, 4, 3));

        let overhang = outer.extract(Rect::new(3, 2, 5, 5));
        assert_eq!(overhang.rect(), Rect::new(5, 3, 1, 1));

        let outside = outer.extract(Rect::new(10, 0, 2, 2));
        assert_eq!(outside.width(), 0);
        assert_eq!(outside.height(), 2);

        let negative = outer.extract(Rect::new(-1, 0, 2, 2));
        assert_eq!(negative.rect(), Rect::new(2, 1, 1, 2));
    }

    #[test]
    fn nested_view_stays_inside_parent() {
        let origin = sheet();
        let outer = RegionSprite::new(origin.clone(), Rect::new(2, 1, 4, 3));
        let nested = outer.extract(Rect::new(-1, 0, 2, 2));

        let mut canvas = Canvas::new(2, 2);
        nested.draw_at(&mut canvas, 0, 0);
        assert_eq!(canvas.pixel(0, 0), origin.pixel(2, 1));
        assert_eq!(canvas.pixel(1, 0), Some([0, 0, 0, 0]));
        assert!(canvas.as_image().pixels().all(|p| p.0 != origin.pixel(1, 1).unwrap()));
    }

    #[test]
    fn draw_crops_from_origin() {
        let origin = sheet();
        let region = RegionSprite::new(origin.clone(), Rect::new(5, 2, 2, 1));
        let mut canvas = Canvas::new(4, 4);
        region.draw_at(&mut canvas, 1, 3);

        assert_eq!(canvas.pixel(1, 3), origin.pixel(5, 2));
        assert_eq!(canvas.pixel(2, 3), origin.pixel(6, 2));
        assert_eq!(canvas.pixel(3, 3), Some([0, 0, 0, 0]));
    }

    #[test]
    fn scaled_draw_covers_scaled_area() {
        let origin = sheet();
        let region = RegionSprite::new(origin.clone(), Rect::new(0, 0, 2, 2));
        let mut canvas = Canvas::new(4, 4);
        region.draw(&mut canvas, 0, 0, 2.0);

        assert_eq!(canvas.pixel(1, 1), origin.pixel(0, 0));
        assert_eq!(canvas.pixel(3, 3), origin.pixel(1, 1));
    }

    #[test]
    fn out_of_bounds_region_draws_nothing() {
        let region = RegionSprite::new(sheet(), Rect::new(100, 100, 2, 2));
        assert!(!region.is_within_origin());
        let mut canvas = Canvas::new(2, 2);
        region.draw_at(&mut canvas, 0, 0);
        assert_eq!(canvas, Canvas::new(2, 2));
    }

    #[test]
    fn standalone_bitmap_copies_crop() {
        let origin = sheet();
        let region = RegionSprite::new(origin.clone(), Rect::new(4, 1, 3, 2));
        let first = region.to_standalone_bitmap(None);
        let second = region.to_standalone_bitmap(Some(0.5));

        assert_eq!((first.width(), first.height()), (3, 2));
        assert_eq!(first.pixel(0, 0), origin.pixel(4, 1));
        assert_eq!(first.pixel(2, 1), origin.pixel(6, 2));
        assert_eq!(first.as_raw(), second.as_raw());
        assert_ne!(first, second);
        assert_ne!(first, origin);
    }

    #[test]
    fn standalone_bitmap_keeps_size_past_origin_edge() {
        let origin = sheet();
        let region = RegionSprite::new(origin.clone(), Rect::new(6, 3, 4, 2));
        let bmp = region.to_standalone_bitmap(None);

        assert_eq!((bmp.width(), bmp.height()), (4, 2));
        assert_eq!(bmp.pixel(1, 0), origin.pixel(7, 3));
        assert_eq!(bmp.pixel(2, 0), Some([0, 0, 0, 0]));
        assert_eq!(bmp.pixel(0, 1), Some([0, 0, 0, 0]));
    }

    #[test]
    fn huge_standalone_export_is_clipped_to_origin() {
        let origin = sheet();
        let region = RegionSprite::new(origin.clone(), Rect::new(0, 0, u32::MAX, u32::MAX));
        let bmp = region.to_standalone_bitmap(None);
        assert_eq!((bmp.width(), bmp.height()), (8, 4));
        assert_eq!(bmp.as_raw(), origin.as_raw());

        let offset = RegionSprite::new(origin.clone(), Rect::new(-3, 2, 100_000, 100_000));
        let bmp = offset.to_standalone_bitmap(None);
        assert_eq!((bmp.width(), bmp.height()), (8, 2));
        assert_eq!(bmp.pixel(0, 0), origin.pixel(0, 2));

        let outside = RegionSprite::new(origin, Rect::new(i32::MAX, 0, u32::MAX, u32::MAX));
        let bmp = outside.to_standalone_bitmap(None);
        assert_eq!((bmp.width(), bmp.height()), (0, 0));
    }
}
