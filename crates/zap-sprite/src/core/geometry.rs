//! Integer geometry shared by sprites, grids and render targets.

use glam::{IVec2, UVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Axis-aligned integer rectangle in pixel space.
///
/// The origin may be negative (a view may reach outside its source);
/// the size is non-negative by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle anchored at (0, 0).
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn origin(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    /// Exclusive bottom-right corner, widened to i64 so it cannot overflow.
    pub fn max_i64(&self) -> (i64, i64) {
        (
            self.x as i64 + self.width as i64,
            self.y as i64 + self.height as i64,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the pixel at (px, py) lies inside this rectangle.
    pub fn contains(&self, px: i64, py: i64) -> bool {
        let (max_x, max_y) = self.max_i64();
        px >= self.x as i64 && py >= self.y as i64 && px < max_x && py < max_y
    }

    /// Whether `other` lies entirely inside this rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        let (max_x, max_y) = self.max_i64();
        let (other_max_x, other_max_y) = other.max_i64();
        other.x >= self.x && other.y >= self.y && other_max_x <= max_x && other_max_y <= max_y
    }

    /// The overlapping part of two rectangles, if any.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let (max_x, max_y) = self.max_i64();
        let (other_max_x, other_max_y) = other.max_i64();
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = max_x.min(other_max_x);
        let y1 = max_y.min(other_max_y);
        if x1 <= x0 as i64 || y1 <= y0 as i64 {
            return None;
        }
        Some(Rect::new(x0, y0, (x1 - x0 as i64) as u32, (y1 - y0 as i64) as u32))
    }

    /// Move the rectangle by an offset.
    pub fn translate(&self, offset: IVec2) -> Self {
        Self::new(
            self.x.saturating_add(offset.x),
            self.y.saturating_add(offset.y),
            self.width,
            self.height,
        )
    }
}

/// Destination rectangle for a blit, in (possibly fractional) target pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DestRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl DestRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Destination for drawing a `size`d source at integer `pos`, scaled uniformly.
    pub fn scaled(pos: IVec2, size: UVec2, scale: f32) -> Self {
        let size = size.as_vec2() * scale;
        Self::new(pos.x as f32, pos.y as f32, size.x, size.y)
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// True when nothing can be drawn into this rectangle.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.x.is_finite() && self.y.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}

/// Integer cell address inside a sprite-sheet grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct GridCoord {
    pub col: i32,
    pub row: i32,
}

impl GridCoord {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

impl From<(i32, i32)> for GridCoord {
    fn from((col, row): (i32, i32)) -> Self {
        Self::new(col, row)
    }
}
