//! Lazily enumerated grid views over a sprite sheet.

use std::iter::FusedIterator;

use super::variant::Sprite;
use crate::core::geometry::{GridCoord, Rect};
use crate::error::{Result, SpriteError};
use crate::renderer::Drawable;

/// A read-only mapping from grid coordinates to cells of a parent sprite.
///
/// Nothing is materialized: every lookup recomputes the cell's region from
/// the coordinate. Keys are the fully contained cells, enumerated in
/// row-major order (row outer, column inner). A trailing partial row or
/// column is not part of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GridView {
    parent: Sprite,
    cell_width: u32,
    cell_height: u32,
}

impl GridView {
    /// Fails with `InvalidArgument` when either cell dimension is zero.
    pub fn new(parent: Sprite, cell_width: u32, cell_height: u32) -> Result<Self> {
        if cell_width == 0 || cell_height == 0 {
            return Err(SpriteError::invalid(format!(
                "grid cells must have a positive size, got {cell_width}x{cell_height}"
            )));
        }
        let view = Self {
            parent,
            cell_width,
            cell_height,
        };
        log::debug!(
            "grid of {}x{} cells over {}x{} sprite: {} columns, {} rows",
            cell_width,
            cell_height,
            view.parent.width(),
            view.parent.height(),
            view.columns(),
            view.rows()
        );
        Ok(view)
    }

    pub fn parent(&self) -> &Sprite {
        &self.parent
    }

    pub fn cell_width(&self) -> u32 {
        self.cell_width
    }

    pub fn cell_height(&self) -> u32 {
        self.cell_height
    }

    /// Number of whole columns.
    pub fn columns(&self) -> u32 {
        self.parent.width() / self.cell_width
    }

    /// Number of whole rows.
    pub fn rows(&self) -> u32 {
        self.parent.height() / self.cell_height
    }

    pub fn len(&self) -> usize {
        self.columns() as usize * self.rows() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    /// The cell's rectangle in parent pixel space, whether or not it is in range.
    pub fn cell_rect(&self, coord: GridCoord) -> Rect {
        Rect::new(
            scaled_offset(coord.col, self.cell_width),
            scaled_offset(coord.row, self.cell_height),
            self.cell_width,
            self.cell_height,
        )
    }

    /// The sprite for a cell. Never fails: out-of-range coordinates give a
    /// view that draws clipped or empty.
    pub fn get(&self, coord: impl Into<GridCoord>) -> Sprite {
        self.parent.extract_region(self.cell_rect(coord.into()))
    }

    /// Whether the cell lies entirely inside the parent.
    pub fn contains_key(&self, coord: impl Into<GridCoord>) -> bool {
        let coord = coord.into();
        if coord.col < 0 || coord.row < 0 {
            return false;
        }
        let right = (coord.col as i64 + 1) * self.cell_width as i64;
        let bottom = (coord.row as i64 + 1) * self.cell_height as i64;
        right <= self.parent.width() as i64 && bottom <= self.parent.height() as i64
    }

    /// Every valid coordinate, row by row. Each call starts a fresh pass.
    pub fn keys(&self) -> GridKeys {
        GridKeys::new(self.columns(), self.rows())
    }

    /// The cell sprites, in key order.
    pub fn values(&self) -> impl Iterator<Item = Sprite> + '_ {
        self.iter().map(|(_, sprite)| sprite)
    }

    /// `(coord, sprite)` pairs, in key order.
    pub fn iter(&self) -> GridIter<'_> {
        GridIter {
            view: self,
            keys: self.keys(),
        }
    }
}

fn scaled_offset(index: i32, cell: u32) -> i32 {
    (index as i64 * cell as i64).clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

impl<'a> IntoIterator for &'a GridView {
    type Item = (GridCoord, Sprite);
    type IntoIter = GridIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Row-major iterator over the coordinates of a grid.
#[derive(Debug, Clone)]
pub struct GridKeys {
    columns: u32,
    index: usize,
    end: usize,
}

impl GridKeys {
    fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            index: 0,
            end: columns as usize * rows as usize,
        }
    }
}

impl Iterator for GridKeys {
    type Item = GridCoord;

    fn next(&mut self) -> Option<GridCoord> {
        if self.index >= self.end {
            return None;
        }
        let columns = self.columns as usize;
        let coord = GridCoord::new((self.index % columns) as i32, (self.index / columns) as i32);
        self.index += 1;
        Some(coord)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridKeys {}

impl FusedIterator for GridKeys {}

/// Iterator over `(coord, sprite)` pairs of a grid.
#[derive(Debug, Clone)]
pub struct GridIter<'a> {
    view: &'a GridView,
    keys: GridKeys,
}

impl Iterator for GridIter<'_> {
    type Item = (GridCoord, Sprite);

    fn next(&mut self) -> Option<Self::Item> {
        let coord = self.keys.next()?;
        Some((coord, self.view.get(coord)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl ExactSizeIterator for GridIter<'_> {}

impl FusedIterator for GridIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::Bitmap;
    use crate::renderer::Canvas;
    use std::collections::HashSet;

    fn sheet(width: u32, height: u32) -> Sprite {
        Sprite::from_canvas(&Canvas::filled(width, height, [10, 20, 30, 255]))
    }

    #[test]
    fn hundred_by_fifty_at_25() {
        let grid = sheet(100, 50).to_grid(25, 25).unwrap();
        assert_eq!(grid.len(), 8);
        assert_eq!((grid.columns(), grid.rows()), (4, 2));

        let cell = grid.get(GridCoord::new(3, 1));
        let region = cell.as_region().expect("cells are regions");
        assert_eq!(region.offset_x(), 75);
        assert_eq!(region.offset_y(), 25);
        assert_eq!((cell.width(), cell.height()), (25, 25));
    }

    #[test]
    fn length_matches_floor_formula() {
        for (w, h, cw, ch) in [(100, 50, 25, 25), (101, 49, 25, 25), (7, 7, 3, 2), (64, 16, 16, 16), (5, 5, 1, 1)] {
            let grid = sheet(w, h).to_grid(cw, ch).unwrap();
            let expected = (w / cw) as usize * (h / ch) as usize;
            assert_eq!(grid.len(), expected, "{w}x{h} at {cw}x{ch}");
            assert_eq!(grid.keys().count(), expected);
            assert_eq!(grid.keys().len(), expected);
        }
    }

    #[test]
    fn every_key_is_contained_and_cell_sized() {
        let grid = sheet(70, 45).to_grid(20, 15).unwrap();
        for coord in grid.keys() {
            assert!(grid.contains_key(coord));
            let cell = grid.get(coord);
            assert_eq!((cell.width(), cell.height()), (20, 15));
        }
    }

    #[test]
    fn partial_trailing_cells_are_excluded() {
        let grid = sheet(70, 45).to_grid(20, 15).unwrap();
        assert!(grid.contains_key((2, 2)));
        assert!(!grid.contains_key((3, 0)));
        assert!(!grid.contains_key((0, 3)));
        assert!(!grid.contains_key((-1, 0)));
        assert!(!grid.contains_key((0, -1)));
    }

    #[test]
    fn enumeration_is_row_major_and_restartable() {
        let grid = sheet(30, 20).to_grid(10, 10).unwrap();
        let first: Vec<GridCoord> = grid.keys().collect();
        let expected: Vec<GridCoord> = [(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]
            .into_iter()
            .map(GridCoord::from)
            .collect();
        assert_eq!(first, expected);
        assert_eq!(grid.keys().collect::<Vec<_>>(), first);

        let keys = grid.keys();
        let copy = keys.clone();
        assert_eq!(keys.count(), copy.count());
    }

    #[test]
    fn values_and_pairs_follow_keys() {
        let grid = sheet(30, 20).to_grid(10, 10).unwrap();
        let values: Vec<Sprite> = grid.values().collect();
        let keys: Vec<GridCoord> = grid.keys().collect();
        assert_eq!(values.len(), keys.len());
        for ((coord, sprite), value) in (&grid).into_iter().zip(&values) {
            assert_eq!(&sprite, value);
            assert_eq!(sprite, grid.get(coord));
        }

        let unique: HashSet<Sprite> = values.into_iter().collect();
        assert_eq!(unique.len(), 6);
    }

    #[test]
    fn oversized_cells_give_empty_grid() {
        let grid = sheet(10, 10).to_grid(11, 5).unwrap();
        assert_eq!(grid.len(), 0);
        assert!(grid.is_empty());
        assert!(!grid.is_not_empty());
        assert_eq!(grid.keys().next(), None);
        assert_eq!(grid.values().count(), 0);
    }

    #[test]
    fn out_of_range_get_is_a_view_not_an_error() {
        let root = sheet(20, 20);
        let grid = root.to_grid(10, 10).unwrap();
        let cell = grid.get((5, -2));
        assert_eq!(cell.source_rect(), Rect::new(50, -20, 10, 10));

        let mut canvas = Canvas::new(10, 10);
        cell.draw_at(&mut canvas, 0, 0);
        assert_eq!(canvas, Canvas::new(10, 10));
    }

    #[test]
    fn grid_over_region_flattens_to_root() {
        let data: Vec<u8> = (0..16 * 16).flat_map(|i| [i as u8, 0, 0, 255]).collect();
        let root = Sprite::from_bitmap(Bitmap::from_rgba(16, 16, data).unwrap());
        let half = root.extract_region(Rect::new(8, 0, 8, 16));
        let grid = half.to_grid(4, 4).unwrap();

        assert_eq!(grid.len(), 8);
        let cell = grid.get((1, 2));
        assert_eq!(cell.origin(), root.origin());
        assert_eq!(cell.source_rect(), Rect::new(12, 8, 4, 4));
        assert_eq!(cell, root.extract_region(Rect::new(12, 8, 4, 4)));

        let mut canvas = Canvas::new(4, 4);
        cell.draw_at(&mut canvas, 0, 0);
        assert_eq!(canvas.pixel(0, 0), root.origin().pixel(12, 8));
    }

    #[test]
    fn separately_built_grids_agree() {
        let root = sheet(40, 40);
        let a = root.to_grid(10, 10).unwrap();
        let b = root.to_grid(10, 10).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.get((2, 3)), b.get((2, 3)));
        assert_ne!(a, root.to_grid(10, 20).unwrap());
    }
}
