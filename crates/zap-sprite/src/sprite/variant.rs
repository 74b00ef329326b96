//! The sprite value type and its construction entry points.

use glam::IVec2;
use image::RgbaImage;

use super::grid::GridView;
use super::region::RegionSprite;
use crate::bitmap::Bitmap;
use crate::core::geometry::{DestRect, Rect};
use crate::error::Result;
use crate::renderer::{Canvas, Drawable, RenderTarget};

/// An immutable, drawable rectangle of pixels.
///
/// Cloning is cheap: pixel buffers are shared, never copied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Sprite {
    /// Backed directly by a whole bitmap. Compares by buffer identity.
    Root(Bitmap),
    /// A crop of a root bitmap. Compares structurally.
    Region(RegionSprite),
}

impl Sprite {
    /// Wrap an existing bitmap, sharing its buffer.
    pub fn from_bitmap(bitmap: Bitmap) -> Self {
        Self::Root(bitmap)
    }

    /// Decode an in-memory encoded image (PNG, JPEG, ...).
    pub fn from_blob(bytes: &[u8]) -> Result<Self> {
        let bitmap = Bitmap::decode(bytes)?;
        log::debug!("decoded {}x{} sprite from {} byte blob", bitmap.width(), bitmap.height(), bytes.len());
        Ok(Self::Root(bitmap))
    }

    /// Copy the current content of a canvas.
    pub fn from_canvas(canvas: &Canvas) -> Self {
        Self::Root(canvas.to_bitmap())
    }

    /// Copy a decoded image.
    pub fn from_image(image: &RgbaImage) -> Self {
        Self::Root(Bitmap::from_image(image.clone()))
    }

    /// Decode a self-contained `data:` URL. Anything without inline data is
    /// rejected with `InvalidArgument`.
    pub fn from_data_url(url: &str) -> Result<Self> {
        Ok(Self::Root(Bitmap::from_data_url(url)?))
    }

    /// The bitmap whose pixels this sprite ultimately draws.
    pub fn origin(&self) -> &Bitmap {
        match self {
            Self::Root(bitmap) => bitmap,
            Self::Region(region) => region.origin(),
        }
    }

    /// The rectangle of [`origin`](Self::origin) this sprite draws.
    pub fn source_rect(&self) -> Rect {
        match self {
            Self::Root(bitmap) => bitmap.bounds(),
            Self::Region(region) => region.rect(),
        }
    }

    pub fn as_region(&self) -> Option<&RegionSprite> {
        match self {
            Self::Root(_) => None,
            Self::Region(region) => Some(region),
        }
    }

    /// A view of `rect` (relative to this sprite). Containment is not
    /// checked; regions outside a root draw clipped or empty. A view of a
    /// region is clipped to that region on every edge.
    pub fn extract_region(&self, rect: Rect) -> Sprite {
        match self {
            Self::Root(bitmap) => Self::Region(RegionSprite::new(bitmap.clone(), rect)),
            Self::Region(region) => Self::Region(region.extract(rect)),
        }
    }

    /// Partition this sprite into a grid of `cell_width` x `cell_height` cells.
    ///
    /// Fails with `InvalidArgument` when either cell dimension is zero.
    pub fn to_grid(&self, cell_width: u32, cell_height: u32) -> Result<GridView> {
        GridView::new(self.clone(), cell_width, cell_height)
    }
}

impl From<Bitmap> for Sprite {
    fn from(bitmap: Bitmap) -> Self {
        Self::Root(bitmap)
    }
}

impl From<RegionSprite> for Sprite {
    fn from(region: RegionSprite) -> Self {
        Self::Region(region)
    }
}

impl Drawable for Sprite {
    fn width(&self) -> u32 {
        match self {
            Self::Root(bitmap) => bitmap.width(),
            Self::Region(region) => region.width(),
        }
    }

    fn height(&self) -> u32 {
        match self {
            Self::Root(bitmap) => bitmap.height(),
            Self::Region(region) => region.height(),
        }
    }

    fn draw<T: RenderTarget + ?Sized>(&self, target: &mut T, x: i32, y: i32, scale: f32) {
        match self {
            Self::Root(bitmap) => {
                let dest = DestRect::scaled(IVec2::new(x, y), bitmap.size(), scale);
                target.draw_image_region(bitmap, bitmap.bounds(), dest);
            }
            Self::Region(region) => region.draw(target, x, y, scale),
        }
    }

    fn to_standalone_bitmap(&self, quality: Option<f32>) -> Bitmap {
        match self {
            Self::Root(bitmap) => bitmap.deep_copy(),
            Self::Region(region) => region.to_standalone_bitmap(quality),
        }
    }
}
