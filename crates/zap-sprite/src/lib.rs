pub mod assets;
pub mod bitmap;
pub mod core;
pub mod error;
pub mod renderer;
pub mod sprite;

// Re-export key types at crate root for convenience
pub use assets::manifest::{CellDescriptor, SheetDescriptor, SheetManifest};
pub use assets::registry::SpriteRegistry;
pub use bitmap::{Bitmap, DataUrl, EncodeFormat};
pub use self::core::geometry::{DestRect, GridCoord, Rect};
pub use error::{Result, SpriteError};
pub use renderer::{Canvas, Drawable, RenderTarget};
pub use sprite::{GridIter, GridKeys, GridView, RegionSprite, Sprite};
