pub mod grid;
pub mod region;
pub mod variant;

pub use grid::{GridIter, GridKeys, GridView};
pub use region::RegionSprite;
pub use variant::Sprite;
