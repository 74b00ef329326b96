pub mod canvas;
pub mod traits;

pub use canvas::Canvas;
pub use traits::{Drawable, RenderTarget};
