pub mod pixels;
pub mod data_url;

pub use pixels::{Bitmap, EncodeFormat};
pub use data_url::DataUrl;
