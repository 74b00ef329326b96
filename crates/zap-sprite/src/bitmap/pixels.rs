//! Immutable, shared RGBA8 pixel resources.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use glam::UVec2;
use image::RgbaImage;

use super::data_url::DataUrl;
use crate::core::geometry::Rect;
use crate::error::{Result, SpriteError};

/// Output format for [`Bitmap::encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodeFormat {
    #[default]
    Png,
    Jpeg,
}

impl EncodeFormat {
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

/// A decoded RGBA8 bitmap.
///
/// Cloning shares the pixel buffer. Equality and hashing follow the identity
/// of the backing buffer: two bitmaps with identical pixels but separate
/// buffers are never equal.
#[derive(Clone)]
pub struct Bitmap {
    pixels: Arc<RgbaImage>,
}

impl Bitmap {
    /// Take ownership of a decoded image.
    pub fn from_image(image: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(image),
        }
    }

    /// Wrap a raw RGBA8 buffer (4 bytes per pixel, row-major).
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        let actual = data.len();
        RgbaImage::from_raw(width, height, data)
            .map(Self::from_image)
            .ok_or_else(|| {
                SpriteError::invalid(format!(
                    "{width}x{height} bitmap needs {expected} bytes of RGBA data, got {actual}"
                ))
            })
    }

    /// Decode an encoded image (PNG, JPEG, ... depending on enabled features).
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)?;
        Ok(Self::from_image(image.into_rgba8()))
    }

    /// Decode the inline payload of a `data:` URL.
    pub fn from_data_url(url: &str) -> Result<Self> {
        let bytes = DataUrl::parse(url)?.decode()?;
        Self::decode(&bytes)
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width(), self.height())
    }

    /// The full extent of the bitmap, anchored at (0, 0).
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width(), self.height())
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// Pixels as `[r, g, b, a]` quads in row-major order.
    pub fn pixels(&self) -> &[[u8; 4]] {
        bytemuck::cast_slice(self.pixels.as_raw())
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.pixels.get_pixel(x, y).0)
    }

    /// Copy the pixels into a new, independent buffer.
    pub fn deep_copy(&self) -> Self {
        Self::from_image(RgbaImage::clone(&self.pixels))
    }

    /// Whether both bitmaps share the same backing buffer.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }

    /// Encode the bitmap. `quality` (0.0..=1.0) is only meaningful for JPEG.
    pub fn encode(&self, format: EncodeFormat, quality: Option<f32>) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        match format {
            EncodeFormat::Png => self.encode_png(&mut out)?,
            EncodeFormat::Jpeg => self.encode_jpeg(&mut out, quality)?,
        }
        log::trace!(
            "encoded {}x{} bitmap as {} ({} bytes)",
            self.width(),
            self.height(),
            format.mime(),
            out.len()
        );
        Ok(out)
    }

    /// Encode the bitmap as a base64 `data:` URL.
    pub fn to_data_url(&self, format: EncodeFormat, quality: Option<f32>) -> Result<String> {
        let bytes = self.encode(format, quality)?;
        Ok(DataUrl::encode(format.mime(), &bytes))
    }

    #[cfg(feature = "png")]
    fn encode_png(&self, out: &mut Vec<u8>) -> Result<()> {
        use image::codecs::png::PngEncoder;
        use image::{ExtendedColorType, ImageEncoder};

        PngEncoder::new(out)
            .write_image(self.as_raw(), self.width(), self.height(), ExtendedColorType::Rgba8)
            .map_err(SpriteError::Encode)
    }

    #[cfg(not(feature = "png"))]
    fn encode_png(&self, _out: &mut Vec<u8>) -> Result<()> {
        Err(SpriteError::invalid("PNG support is not enabled"))
    }

    #[cfg(feature = "jpeg")]
    fn encode_jpeg(&self, out: &mut Vec<u8>, quality: Option<f32>) -> Result<()> {
        use image::codecs::jpeg::JpegEncoder;
        use image::{DynamicImage, ExtendedColorType, ImageEncoder};

        let quality = jpeg_quality(quality);
        // JPEG has no alpha channel.
        let rgb = DynamicImage::ImageRgba8(RgbaImage::clone(&self.pixels)).into_rgb8();
        JpegEncoder::new_with_quality(out, quality)
            .write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
            .map_err(SpriteError::Encode)
    }

    #[cfg(not(feature = "jpeg"))]
    fn encode_jpeg(&self, _out: &mut Vec<u8>, _quality: Option<f32>) -> Result<()> {
        Err(SpriteError::invalid("JPEG support is not enabled"))
    }
}

/// Map a 0.0..=1.0 quality hint onto the encoder's 1..=100 scale.
#[cfg_attr(not(feature = "jpeg"), allow(dead_code))]
fn jpeg_quality(quality: Option<f32>) -> u8 {
    match quality {
        Some(q) if q.is_finite() => (q.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8,
        _ => 92,
    }
}

impl PartialEq for Bitmap {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Bitmap {}

impl Hash for Bitmap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.pixels) as usize).hash(state);
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("buffer", &Arc::as_ptr(&self.pixels))
            .finish()
    }
}
