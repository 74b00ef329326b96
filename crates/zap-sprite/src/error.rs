use std::fmt;

/// Errors raised while constructing sprites, grids or bitmaps.
///
/// Geometry never produces an error: out-of-bounds regions and grid cells
/// are valid views that simply draw clipped or empty.
#[derive(Debug)]
pub enum SpriteError {
    /// A precondition on the arguments was violated (bad data URL, zero cell size, ...).
    InvalidArgument(String),
    /// Pixel data could not be decoded.
    Decode(image::ImageError),
    /// Pixel data could not be encoded.
    Encode(image::ImageError),
}

impl SpriteError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

impl From<image::ImageError> for SpriteError {
    fn from(err: image::ImageError) -> Self {
        Self::Decode(err)
    }
}

impl fmt::Display for SpriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::Decode(err) => write!(f, "image decode error: {err}"),
            Self::Encode(err) => write!(f, "image encode error: {err}"),
        }
    }
}

impl std::error::Error for SpriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidArgument(_) => None,
            Self::Decode(err) | Self::Encode(err) => Some(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, SpriteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_display() {
        let err = SpriteError::invalid("cell width must be positive");
        assert_eq!(err.to_string(), "invalid argument: cell width must be positive");
        assert!(std::error::Error::source(&err).is_none());
    }
}
