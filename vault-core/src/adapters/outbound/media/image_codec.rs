use image::{DynamicImage, ImageError};

use crate::domain::{ports::outbound::RasterCodec, AvatarError};

/// Raster decoding through the `image` crate, limited to the codecs compiled in
/// (JPEG, PNG and GIF).
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateCodec;

impl RasterCodec for ImageCrateCodec {
    fn decode(&self, input: &[u8]) -> Result<DynamicImage, AvatarError> {
        image::load_from_memory(input).map_err(|err| match err {
            ImageError::Unsupported(_) => AvatarError::UnsupportedFormat,
            _ => AvatarError::InvalidImage,
        })
    }
}
