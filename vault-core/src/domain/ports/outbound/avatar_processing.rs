use image::DynamicImage;

use crate::domain::AvatarError;

/// Decodes raster containers (JPEG, PNG, GIF at minimum).
pub trait RasterCodec: Send + Sync + 'static {
    /// Fails with `UnsupportedFormat` when the container is not recognized and with
    /// `InvalidImage` when it is recognized but cannot be decoded.
    fn decode(&self, input: &[u8]) -> Result<DynamicImage, AvatarError>;
}

/// Renders vector markup onto an opaque white canvas.
pub trait VectorRasterizer: Send + Sync + 'static {
    /// `size` is the edge length of the square canvas in pixels.
    fn rasterize(&self, markup: &[u8], size: u32) -> Result<DynamicImage, AvatarError>;
}
