use image::{DynamicImage, RgbaImage};
use resvg::{tiny_skia, usvg};

use crate::domain::{ports::outbound::VectorRasterizer, AvatarError};

/// Renders SVG with resvg onto a white square canvas, stretching the drawing to fill it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResvgRasterizer;

impl VectorRasterizer for ResvgRasterizer {
    fn rasterize(&self, markup: &[u8], size: u32) -> Result<DynamicImage, AvatarError> {
        let options = usvg::Options::default();
        let tree = usvg::Tree::from_data(markup, &options)
            .map_err(|err| AvatarError::invalid_vector(err.to_string()))?;

        let mut pixmap = tiny_skia::Pixmap::new(size, size)
            .ok_or_else(|| AvatarError::invalid_vector("cannot allocate an empty canvas"))?;
        pixmap.fill(tiny_skia::Color::WHITE);

        let drawing = tree.size();
        let transform = tiny_skia::Transform::from_scale(
            size as f32 / drawing.width(),
            size as f32 / drawing.height(),
        );
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        // The canvas is opaque, so premultiplied and straight RGBA are identical.
        let rgba = RgbaImage::from_raw(size, size, pixmap.take()).ok_or(AvatarError::InvalidImage)?;
        Ok(DynamicImage::ImageRgba8(rgba))
    }
}
