mod image_codec;
mod svg_rasterizer;

pub use image_codec::*;
pub use svg_rasterizer::*;
