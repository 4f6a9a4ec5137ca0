use std::path::Path;

use base64::prelude::*;
use image::{codecs::jpeg::JpegEncoder, imageops::FilterType, DynamicImage, ExtendedColorType, ImageEncoder};
use tracing::{debug, warn};

use crate::domain::{
    models::{looks_like_svg, AvatarExtension, AvatarInput, AvatarKind, NormalizedAvatar},
    ports::outbound::{RasterCodec, VectorRasterizer},
    AvatarError,
};

/// Edge length of every normalized avatar.
pub const AVATAR_SIZE: u32 = 96;
pub const JPEG_QUALITY: u8 = 90;

/// SVGs are rendered this many times larger than the thumbnail before downsampling.
const SVG_OVERSAMPLE: u32 = 4;

/// Turns avatar files into 96x96 JPEG thumbnails.
///
/// Which decoders exist is decided when the normalizer is built: without a
/// [`VectorRasterizer`] SVG files are validated and passed through unchanged.
pub struct AvatarNormalizer {
    codec: Box<dyn RasterCodec>,
    rasterizer: Option<Box<dyn VectorRasterizer>>,
}

impl AvatarNormalizer {
    pub fn new(codec: impl RasterCodec) -> Self {
        Self {
            codec: Box::new(codec),
            rasterizer: None,
        }
    }

    pub fn with_rasterizer(mut self, rasterizer: impl VectorRasterizer) -> Self {
        self.rasterizer = Some(Box::new(rasterizer));
        self
    }

    pub fn can_rasterize_svg(&self) -> bool {
        self.rasterizer.is_some()
    }

    pub fn normalize(&self, path: &Path) -> Result<NormalizedAvatar, AvatarError> {
        let input = read_input(path)?;
        debug!(path = %input.path.display(), kind = ?input.kind, "normalizing avatar");

        if input.kind.is_vector() {
            self.normalize_vector(&input)
        } else {
            self.normalize_raster(&input)
        }
    }

    fn normalize_raster(&self, input: &AvatarInput) -> Result<NormalizedAvatar, AvatarError> {
        let image = self.codec.decode(&input.bytes)?;
        if image.width() == 0 || image.height() == 0 {
            return Err(AvatarError::InvalidImage);
        }

        let jpeg = encode_thumbnail(&image, FilterType::Triangle)?;
        Ok(NormalizedAvatar::new(
            BASE64_STANDARD.encode(jpeg),
            AvatarExtension::Jpg,
        ))
    }

    fn normalize_vector(&self, input: &AvatarInput) -> Result<NormalizedAvatar, AvatarError> {
        match &self.rasterizer {
            Some(rasterizer) => {
                let image = rasterizer.rasterize(&input.bytes, AVATAR_SIZE * SVG_OVERSAMPLE)?;
                let jpeg = encode_thumbnail(&image, FilterType::Lanczos3)?;
                Ok(NormalizedAvatar::new(
                    BASE64_STANDARD.encode(jpeg),
                    AvatarExtension::Jpg,
                ))
            }
            None => {
                validate_svg_markup(&input.bytes)?;
                warn!(
                    path = %input.path.display(),
                    "no SVG rasterizer configured, storing the SVG as is; consumers must render SVG avatars natively"
                );
                Ok(NormalizedAvatar::new(
                    BASE64_STANDARD.encode(&input.bytes),
                    AvatarExtension::Svg,
                ))
            }
        }
    }
}

fn read_input(path: &Path) -> Result<AvatarInput, AvatarError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(AvatarError::FileNotFound(path.to_path_buf()));
        }
        Err(err) => return Err(err.into()),
    };

    Ok(AvatarInput {
        path: path.to_path_buf(),
        kind: detect_kind(path, &bytes),
        bytes,
    })
}

/// Extension first, then the guessed media type, then the leading bytes.
pub fn detect_kind(path: &Path, bytes: &[u8]) -> AvatarKind {
    let svg_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    let svg_media_type = mime_guess::from_path(path)
        .iter()
        .any(|mime| mime.essence_str() == "image/svg+xml");

    if svg_extension || svg_media_type || looks_like_svg(bytes) {
        return AvatarKind::Svg;
    }

    AvatarKind::sniff(bytes)
}

/// Accepts well-formed XML whose root is `<svg>` with an explicit closing tag.
pub fn validate_svg_markup(bytes: &[u8]) -> Result<(), AvatarError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| AvatarError::invalid_vector("markup is not valid UTF-8"))?;

    let mut options = roxmltree::ParsingOptions::default();
    options.allow_dtd = true;
    let document = roxmltree::Document::parse_with_options(text, options)
        .map_err(|err| AvatarError::invalid_vector(err.to_string()))?;

    let root = document.root_element().tag_name().name();
    if root != "svg" {
        return Err(AvatarError::invalid_vector(format!(
            "root element is <{root}>, expected <svg>"
        )));
    }
    if !text.contains("</svg") {
        return Err(AvatarError::invalid_vector("missing closing </svg> tag"));
    }

    Ok(())
}

/// Stretches to a square thumbnail (aspect ratio is not kept) and encodes it as JPEG.
fn encode_thumbnail(image: &DynamicImage, filter: FilterType) -> Result<Vec<u8>, AvatarError> {
    let thumbnail = image.resize_exact(AVATAR_SIZE, AVATAR_SIZE, filter).to_rgb8();

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY)
        .write_image(
            thumbnail.as_raw(),
            thumbnail.width(),
            thumbnail.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|err| AvatarError::Encode(err.to_string()))?;

    Ok(jpeg)
}
