use std::fmt;
use std::path::PathBuf;

/// How many leading bytes of an avatar are inspected when sniffing its kind.
pub const SNIFF_LEN: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarKind {
    Jpeg,
    Png,
    Gif,
    Svg,
    Unknown,
}

impl AvatarKind {
    /// Classifies raster containers by magic bytes. Markup is reported as `Svg`.
    pub fn sniff(head: &[u8]) -> Self {
        if head.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Self::Jpeg
        } else if head.starts_with(b"\x89PNG\r\n\x1a\n") {
            Self::Png
        } else if head.starts_with(b"GIF87a") || head.starts_with(b"GIF89a") {
            Self::Gif
        } else if looks_like_svg(head) {
            Self::Svg
        } else {
            Self::Unknown
        }
    }

    pub fn is_vector(self) -> bool {
        matches!(self, Self::Svg)
    }
}

/// True when the first [`SNIFF_LEN`] bytes contain an `<svg` root tag or an XML prolog.
pub fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(SNIFF_LEN)];
    let text = String::from_utf8_lossy(head).to_ascii_lowercase();
    text.contains("<svg") || text.contains("<?xml")
}

/// An avatar source file whose kind has been detected. Lives for one normalization call.
#[derive(Debug, Clone)]
pub struct AvatarInput {
    pub path: PathBuf,
    pub kind: AvatarKind,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarExtension {
    Jpg,
    Svg,
}

impl AvatarExtension {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Svg => "svg",
        }
    }
}

impl fmt::Display for AvatarExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The normalized avatar: a 96x96 JPEG, or untouched SVG markup when no rasterizer is
/// configured. `base64` is standard-alphabet base64 of the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedAvatar {
    pub base64: String,
    pub extension: AvatarExtension,
}

impl NormalizedAvatar {
    pub fn new(base64: impl Into<String>, extension: AvatarExtension) -> Self {
        Self {
            base64: base64.into(),
            extension,
        }
    }
}
