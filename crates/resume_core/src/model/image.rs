//! Self-contained profile image payloads.
//!
//! # Responsibility
//! - Convert raw image bytes into an embeddable `data:` URL.
//! - Validate data URLs read back from storage.
//!
//! # Invariants
//! - A `ProfileImage` always holds a complete `data:image/<subtype>;base64,` URL.
//! - Failed embeds never produce a partial payload.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Upper bound for raw image bytes accepted by the embedding helper.
pub const MAX_PROFILE_IMAGE_BYTES: usize = 2 * 1024 * 1024;

static DATA_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:image/[a-z0-9.+-]+;base64,[A-Za-z0-9+/]+={0,2}$")
        .expect("valid data url regex")
});

/// Embedded profile image, serialized as its data URL string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProfileImage(String);

/// Image formats recognized by magic-byte sniffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
    Bmp,
}

impl ImageFormat {
    /// Detects the format from leading bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            Some(Self::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(Self::Gif)
        } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some(Self::Webp)
        } else if bytes.starts_with(b"BM") {
            Some(Self::Bmp)
        } else {
            None
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
            Self::Bmp => "image/bmp",
        }
    }
}

/// Errors from the image embedding helper.
#[derive(Debug)]
pub enum ImageEmbedError {
    /// Input contained no bytes.
    Empty,
    /// Input exceeds [`MAX_PROFILE_IMAGE_BYTES`].
    TooLarge { size: usize, max: usize },
    /// Leading bytes match no supported image format.
    UnsupportedFormat,
    /// String is not a base64 image data URL.
    InvalidDataUrl,
    /// Source file could not be read.
    Io(std::io::Error),
}

impl Display for ImageEmbedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "image payload is empty"),
            Self::TooLarge { size, max } => {
                write!(f, "image payload is {size} bytes; limit is {max}")
            }
            Self::UnsupportedFormat => write!(f, "unsupported image format"),
            Self::InvalidDataUrl => write!(f, "value is not a base64 image data url"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ImageEmbedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ImageEmbedError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl ProfileImage {
    /// Validates an existing data URL.
    pub fn parse(data_url: impl Into<String>) -> Result<Self, ImageEmbedError> {
        let data_url = data_url.into();
        if !DATA_URL_RE.is_match(&data_url) {
            return Err(ImageEmbedError::InvalidDataUrl);
        }
        Ok(Self(data_url))
    }

    pub fn as_data_url(&self) -> &str {
        &self.0
    }

    /// Returns the `image/<subtype>` part of the URL.
    pub fn mime_type(&self) -> &str {
        self.0
            .strip_prefix("data:")
            .and_then(|rest| rest.split(';').next())
            .unwrap_or_default()
    }
}

impl TryFrom<String> for ProfileImage {
    type Error = ImageEmbedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ProfileImage> for String {
    fn from(value: ProfileImage) -> Self {
        value.0
    }
}

/// Embeds raw image bytes as a self-contained data URL.
///
/// # Errors
/// - `Empty` for zero-length input.
/// - `TooLarge` above [`MAX_PROFILE_IMAGE_BYTES`].
/// - `UnsupportedFormat` when sniffing fails.
pub fn embed_profile_image(bytes: &[u8]) -> Result<ProfileImage, ImageEmbedError> {
    if bytes.is_empty() {
        warn!("event=image_embed module=image status=error error_code=empty");
        return Err(ImageEmbedError::Empty);
    }
    if bytes.len() > MAX_PROFILE_IMAGE_BYTES {
        warn!(
            "event=image_embed module=image status=error error_code=too_large size={}",
            bytes.len()
        );
        return Err(ImageEmbedError::TooLarge {
            size: bytes.len(),
            max: MAX_PROFILE_IMAGE_BYTES,
        });
    }
    let Some(format) = ImageFormat::sniff(bytes) else {
        warn!("event=image_embed module=image status=error error_code=unsupported_format");
        return Err(ImageEmbedError::UnsupportedFormat);
    };

    let data_url = format!("data:{};base64,{}", format.mime_type(), BASE64.encode(bytes));
    info!(
        "event=image_embed module=image status=ok mime={} size={}",
        format.mime_type(),
        bytes.len()
    );
    Ok(ProfileImage(data_url))
}

/// Reads an image file and embeds it.
///
/// The file size is checked from metadata before reading the content.
pub fn read_profile_image(path: impl AsRef<Path>) -> Result<ProfileImage, ImageEmbedError> {
    let path = path.as_ref();
    let size = std::fs::metadata(path)?.len();
    if size > MAX_PROFILE_IMAGE_BYTES as u64 {
        warn!("event=image_embed module=image status=error error_code=too_large size={size}");
        return Err(ImageEmbedError::TooLarge {
            size: usize::try_from(size).unwrap_or(usize::MAX),
            max: MAX_PROFILE_IMAGE_BYTES,
        });
    }
    let bytes = std::fs::read(path)?;
    embed_profile_image(&bytes)
}

#[cfg(test)]
mod tests {
    use super::{embed_profile_image, ImageEmbedError, ImageFormat, ProfileImage};

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13];

    #[test]
    fn sniff_detects_known_formats() {
        assert_eq!(ImageFormat::sniff(PNG_HEADER), Some(ImageFormat::Png));
        assert_eq!(
            ImageFormat::sniff(&[0xFF, 0xD8, 0xFF, 0xE0]),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(ImageFormat::sniff(b"GIF89a...."), Some(ImageFormat::Gif));
        assert_eq!(ImageFormat::sniff(b"RIFF\0\0\0\0WEBPVP8 "), Some(ImageFormat::Webp));
        assert_eq!(ImageFormat::sniff(b"%PDF-1.7"), None);
    }

    #[test]
    fn embed_builds_data_url_with_sniffed_mime() {
        let image = embed_profile_image(PNG_HEADER).unwrap();
        assert!(image.as_data_url().starts_with("data:image/png;base64,"));
        assert_eq!(image.mime_type(), "image/png");
        ProfileImage::parse(image.as_data_url()).unwrap();
    }

    #[test]
    fn embed_rejects_unknown_bytes() {
        let err = embed_profile_image(b"plain text").unwrap_err();
        assert!(matches!(err, ImageEmbedError::UnsupportedFormat));
    }

    #[test]
    fn parse_rejects_paths_and_markup() {
        assert!(ProfileImage::parse("/home/me/photo.png").is_err());
        assert!(ProfileImage::parse("data:image/png;base64,AAAA\" onerror=\"x").is_err());
        assert!(ProfileImage::parse("data:text/html;base64,AAAA").is_err());
    }
}
