//! Client-side image payload preparation.
//!
//! Image targets arrive as embedded data-references (`data:` URLs with a
//! base64 payload) and must be reduced to raw bytes before transmission.
//! `decode_image_data` is that transform: a pure function with an
//! explicit failure return, composed before the network call. Any
//! failure here is reported as caller input error, indistinguishable
//! from a registration failure.

use base64::Engine as _;
use image::ImageFormat;

use crate::error::CoreError;

/// Image encodings accepted for target registration.
const SUPPORTED_FORMATS: [ImageFormat; 3] = [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::WebP];

/// Raw image bytes with their sniffed encoding, ready for multipart
/// transmission.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    bytes: Vec<u8>,
    format: ImageFormat,
}

impl DecodedImage {
    /// Sniff the encoding of raw image bytes.
    ///
    /// Fails with [`CoreError::Decode`] when the bytes are not a
    /// recognized image, or a recognized but unsupported encoding.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, CoreError> {
        let format = image::guess_format(&bytes)
            .map_err(|_| CoreError::Decode("payload is not a recognized image".into()))?;
        if !SUPPORTED_FORMATS.contains(&format) {
            return Err(CoreError::Decode(format!(
                "unsupported image format: {format:?}"
            )));
        }
        Ok(Self { bytes, format })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// MIME type for the sniffed encoding (e.g. `image/png`).
    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    /// Synthetic file name for multipart upload (e.g. `target.png`).
    pub fn file_name(&self) -> String {
        let ext = self.format.extensions_str().first().copied().unwrap_or("bin");
        format!("target.{ext}")
    }
}

/// Decode an embedded data-reference to raw image bytes.
///
/// Accepts RFC 2397 `data:` URLs with a base64 payload, e.g.
/// `data:image/png;base64,iVBOR...`. The declared media type is ignored;
/// the actual encoding is sniffed from the decoded bytes.
pub fn decode_image_data(data: &str) -> Result<DecodedImage, CoreError> {
    let rest = data
        .strip_prefix("data:")
        .ok_or_else(|| CoreError::Decode("image data must be a data: URL".into()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| CoreError::Decode("data URL has no payload separator".into()))?;
    if !meta.ends_with(";base64") {
        return Err(CoreError::Decode(
            "only base64-encoded data URLs are supported".into(),
        ));
    }
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| CoreError::Decode(format!("invalid base64 payload: {e}")))?;
    DecodedImage::from_bytes(bytes)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
