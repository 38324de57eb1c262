//! Transport encoding for reference images and generated creatives.
//!
//! The Gemini API carries binary image payloads as base64 inline-data parts;
//! generated creatives come back the same way and are handed to callers as
//! data URLs.

use crate::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::path::Path;

/// A user-supplied reference image, read fully into memory.
#[derive(Debug, Clone)]
pub struct ReferenceImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ReferenceImage {
    pub fn new(bytes: Vec<u8>, mime_type: String) -> Self {
        Self { bytes, mime_type }
    }

    /// Read an image file and sniff its MIME type. Suspends until the read
    /// completes; there is no cancellation once started.
    pub async fn from_file(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let mime_type = detect_image_mime(&bytes).to_string();
        Ok(Self { bytes, mime_type })
    }

    /// Base64 payload without the data-URL scheme prefix, as the Gemini
    /// request body expects.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

pub fn detect_image_mime(bytes: &[u8]) -> &'static str {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [0x89, 0x50, 0x4E, 0x47, ..] => "image/png",
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => "image/webp",
        _ => {
            tracing::warn!(
                "Unrecognized image format (first 4 bytes: {:02X?}), falling back to image/png",
                &bytes[..bytes.len().min(4)]
            );
            "image/png"
        }
    }
}

/// Wrap a base64 payload as a `data:` URL.
pub fn to_data_url(mime_type: &str, base64_payload: &str) -> String {
    format!("data:{};base64,{}", mime_type, base64_payload)
}

/// Split a `data:` URL back into its MIME type and raw bytes.
pub fn decode_data_url(data_url: &str) -> Result<(String, Vec<u8>)> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| Error::Encoding("Missing data: scheme in data URL".to_string()))?;

    let (mime_type, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| Error::Encoding("Missing base64 marker in data URL".to_string()))?;

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| Error::Encoding(format!("Invalid base64 payload in data URL: {}", e)))?;

    Ok((mime_type.to_string(), bytes))
}

/// File extension for persisting a creative with the given MIME type.
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    match mime_type {
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        _ => "png",
    }
}
