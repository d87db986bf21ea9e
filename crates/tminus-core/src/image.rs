//! Background image uploads.
//!
//! Images are stored inline on the event as `data:` URLs. Oversized or
//! unsupported files are refused outright; nothing is kept from a rejected
//! upload.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::ImageError;

/// Accepted MIME types with their usual file extensions.
const ACCEPTED: &[(&str, &[&str])] = &[
    ("image/png", &["png"]),
    ("image/jpeg", &["jpg", "jpeg"]),
    ("image/gif", &["gif"]),
    ("image/webp", &["webp"]),
];

/// MIME type for a file path, judged by extension.
pub fn mime_for_path(path: &Path) -> Result<&'static str, ImageError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    ACCEPTED
        .iter()
        .find(|(_, exts)| exts.contains(&ext.as_str()))
        .map(|(mime, _)| *mime)
        .ok_or_else(|| ImageError::UnsupportedType(path.display().to_string()))
}

/// Size check against the configured ceiling.
pub fn check_size(size: u64, limit: u64) -> Result<(), ImageError> {
    if size > limit {
        return Err(ImageError::TooLarge { size, limit });
    }
    Ok(())
}

/// A validated image ready to be attached to an event or sent to the oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(bytes: Vec<u8>, mime: &str, limit: u64) -> Result<Self, ImageError> {
        let mime = ACCEPTED
            .iter()
            .map(|(m, _)| *m)
            .find(|m| m.eq_ignore_ascii_case(mime))
            .ok_or_else(|| ImageError::UnsupportedType(mime.to_string()))?;
        check_size(bytes.len() as u64, limit)?;
        Ok(Self { mime, bytes })
    }

    /// Read a file from disk. The size is checked before the contents are read.
    pub fn read(path: &Path, limit: u64) -> crate::error::Result<Self> {
        let mime = mime_for_path(path)?;
        check_size(std::fs::metadata(path)?.len(), limit)?;
        let bytes = std::fs::read(path)?;
        Ok(Self::new(bytes, mime, limit)?)
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }

    /// Decode an image previously stored with [`ImageUpload::to_data_url`].
    pub fn from_data_url(data_url: &str, limit: u64) -> Result<Self, ImageError> {
        let payload = data_url_payload(data_url).ok_or(ImageError::InvalidDataUrl)?;
        let mime = data_url
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(";base64,"))
            .map(|(mime, _)| mime)
            .ok_or(ImageError::InvalidDataUrl)?;
        let bytes = STANDARD
            .decode(payload)
            .map_err(|_| ImageError::InvalidDataUrl)?;
        Self::new(bytes, mime, limit)
    }
}

/// The base64 payload of a `data:` URL, without its prefix.
pub fn data_url_payload(data_url: &str) -> Option<&str> {
    let rest = data_url.strip_prefix("data:")?;
    let (_, payload) = rest.split_once(',')?;
    (!payload.is_empty()).then_some(payload)
}
