//! Fallback rules around oracle calls.
//!
//! Saving an event must never block on the oracle, so every path here
//! returns a label (or an empty extraction) instead of an error.

use super::traits::CategoryOracle;
use crate::category::{OTHER, PERSONAL};
use crate::event::{Event, ExtractedFields};
use crate::image::ImageUpload;

/// Titles shorter than this are not worth a remote call.
pub const MIN_TITLE_CHARS: usize = 3;

/// Validate a raw oracle reply against the allowed labels.
///
/// Unexpected replies map to `Other` if allowed, else the first label,
/// else `Personal`.
pub fn accept_label(response: &str, labels: &[String]) -> String {
    let response = response.trim();
    if labels.iter().any(|l| l == response) {
        return response.to_string();
    }
    tracing::warn!(response, "oracle returned an unexpected category");
    if labels.iter().any(|l| l == OTHER) {
        OTHER.to_string()
    } else {
        labels.first().cloned().unwrap_or_else(|| PERSONAL.to_string())
    }
}

/// Label used when the oracle call itself failed: `Personal` if allowed,
/// else the first label, else `Other`.
pub fn failure_fallback(labels: &[String]) -> String {
    if labels.iter().any(|l| l == PERSONAL) {
        PERSONAL.to_string()
    } else {
        labels.first().cloned().unwrap_or_else(|| OTHER.to_string())
    }
}

/// Ask the oracle for a category, applying every fallback rule.
pub async fn categorize(oracle: &dyn CategoryOracle, title: &str, labels: &[String]) -> String {
    if title.trim().chars().count() < MIN_TITLE_CHARS {
        return PERSONAL.to_string();
    }
    match oracle.classify(title, labels).await {
        Ok(response) => accept_label(&response, labels),
        Err(e) => {
            tracing::warn!("categorization failed: {e}");
            failure_fallback(labels)
        }
    }
}

/// Read event fields from an image. Failures yield an empty extraction.
pub async fn extract(oracle: &dyn CategoryOracle, image: &ImageUpload) -> ExtractedFields {
    match oracle.extract_from_image(&image.bytes, image.mime).await {
        Ok(fields) => fields,
        Err(e) => {
            tracing::warn!("image extraction failed: {e}");
            ExtractedFields::default()
        }
    }
}

/// Whether saving `title` needs a fresh category. Edits that keep the title
/// of an already-categorized event reuse its category.
pub fn needs_categorization(existing: Option<&Event>, title: &str) -> bool {
    match existing {
        Some(event) => event.title != title || event.category.is_none(),
        None => true,
    }
}
