//! Target registration payloads.
//!
//! A target is either a natural-language description or a reference
//! image. Both reduce, on registration, to an opaque `target_id`; the
//! variant only affects how the registration request is encoded.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::media::DecodedImage;
use crate::types::TargetId;

/// What to register as a search target.
#[derive(Debug, Clone)]
pub enum TargetPayload {
    /// A natural-language description, e.g. "a red car".
    Text(String),
    /// A reference image, already decoded to raw bytes.
    Image(DecodedImage),
}

impl TargetPayload {
    /// Check the payload is registrable. Images were already sniffed
    /// when they were decoded, so only text needs a rule here.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self {
            TargetPayload::Text(text) => validate_target_text(text),
            TargetPayload::Image(_) => Ok(()),
        }
    }

    /// Variant label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            TargetPayload::Text(_) => "text",
            TargetPayload::Image(_) => "image",
        }
    }
}

/// Request body for text-target registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterTextTarget {
    pub text: String,
    /// Display label. May be empty; never required to be unique.
    pub name: String,
}

/// Response body for both registration variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterTargetResponse {
    pub target_id: TargetId,
}

impl RegisterTargetResponse {
    /// A registration response must carry a non-empty identifier.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.target_id.trim().is_empty() {
            return Err(CoreError::Validation(
                "registration response has an empty target_id".into(),
            ));
        }
        Ok(())
    }
}

/// A target description must be non-empty after trimming.
pub fn validate_target_text(text: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation(
            "target text must not be empty".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
