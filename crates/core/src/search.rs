//! Cross-video target search: request validation and the nested result
//! structure.
//!
//! The backend answers a search with a map keyed by video, then by
//! target, each cell holding the per-frame matches for that pair. A
//! missing (video, target) cell means no match met the backend's
//! inclusion threshold; it is not an error. `check_scope` is the
//! response-boundary rule: a well-formed response never introduces keys
//! the request did not ask for.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{TargetId, VideoId};

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// One matched frame for a (video, target) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TargetMatch {
    pub frame_idx: u64,
    /// Backend-defined match strength. Higher is stronger; the scale is
    /// not fixed by the contract, but values are comparable within one
    /// response.
    pub similarity: f64,
    /// Reference to the matched frame's visual representation. Opaque,
    /// assigned independently of the ingestion result's `filename`.
    pub frame_path: String,
}

/// Request body for a search call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub video_ids: Vec<VideoId>,
    pub target_ids: Vec<TargetId>,
}

impl SearchRequest {
    /// Both identifier sets must be non-empty and free of blank entries.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.video_ids.is_empty() {
            return Err(CoreError::Validation("video_ids must not be empty".into()));
        }
        if self.target_ids.is_empty() {
            return Err(CoreError::Validation("target_ids must not be empty".into()));
        }
        if self.video_ids.iter().any(|id| id.trim().is_empty()) {
            return Err(CoreError::Validation("video_ids contains a blank identifier".into()));
        }
        if self.target_ids.iter().any(|id| id.trim().is_empty()) {
            return Err(CoreError::Validation("target_ids contains a blank identifier".into()));
        }
        Ok(())
    }
}

/// Search response: matches keyed by `video_id`, then `target_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SearchResult(pub BTreeMap<VideoId, BTreeMap<TargetId, Vec<TargetMatch>>>);

impl SearchResult {
    /// Matches for one (video, target) pair, if the cell is present.
    pub fn matches(&self, video_id: &str, target_id: &str) -> Option<&[TargetMatch]> {
        self.0
            .get(video_id)
            .and_then(|targets| targets.get(target_id))
            .map(Vec::as_slice)
    }

    /// Number of video keys present.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Validate a response against the request that produced it.
    ///
    /// Every key must come from the requested identifier sets and every
    /// match must carry a finite similarity. Violations mean the backend
    /// produced a response outside the contract.
    pub fn check_scope(&self, video_ids: &[VideoId], target_ids: &[TargetId]) -> Result<(), CoreError> {
        for (video_id, targets) in &self.0 {
            if !video_ids.iter().any(|id| id == video_id) {
                return Err(CoreError::Validation(format!(
                    "response contains unrequested video_id: {video_id}"
                )));
            }
            for (target_id, matches) in targets {
                if !target_ids.iter().any(|id| id == target_id) {
                    return Err(CoreError::Validation(format!(
                        "response contains unrequested target_id: {target_id}"
                    )));
                }
                for m in matches {
                    if !m.similarity.is_finite() {
                        return Err(CoreError::Validation(format!(
                            "non-finite similarity for video {video_id}, target {target_id}, frame {}",
                            m.frame_idx
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
