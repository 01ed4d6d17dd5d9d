//! Per-frame detection results returned by video ingestion.
//!
//! `VideoProcessingResult` is the backend's answer to a process-video
//! call. `validate` enforces the contract rules the client applies at
//! the response boundary; a response that fails them is a backend
//! fault, not a caller error.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::VideoId;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// One detected object in one frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Detection {
    /// Bounding box corner coordinates `[x1, y1, x2, y2]` in pixels.
    /// The corner convention is fixed by the backend and consistent
    /// across all producers.
    #[serde(rename = "box")]
    pub bbox: [f64; 4],
    /// Detector confidence in `[0.0, 1.0]`.
    pub score: f64,
}

/// Detections for a single frame.
///
/// Only frames with at least one detection are represented; a frame
/// with zero detections is omitted from the parent result entirely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameResult {
    /// Frame index within the video, unique and strictly increasing.
    pub frame_idx: u64,
    /// Seconds from video start, non-decreasing with `frame_idx`.
    pub timestamp: f64,
    /// Backend-assigned reference to the extracted frame image.
    /// Opaque; unique within the video.
    pub filename: String,
    pub detections: Vec<Detection>,
}

/// Result of ingesting one video.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoProcessingResult {
    /// Backend-minted identifier, unique across all processed videos.
    pub video_id: VideoId,
    /// Frames decoded from the source video. Always at least the number
    /// of entries in `frames_with_detections`.
    pub total_frames: u64,
    /// Frame rate used for timestamp derivation. Always positive.
    pub fps: f64,
    /// Ordered by ascending `frame_idx`.
    pub frames_with_detections: Vec<FrameResult>,
}

// ---------------------------------------------------------------------------
// Boundary validation
// ---------------------------------------------------------------------------

impl Detection {
    /// Check that the confidence score lies in `[0.0, 1.0]` and every
    /// coordinate is finite.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.score.is_finite() || !(0.0..=1.0).contains(&self.score) {
            return Err(CoreError::Validation(format!(
                "Detection score must be within [0.0, 1.0], got {}",
                self.score
            )));
        }
        if self.bbox.iter().any(|c| !c.is_finite()) {
            return Err(CoreError::Validation(format!(
                "Detection box coordinates must be finite, got {:?}",
                self.bbox
            )));
        }
        Ok(())
    }
}

impl VideoProcessingResult {
    /// Validate the full ingestion result against the contract.
    ///
    /// Rules:
    /// - `video_id` is non-empty,
    /// - `fps` is finite and positive,
    /// - `total_frames` covers every represented frame,
    /// - `frame_idx` strictly increases and `timestamp` is non-negative
    ///   and non-decreasing,
    /// - every represented frame carries at least one detection,
    /// - every detection passes [`Detection::validate`].
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.video_id.trim().is_empty() {
            return Err(CoreError::Validation("video_id is empty".into()));
        }
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(CoreError::Validation(format!(
                "fps must be positive, got {}",
                self.fps
            )));
        }
        if (self.frames_with_detections.len() as u64) > self.total_frames {
            return Err(CoreError::Validation(format!(
                "total_frames ({}) is less than the number of frames with detections ({})",
                self.total_frames,
                self.frames_with_detections.len()
            )));
        }

        let mut prev: Option<&FrameResult> = None;
        for frame in &self.frames_with_detections {
            if !frame.timestamp.is_finite() || frame.timestamp < 0.0 {
                return Err(CoreError::Validation(format!(
                    "Frame {} has a negative or non-finite timestamp: {}",
                    frame.frame_idx, frame.timestamp
                )));
            }
            if frame.detections.is_empty() {
                return Err(CoreError::Validation(format!(
                    "Frame {} is represented but has no detections",
                    frame.frame_idx
                )));
            }
            if let Some(prev) = prev {
                if frame.frame_idx <= prev.frame_idx {
                    return Err(CoreError::Validation(format!(
                        "frame_idx must strictly increase: {} follows {}",
                        frame.frame_idx, prev.frame_idx
                    )));
                }
                if frame.timestamp < prev.timestamp {
                    return Err(CoreError::Validation(format!(
                        "timestamp must not decrease: {} at frame {} follows {} at frame {}",
                        frame.timestamp, frame.frame_idx, prev.timestamp, prev.frame_idx
                    )));
                }
            }
            for detection in &frame.detections {
                detection.validate()?;
            }
            prev = Some(frame);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
