//! REST client for the target-matching backend.
//!
//! Wraps the backend's HTTP endpoints (video ingestion, target
//! registration, search, result retrieval) using [`reqwest`]. Each
//! method is a single request/response exchange: no retries, no shared
//! mutable state, no implicit synchronization between operations. A
//! search that references a video still being ingested fails with
//! `NotFound`; it never blocks.

use std::time::Duration;

use framescout_core::detection::VideoProcessingResult;
use framescout_core::media::DecodedImage;
use framescout_core::search::{SearchRequest, SearchResult, TargetMatch};
use framescout_core::target::{
    RegisterTargetResponse, RegisterTextTarget, TargetPayload, validate_target_text,
};
use framescout_core::types::{TargetId, VideoId};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// HTTP client for one target-matching backend.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct FrameScoutApi {
    client: reqwest::Client,
    base_url: String,
    request_timeout: Duration,
}

impl FrameScoutApi {
    /// Create a new client from an explicit configuration.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client reusing an existing [`reqwest::Client`] (useful
    /// for pooling connections across multiple backends).
    pub fn with_client(client: reqwest::Client, config: ClientConfig) -> Self {
        Self {
            client,
            base_url: config.base_url,
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    /// Backend API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- operations ----

    /// Ingest a video: the backend extracts frames, runs detection, and
    /// answers with the full per-frame result keyed by a newly minted
    /// `video_id`.
    ///
    /// Sends `POST /process-video` with the raw bytes as a multipart
    /// `video` field. The response is validated against the contract
    /// before it is returned; ingesting the same bytes twice mints two
    /// distinct identifiers.
    pub async fn process_video(
        &self,
        video: Vec<u8>,
        file_name: &str,
    ) -> Result<VideoProcessingResult, ClientError> {
        const OP: &str = "process-video";

        if video.is_empty() {
            return Err(ClientError::invalid_input(OP, "video payload is empty"));
        }

        let part = reqwest::multipart::Part::bytes(video).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("video", part);

        let response = self
            .client
            .post(format!("{}/process-video", self.base_url))
            .multipart(form)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| ClientError::transport(OP, e))?;

        let result: VideoProcessingResult = Self::parse_response(OP, response).await?;
        result
            .validate()
            .map_err(|e| ClientError::malformed_response(OP, e))?;

        tracing::info!(
            video_id = %result.video_id,
            total_frames = result.total_frames,
            frames_with_detections = result.frames_with_detections.len(),
            "Video processed",
        );
        Ok(result)
    }

    /// Register a text target. Returns the backend-minted `target_id`.
    ///
    /// Sends `POST /add-text-target` as JSON `{text, name}`. Text that
    /// is empty after trimming fails client-side; no request is issued.
    pub async fn add_text_target(
        &self,
        text: &str,
        name: &str,
    ) -> Result<TargetId, ClientError> {
        const OP: &str = "add-text-target";

        validate_target_text(text).map_err(|e| ClientError::from_core(OP, e))?;

        let body = RegisterTextTarget {
            text: text.to_string(),
            name: name.to_string(),
        };

        let response = self
            .client
            .post(format!("{}/add-text-target", self.base_url))
            .json(&body)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| ClientError::transport(OP, e))?;

        let registered: RegisterTargetResponse = Self::parse_response(OP, response).await?;
        registered
            .validate()
            .map_err(|e| ClientError::malformed_response(OP, e))?;

        tracing::info!(target_id = %registered.target_id, "Text target registered");
        Ok(registered.target_id)
    }

    /// Register an image target. Returns the backend-minted `target_id`.
    ///
    /// The image must already be reduced to raw bytes — see
    /// [`framescout_core::media::decode_image_data`] for the data-URL
    /// transform; its failures surface to callers as `InvalidInput`.
    /// Sends `POST /add-image-target` as multipart `image` + `name`
    /// fields, with the MIME type taken from the sniffed encoding.
    pub async fn add_image_target(
        &self,
        image: DecodedImage,
        name: &str,
    ) -> Result<TargetId, ClientError> {
        const OP: &str = "add-image-target";

        let file_name = image.file_name();
        let mime_type = image.mime_type();
        let part = reqwest::multipart::Part::bytes(image.into_bytes())
            .file_name(file_name)
            .mime_str(mime_type)
            .map_err(|e| ClientError::invalid_input(OP, format!("invalid image MIME type: {e}")))?;
        let form = reqwest::multipart::Form::new()
            .part("image", part)
            .text("name", name.to_string());

        let response = self
            .client
            .post(format!("{}/add-image-target", self.base_url))
            .multipart(form)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| ClientError::transport(OP, e))?;

        let registered: RegisterTargetResponse = Self::parse_response(OP, response).await?;
        registered
            .validate()
            .map_err(|e| ClientError::malformed_response(OP, e))?;

        tracing::info!(target_id = %registered.target_id, "Image target registered");
        Ok(registered.target_id)
    }

    /// Register either target variant, dispatching on the payload.
    pub async fn register_target(
        &self,
        payload: TargetPayload,
        name: &str,
    ) -> Result<TargetId, ClientError> {
        match payload {
            TargetPayload::Text(text) => self.add_text_target(&text, name).await,
            TargetPayload::Image(image) => self.add_image_target(image, name).await,
        }
    }

    /// Match every requested target against every detected object in
    /// every requested video.
    ///
    /// Sends `POST /search-targets` as JSON `{video_ids, target_ids}`.
    /// Either set being empty fails client-side with `InvalidInput`.
    /// An identifier unknown to the backend fails the whole call with
    /// `NotFound`; no partial result is produced. A (video, target)
    /// pair absent from the result means no match met the backend's
    /// inclusion threshold.
    ///
    /// The backend cost is proportional to the requested cross product,
    /// so batch identifiers into one call rather than issuing one call
    /// per pair.
    pub async fn search_targets(
        &self,
        video_ids: &[VideoId],
        target_ids: &[TargetId],
    ) -> Result<SearchResult, ClientError> {
        const OP: &str = "search-targets";

        let request = SearchRequest {
            video_ids: video_ids.to_vec(),
            target_ids: target_ids.to_vec(),
        };
        request.validate().map_err(|e| ClientError::from_core(OP, e))?;

        let response = self
            .client
            .post(format!("{}/search-targets", self.base_url))
            .json(&request)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| ClientError::transport(OP, e))?;

        let result: SearchResult = Self::parse_response(OP, response).await?;
        result
            .check_scope(video_ids, target_ids)
            .map_err(|e| ClientError::malformed_response(OP, e))?;

        tracing::debug!(
            videos_requested = video_ids.len(),
            targets_requested = target_ids.len(),
            videos_matched = result.len(),
            "Search complete",
        );
        Ok(result)
    }

    /// Fetch the stored result for one (video, target) pair without
    /// recomputation.
    ///
    /// Sends `GET /get-results/{video_id}/{target_id}`. Fails with
    /// `NotFound` if either identifier is unknown or the pair was never
    /// searched.
    pub async fn get_results(
        &self,
        video_id: &str,
        target_id: &str,
    ) -> Result<Vec<TargetMatch>, ClientError> {
        const OP: &str = "get-results";

        if video_id.trim().is_empty() || target_id.trim().is_empty() {
            return Err(ClientError::invalid_input(
                OP,
                "video_id and target_id must be non-empty",
            ));
        }

        let response = self
            .client
            .get(format!(
                "{}/get-results/{}/{}",
                self.base_url, video_id, target_id
            ))
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| ClientError::transport(OP, e))?;

        let result: SearchResult = Self::parse_response(OP, response).await?;
        result
            .check_scope(&[video_id.to_string()], &[target_id.to_string()])
            .map_err(|e| ClientError::malformed_response(OP, e))?;

        match result.matches(video_id, target_id) {
            Some(matches) => Ok(matches.to_vec()),
            None => Err(ClientError::not_found(
                OP,
                format!("no stored result for video {video_id} and target {target_id}"),
            )),
        }
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or the classified error kind with
    /// the status and body text on failure.
    async fn ensure_success(
        operation: &'static str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::from_status(operation, status.as_u16(), body));
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    /// A body that fails to deserialize is a backend fault.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        operation: &'static str,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(operation, response).await?;
        response.json::<T>().await.map_err(|e| {
            ClientError::backend(operation, format!("undecodable backend response: {e}"))
        })
    }
}
