#![allow(dead_code)]

//! In-process mock of the target-matching backend.
//!
//! Serves the five wire endpoints on an ephemeral port so integration
//! tests exercise the real client over real HTTP. The mock mints
//! sequential identifiers, keeps ingested videos and registered targets
//! in memory, and caches computed search results so retrieval can
//! re-serve them. `Misbehavior` variants make it violate the contract
//! on purpose for boundary-validation tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::Engine as _;
use serde_json::{json, Value};

use framescout_client::api::FrameScoutApi;
use framescout_client::config::ClientConfig;
use framescout_core::detection::{Detection, FrameResult, VideoProcessingResult};
use framescout_core::search::TargetMatch;

/// Payload the mock accepts as a decodable video (`ftyp` box magic).
pub const VALID_VIDEO: &[u8] = b"\x00\x00\x00\x18ftypmp42-framescout-test-payload";

/// PNG magic plus filler; enough for header-only format sniffing.
pub fn png_bytes() -> Vec<u8> {
    let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
    bytes.extend_from_slice(&[0u8; 16]);
    bytes
}

/// The PNG above as a base64 data URL, the shape image targets arrive in.
pub fn png_data_url() -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(png_bytes());
    format!("data:image/png;base64,{payload}")
}

/// Ways the mock can deliberately break the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Misbehavior {
    #[default]
    None,
    /// Ingestion result lists frames out of `frame_idx` order.
    UnsortedFrames,
    /// Search response includes a (video, target) key nobody asked for.
    OutOfScopeSearchKeys,
}

#[derive(Default)]
pub struct MockBackend {
    misbehavior: Misbehavior,
    next_video: AtomicU64,
    next_target: AtomicU64,
    /// Total HTTP requests observed, across all endpoints.
    pub requests: AtomicUsize,
    videos: Mutex<HashMap<String, VideoProcessingResult>>,
    targets: Mutex<HashMap<String, String>>,
    results: Mutex<HashMap<(String, String), Vec<TargetMatch>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn misbehaving(misbehavior: Misbehavior) -> Self {
        Self {
            misbehavior,
            ..Self::default()
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn mint_video_id(&self) -> String {
        format!("v{}", self.next_video.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn mint_target_id(&self) -> String {
        format!("t{}", self.next_target.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

/// Start the mock on an ephemeral port and return a client pointed at it.
pub async fn spawn_backend() -> (FrameScoutApi, Arc<MockBackend>) {
    spawn_backend_with(MockBackend::new()).await
}

pub async fn spawn_backend_with(backend: MockBackend) -> (FrameScoutApi, Arc<MockBackend>) {
    let state = Arc::new(backend);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    let app = router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend serve");
    });

    let api = FrameScoutApi::new(ClientConfig::new(format!("http://{addr}/api")));
    (api, state)
}

pub fn router(state: Arc<MockBackend>) -> Router {
    Router::new()
        .route("/api/process-video", post(process_video))
        .route("/api/add-text-target", post(add_text_target))
        .route("/api/add-image-target", post(add_image_target))
        .route("/api/search-targets", post(search_targets))
        .route("/api/get-results/{video_id}/{target_id}", get(get_results))
        .with_state(state)
}

// ---- canned detection data ----

fn canned_frames() -> Vec<FrameResult> {
    vec![
        FrameResult {
            frame_idx: 5,
            timestamp: 0.1667,
            filename: "f5.jpg".to_string(),
            detections: vec![Detection {
                bbox: [10.0, 10.0, 50.0, 50.0],
                score: 0.92,
            }],
        },
        FrameResult {
            frame_idx: 17,
            timestamp: 0.5667,
            filename: "f17.jpg".to_string(),
            detections: vec![Detection {
                bbox: [120.0, 40.0, 200.0, 180.0],
                score: 0.81,
            }],
        },
    ]
}

// ---- handlers ----

async fn process_video(
    State(state): State<Arc<MockBackend>>,
    mut multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    state.requests.fetch_add(1, Ordering::SeqCst);

    let mut payload = Vec::new();
    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        if field.name() == Some("video") {
            payload = field.bytes().await.expect("video bytes").to_vec();
        }
    }

    let decodable = payload.len() >= 8 && &payload[4..8] == b"ftyp";
    if !decodable {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "payload is not a decodable video"})),
        );
    }

    let video_id = state.mint_video_id();
    let mut frames = canned_frames();
    if state.misbehavior == Misbehavior::UnsortedFrames {
        frames.reverse();
    }
    let result = VideoProcessingResult {
        video_id: video_id.clone(),
        total_frames: 100,
        fps: 30.0,
        frames_with_detections: frames,
    };
    state
        .videos
        .lock()
        .expect("videos lock")
        .insert(video_id, result.clone());

    (
        StatusCode::OK,
        Json(serde_json::to_value(&result).expect("serialize result")),
    )
}

async fn add_text_target(
    State(state): State<Arc<MockBackend>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.requests.fetch_add(1, Ordering::SeqCst);

    let text = body["text"].as_str().unwrap_or("");
    if text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "text must not be empty"})),
        );
    }

    let target_id = state.mint_target_id();
    state
        .targets
        .lock()
        .expect("targets lock")
        .insert(target_id.clone(), format!("text:{text}"));
    (StatusCode::OK, Json(json!({"target_id": target_id})))
}

async fn add_image_target(
    State(state): State<Arc<MockBackend>>,
    mut multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    state.requests.fetch_add(1, Ordering::SeqCst);

    let mut payload = Vec::new();
    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        if field.name() == Some("image") {
            payload = field.bytes().await.expect("image bytes").to_vec();
        }
    }

    if image::guess_format(&payload).is_err() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "payload is not a supported image"})),
        );
    }

    let target_id = state.mint_target_id();
    state
        .targets
        .lock()
        .expect("targets lock")
        .insert(target_id.clone(), "image".to_string());
    (StatusCode::OK, Json(json!({"target_id": target_id})))
}

async fn search_targets(
    State(state): State<Arc<MockBackend>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.requests.fetch_add(1, Ordering::SeqCst);

    let video_ids: Vec<String> = as_string_vec(&body["video_ids"]);
    let target_ids: Vec<String> = as_string_vec(&body["target_ids"]);
    if video_ids.is_empty() || target_ids.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "video_ids and target_ids must be non-empty"})),
        );
    }

    let videos = state.videos.lock().expect("videos lock");
    let targets = state.targets.lock().expect("targets lock");
    for id in &video_ids {
        if !videos.contains_key(id) {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({"error": format!("unknown video_id: {id}")})),
            );
        }
    }
    for id in &target_ids {
        if !targets.contains_key(id) {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({"error": format!("unknown target_id: {id}")})),
            );
        }
    }

    let mut response = serde_json::Map::new();
    let mut results = state.results.lock().expect("results lock");
    for video_id in &video_ids {
        let video = &videos[video_id];
        let mut per_target = serde_json::Map::new();
        for target_id in &target_ids {
            let matches: Vec<TargetMatch> = video
                .frames_with_detections
                .iter()
                .map(|frame| TargetMatch {
                    frame_idx: frame.frame_idx,
                    // Deterministic stand-in for a real similarity model.
                    similarity: frame.detections[0].score * 0.95,
                    frame_path: format!("frames/{video_id}/{}.jpg", frame.frame_idx),
                })
                .collect();
            results.insert((video_id.clone(), target_id.clone()), matches.clone());
            per_target.insert(
                target_id.clone(),
                serde_json::to_value(&matches).expect("serialize matches"),
            );
        }
        response.insert(video_id.clone(), Value::Object(per_target));
    }

    if state.misbehavior == Misbehavior::OutOfScopeSearchKeys {
        response.insert("v-rogue".to_string(), json!({"t-rogue": []}));
    }

    (StatusCode::OK, Json(Value::Object(response)))
}

async fn get_results(
    State(state): State<Arc<MockBackend>>,
    Path((video_id, target_id)): Path<(String, String)>,
) -> (StatusCode, Json<Value>) {
    state.requests.fetch_add(1, Ordering::SeqCst);

    let known_video = state
        .videos
        .lock()
        .expect("videos lock")
        .contains_key(&video_id);
    let known_target = state
        .targets
        .lock()
        .expect("targets lock")
        .contains_key(&target_id);
    if !known_video || !known_target {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "unknown video_id or target_id"})),
        );
    }

    let results = state.results.lock().expect("results lock");
    match results.get(&(video_id.clone(), target_id.clone())) {
        Some(matches) => {
            let cell = json!({
                &video_id: {
                    &target_id: serde_json::to_value(matches).expect("serialize matches"),
                }
            });
            (StatusCode::OK, Json(cell))
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "pair was never searched"})),
        ),
    }
}

fn as_string_vec(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
