//! HTTP client for a video target-matching backend.
//!
//! Wraps the backend's five operations (video ingestion, text/image
//! target registration, cross-video search, result retrieval) behind
//! typed request/response structures from `framescout-core`, with
//! boundary validation on everything the backend returns.

pub mod api;
pub mod config;
pub mod error;
