//! Data model and validation rules for the framescout target-matching
//! contract.
//!
//! Defines the wire types shared between the client and the detection
//! backend (frame detections, target registration, search results), the
//! validation rules the client enforces at both boundaries, and the
//! client-side image payload preparation step. This crate performs no
//! I/O; the HTTP operations live in `framescout-client`.

pub mod detection;
pub mod error;
pub mod media;
pub mod search;
pub mod target;
pub mod types;
