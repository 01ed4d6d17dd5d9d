//! Client error taxonomy.
//!
//! Three kinds, independent of transport status codes: bad caller
//! input, unknown identifier, backend/transport fault. Every error
//! carries the operation it came from so callers can decide on
//! retry/backoff without string-matching messages. There is no
//! partial-failure variant: an operation either fully succeeds or
//! fully fails.

use framescout_core::error::CoreError;

/// Error kind for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    BackendUnavailable,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Malformed, empty, or undecodable payload supplied by the caller.
    /// Client-side payload decode failures fold in here as well; the
    /// caller cannot distinguish "bad image" from "bad encoding".
    #[error("Invalid input for {operation}: {message}")]
    InvalidInput {
        operation: &'static str,
        message: String,
    },

    /// A referenced identifier does not exist in backend state.
    #[error("Not found during {operation}: {message}")]
    NotFound {
        operation: &'static str,
        message: String,
    },

    /// Transport failure, backend-process failure, or a backend
    /// response outside the contract. Not attributable to the input.
    #[error("Backend unavailable during {operation}: {message}")]
    BackendUnavailable {
        operation: &'static str,
        message: String,
    },
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::InvalidInput { .. } => ErrorKind::InvalidInput,
            ClientError::NotFound { .. } => ErrorKind::NotFound,
            ClientError::BackendUnavailable { .. } => ErrorKind::BackendUnavailable,
        }
    }

    /// Name of the operation the error came from (e.g. `search-targets`).
    pub fn operation(&self) -> &'static str {
        match self {
            ClientError::InvalidInput { operation, .. }
            | ClientError::NotFound { operation, .. }
            | ClientError::BackendUnavailable { operation, .. } => operation,
        }
    }

    pub(crate) fn invalid_input(operation: &'static str, message: impl Into<String>) -> Self {
        ClientError::InvalidInput {
            operation,
            message: message.into(),
        }
    }

    pub(crate) fn not_found(operation: &'static str, message: impl Into<String>) -> Self {
        ClientError::NotFound {
            operation,
            message: message.into(),
        }
    }

    pub(crate) fn backend(operation: &'static str, message: impl Into<String>) -> Self {
        ClientError::BackendUnavailable {
            operation,
            message: message.into(),
        }
    }

    /// Attribute a core validation failure to the caller's input.
    pub(crate) fn from_core(operation: &'static str, err: CoreError) -> Self {
        Self::invalid_input(operation, err.to_string())
    }

    /// Attribute a core validation failure to the backend: the response
    /// deserialized but violated the contract.
    pub(crate) fn malformed_response(operation: &'static str, err: CoreError) -> Self {
        Self::backend(operation, format!("malformed backend response: {err}"))
    }

    /// The HTTP request itself failed (connect, timeout, TLS, body).
    pub(crate) fn transport(operation: &'static str, err: reqwest::Error) -> Self {
        Self::backend(operation, format!("request failed: {err}"))
    }

    /// Classify a non-2xx backend reply into an error kind.
    ///
    /// - `400` / `422` mean the backend rejected the payload: `InvalidInput`.
    /// - `404` means an identifier (or result pair) is unknown: `NotFound`.
    /// - Everything else is a backend fault: `BackendUnavailable`.
    pub(crate) fn from_status(operation: &'static str, status: u16, body: String) -> Self {
        match status {
            400 | 422 => Self::invalid_input(operation, format!("backend rejected request: {body}")),
            404 => Self::not_found(operation, body),
            _ => Self::backend(operation, format!("backend returned {status}: {body}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
