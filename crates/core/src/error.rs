#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A payload or response violated a contract rule.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A client-side payload could not be decoded to raw bytes.
    #[error("Decode failed: {0}")]
    Decode(String),
}
