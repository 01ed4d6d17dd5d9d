/// Backend-minted identifier for a processed video.
///
/// Opaque: callers must not parse it or assume any internal structure.
pub type VideoId = String;

/// Backend-minted identifier for a registered target.
///
/// Opaque, unique across all targets regardless of variant (text or
/// image), and stable for the target's lifetime.
pub type TargetId = String;
